pub mod product_commands;

pub use product_commands::{
    CreateProductCommand, CreateProductHandler, DeleteProductCommand, DeleteProductHandler,
    UpdateProductCommand, UpdateProductHandler, UpdateProductStatusCommand,
    UpdateProductStatusHandler,
};
