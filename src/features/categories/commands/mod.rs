pub mod category_commands;

pub use category_commands::{
    CreateCategoryCommand, CreateCategoryHandler, DeleteCategoryCommand, DeleteCategoryHandler,
    UpdateCategoryCommand, UpdateCategoryHandler,
};
