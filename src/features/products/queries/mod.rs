pub mod product_queries;

pub use product_queries::{
    GetProductByIdHandler, GetProductByIdQuery, GetProductsHandler, GetProductsQuery,
};
