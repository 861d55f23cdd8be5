pub mod category_queries;

pub use category_queries::{
    GetCategoriesHandler, GetCategoriesQuery, GetCategoryByIdHandler, GetCategoryByIdQuery,
};
