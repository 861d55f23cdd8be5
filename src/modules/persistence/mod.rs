pub mod error;
pub mod gateway;
pub mod postgres;

pub use error::PersistenceError;
pub use gateway::{PersistenceGateway, PersistenceResult};
pub use postgres::PostgresGateway;
