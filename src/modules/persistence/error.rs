use std::borrow::Cow;

use thiserror::Error;

/// PostgreSQL SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("{0}")]
    ConstraintViolation(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Unknown(String),
}

impl PersistenceError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<sqlx::Error> for PersistenceError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err)
                if db_err.code() == Some(Cow::Borrowed(UNIQUE_VIOLATION)) =>
            {
                PersistenceError::ConstraintViolation(db_err.message().to_string())
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => PersistenceError::Unavailable(e.to_string()),
            _ => PersistenceError::Unknown(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_faults_are_unavailable() {
        assert!(matches!(
            PersistenceError::from(sqlx::Error::PoolTimedOut),
            PersistenceError::Unavailable(_)
        ));
        assert!(matches!(
            PersistenceError::from(sqlx::Error::PoolClosed),
            PersistenceError::Unavailable(_)
        ));
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            PersistenceError::from(sqlx::Error::Io(io)),
            PersistenceError::Unavailable(_)
        ));
    }

    #[test]
    fn test_other_faults_are_unknown() {
        assert!(matches!(
            PersistenceError::from(sqlx::Error::RowNotFound),
            PersistenceError::Unknown(_)
        ));
        assert!(matches!(
            PersistenceError::from(sqlx::Error::Protocol("bad frame".into())),
            PersistenceError::Unknown(_)
        ));
    }

    #[test]
    fn test_not_found_message_names_entity() {
        assert_eq!(
            PersistenceError::not_found("Product", 99999).to_string(),
            "Product with id 99999 not found"
        );
    }
}
