use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("customer not found with id: {0}")]
    CustomerNotFound(i32),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn db(e: impl std::fmt::Display) -> Self { Self::Db(e.to_string()) }
}
