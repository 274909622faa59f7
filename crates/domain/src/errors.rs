use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid DNS query: {0}")]
    InvalidQuery(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Failed to encode DNS response: {0}")]
    Encoding(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache store error: {0}")]
    CacheError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("All upstream servers exhausted for query {0}")]
    UpstreamExhausted(u16),
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::IoError(err.to_string())
    }
}
