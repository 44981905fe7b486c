#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("universal hash prime table is empty")]
    EmptyPrimeTable,

    #[error("invalid universal hash parameters a={a}, b={b}, p={p}")]
    InvalidParameters { a: i64, b: i64, p: i64 },

    #[error("unsupported algorithm '{0}' (expected division, multiplicative or universal)")]
    UnsupportedAlgorithm(String),

    #[error("character set has {0} characters, more than a hash modulus can address")]
    CharsetTooLarge(usize),

    #[cfg(feature = "tokio")]
    #[error("synthesis task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;
