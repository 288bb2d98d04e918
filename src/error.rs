use thiserror::Error;

/// Errors surfaced by the orbital pipeline and its front ends.
#[derive(Error, Debug)]
pub enum OrbitalError {
    /// Triple violates n >= 1, l <= n - 1, |m| <= l
    #[error("invalid quantum numbers (n={n}, l={l}, m={m})")]
    InvalidQuantumNumbers { n: u32, l: u32, m: i32 },

    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OrbitalError>;
