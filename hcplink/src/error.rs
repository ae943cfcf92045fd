//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Protocol error: {0}")]
    Core(#[from] hcplink_core::Error),

    #[error("Module returned error code {code}")]
    ModuleError { code: u8 },

    #[error("Invalid response from module: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// Check if the failure was the distinct receive-timeout condition.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_timeout())
    }
}
