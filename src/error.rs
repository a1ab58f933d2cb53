//! Error types for V2VChain

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    InvalidBlockLinkage { index: u64 },
    DigestMismatch { index: u64 },
    InvalidMemberIndex { index: usize, members: usize },
    InvalidConfig(String),
    IoError(String),
    SerializationError(String),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChainError::InvalidBlockLinkage { index } => {
                write!(f, "Invalid block linkage at block {}", index)
            }
            ChainError::DigestMismatch { index } => {
                write!(f, "Digest mismatch at block {}", index)
            }
            ChainError::InvalidMemberIndex { index, members } => write!(
                f,
                "Invalid vehicle index {} (expected 1-{})",
                index, members
            ),
            ChainError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            ChainError::IoError(msg) => write!(f, "IO error: {}", msg),
            ChainError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ChainError {}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::InvalidConfig(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
