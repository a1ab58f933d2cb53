//! V2VChain - a proof-of-work ledger for messages exchanged between vehicles
//!
//! # Architecture
//!
//! ## Core Ledger
//! - [`hash`] - SHA-256 digests and the difficulty target check
//! - [`blockchain`] - Block construction, the ledger and chain validation
//! - [`miner`] - Proof-of-work nonce search
//!
//! ## Interaction
//! - [`messages`] - Message text between registered vehicles
//! - [`cli`] - Interactive menu session
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod blockchain;
pub mod hash;
pub mod miner;

// ============================================================================
// Interaction
// ============================================================================
pub mod cli;
pub mod messages;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;

pub use blockchain::{Block, BlockSummary, Ledger};
pub use error::ChainError;
