// src/lib.rs
//! Alpaca Standard Library
//!
//! Shared types for the ASCOM Alpaca device API together with the
//! sexagesimal conversion utilities used by drivers and clients.

pub mod config;
pub mod error;
pub mod responses;
pub mod utilities;

// Re-export main types for convenience
pub use error::{AlpacaError, Result};
pub use responses::{ErrorCode, ServerTransactionIds, TransactionResponse};
pub use utilities::{dms_to_degrees_in, Culture};
