// src/responses/mod.rs
//! Alpaca response records and reserved error numbers

pub mod error_code;
pub mod response;

pub use error_code::ErrorCode;
pub use response::{ServerTransactionIds, TransactionResponse};
