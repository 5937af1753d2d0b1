// src/responses/response.rs
//! The transaction fields common to every Alpaca response

use super::error_code::ErrorCode;
use crate::error::{AlpacaError, Result};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

/// Properties shared by all Alpaca responses.
///
/// `error_message` is empty on success. A non-empty message must come with a
/// non-zero `error_number`; see [`TransactionResponse::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionResponse {
    /// Client's transaction ID, echoed from the request
    #[serde(rename = "ClientTransactionID")]
    pub client_transaction_id: u32,
    /// Server's transaction ID, unique per transaction for log correlation
    #[serde(rename = "ServerTransactionID")]
    pub server_transaction_id: u32,
    #[serde(rename = "ErrorNumber", default)]
    pub error_number: ErrorCode,
    #[serde(rename = "ErrorMessage", default)]
    pub error_message: String,
}

impl TransactionResponse {
    pub fn success(client_transaction_id: u32, server_transaction_id: u32) -> Self {
        Self {
            client_transaction_id,
            server_transaction_id,
            error_number: ErrorCode::OK,
            error_message: String::new(),
        }
    }

    /// Build a failed response. An empty message is replaced by the code's
    /// description so that code and message stay jointly populated.
    pub fn error(
        client_transaction_id: u32,
        server_transaction_id: u32,
        error_number: ErrorCode,
        message: impl Into<String>,
    ) -> Self {
        let mut error_message = message.into();
        if error_message.is_empty() && !error_number.is_success() {
            error_message = error_number.to_string();
        }

        Self {
            client_transaction_id,
            server_transaction_id,
            error_number,
            error_message,
        }
    }

    /// Report a library error to the client
    pub fn from_error(
        client_transaction_id: u32,
        server_transaction_id: u32,
        error: &AlpacaError,
    ) -> Self {
        Self::error(
            client_transaction_id,
            server_transaction_id,
            error.error_code(),
            error.to_string(),
        )
    }

    pub fn is_success(&self) -> bool {
        self.error_number.is_success()
    }

    /// Check that the error number and message agree
    pub fn validate(&self) -> Result<()> {
        match (self.error_number.is_success(), self.error_message.is_empty()) {
            (true, false) => Err(AlpacaError::InvalidValue(format!(
                "error message '{}' supplied with a zero error number",
                self.error_message
            ))),
            (false, true) => Err(AlpacaError::InvalidValue(format!(
                "error number {} supplied without an error message",
                self.error_number.0
            ))),
            _ => Ok(()),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let response: Self = serde_json::from_str(json)?;
        Ok(response)
    }
}

/// Allocates server transaction IDs.
///
/// IDs start at 1 and never repeat zero after wrapping past `u32::MAX`.
#[derive(Debug)]
pub struct ServerTransactionIds {
    next: AtomicU32,
}

impl ServerTransactionIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u32) -> Self {
        Self {
            next: AtomicU32::new(first),
        }
    }

    pub fn next_id(&self) -> u32 {
        loop {
            let id = self.next.fetch_add(1, Ordering::Relaxed);
            if id != 0 {
                return id;
            }
        }
    }

    /// Build a success response for the given client transaction
    pub fn success(&self, client_transaction_id: u32) -> TransactionResponse {
        TransactionResponse::success(client_transaction_id, self.next_id())
    }

    /// Build a failed response for the given client transaction
    pub fn failure(&self, client_transaction_id: u32, error: &AlpacaError) -> TransactionResponse {
        TransactionResponse::from_error(client_transaction_id, self.next_id(), error)
    }
}

impl Default for ServerTransactionIds {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_wire_names() {
        let response = TransactionResponse::success(12, 34);
        let value: serde_json::Value = serde_json::to_value(&response).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert_eq!(object["ClientTransactionID"], 12);
        assert_eq!(object["ServerTransactionID"], 34);
        assert_eq!(object["ErrorNumber"], 0);
        assert_eq!(object["ErrorMessage"], "");
    }

    #[test]
    fn test_missing_error_fields_default_to_success() {
        let response =
            TransactionResponse::from_json(r#"{"ClientTransactionID":1,"ServerTransactionID":2}"#)
                .unwrap();
        assert!(response.is_success());
        assert!(response.error_message.is_empty());
        assert!(response.validate().is_ok());
    }

    #[test]
    fn test_large_transaction_ids() {
        let json = r#"{"ClientTransactionID":4294967295,"ServerTransactionID":0,"ErrorNumber":1025,"ErrorMessage":"bad"}"#;
        let response = TransactionResponse::from_json(json).unwrap();
        assert_eq!(response.client_transaction_id, u32::MAX);
        assert_eq!(response.error_number, ErrorCode::INVALID_VALUE);
        assert_eq!(TransactionResponse::from_json(&response.to_json().unwrap()).unwrap(), response);
    }

    #[test]
    fn test_validate() {
        let mut response = TransactionResponse::success(1, 1);
        assert!(response.validate().is_ok());

        response.error_message = "oops".to_string();
        assert!(response.validate().unwrap_err().is_invalid_value());

        response.error_number = ErrorCode::UNSPECIFIED;
        assert!(response.validate().is_ok());

        response.error_message.clear();
        assert!(response.validate().is_err());
    }

    #[test]
    fn test_error_without_message_is_described() {
        let response = TransactionResponse::error(1, 2, ErrorCode::NOT_CONNECTED, "");
        assert_eq!(response.error_message, "NotConnected (0x407)");
        assert!(response.validate().is_ok());
    }

    #[test]
    fn test_from_error() {
        let err = AlpacaError::InvalidValue("minutes must be less than 60".to_string());
        let response = TransactionResponse::from_error(5, 6, &err);
        assert_eq!(response.error_number, ErrorCode::INVALID_VALUE);
        assert!(response.error_message.contains("minutes"));
        assert!(!response.is_success());
    }

    #[test]
    fn test_ids_skip_zero_on_wrap() {
        let ids = ServerTransactionIds::starting_at(u32::MAX);
        assert_eq!(ids.next_id(), u32::MAX);
        assert_eq!(ids.next_id(), 1);
    }

    #[test]
    fn test_ids_unique_across_threads() {
        let ids = Arc::new(ServerTransactionIds::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..250).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 1000);
    }
}
