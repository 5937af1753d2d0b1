// src/responses/error_code.rs
//! Reserved Alpaca error numbers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Alpaca error number as carried in the `ErrorNumber` field.
///
/// Any `i32` is representable so that numbers outside the reserved table
/// survive a round trip through a response unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    pub const OK: ErrorCode = ErrorCode(0);
    pub const NOT_IMPLEMENTED: ErrorCode = ErrorCode(0x400);
    pub const INVALID_VALUE: ErrorCode = ErrorCode(0x401);
    pub const VALUE_NOT_SET: ErrorCode = ErrorCode(0x402);
    pub const NOT_CONNECTED: ErrorCode = ErrorCode(0x407);
    pub const INVALID_WHILE_PARKED: ErrorCode = ErrorCode(0x408);
    pub const INVALID_WHILE_SLAVED: ErrorCode = ErrorCode(0x409);
    pub const INVALID_OPERATION: ErrorCode = ErrorCode(0x40B);
    pub const ACTION_NOT_IMPLEMENTED: ErrorCode = ErrorCode(0x40C);
    pub const UNSPECIFIED: ErrorCode = ErrorCode(0x4FF);

    /// First number available for driver-specific errors
    pub const DRIVER_BASE: i32 = 0x500;
    /// Last number available for driver-specific errors
    pub const DRIVER_MAX: i32 = 0xFFF;

    pub fn is_success(&self) -> bool {
        self.0 == 0
    }

    pub fn is_driver_specific(&self) -> bool {
        (Self::DRIVER_BASE..=Self::DRIVER_MAX).contains(&self.0)
    }

    /// Get the reserved name for this number, if it has one
    pub fn name(&self) -> Option<&'static str> {
        match *self {
            Self::OK => Some("OK"),
            Self::NOT_IMPLEMENTED => Some("NotImplemented"),
            Self::INVALID_VALUE => Some("InvalidValue"),
            Self::VALUE_NOT_SET => Some("ValueNotSet"),
            Self::NOT_CONNECTED => Some("NotConnected"),
            Self::INVALID_WHILE_PARKED => Some("InvalidWhileParked"),
            Self::INVALID_WHILE_SLAVED => Some("InvalidWhileSlaved"),
            Self::INVALID_OPERATION => Some("InvalidOperation"),
            Self::ACTION_NOT_IMPLEMENTED => Some("ActionNotImplemented"),
            Self::UNSPECIFIED => Some("UnspecifiedError"),
            _ => None,
        }
    }
}

impl From<i32> for ErrorCode {
    fn from(value: i32) -> Self {
        ErrorCode(value)
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} (0x{:X})", name, self.0),
            None if self.is_driver_specific() => write!(f, "DriverError (0x{:X})", self.0),
            None => write!(f, "0x{:X}", self.0),
        }
    }
}
