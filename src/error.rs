//! Error types and handling
//!
//! Every failed call is answered with a `{code, message, details}` triple.
//! The codes are a fixed vocabulary that callers match on, so the variant
//! names here are part of the wire contract.

use serde::Serialize;
use thiserror::Error;

use crate::color::ColorError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The region of interest was rejected by the config's validating setter
    #[error("region of interest not applied: {0}")]
    RegionNotApplied(ConfigError),

    /// The thread limit was rejected by the config's validating setter
    #[error("threads limit not applied: {0}")]
    ThreadLimitNotApplied(ConfigError),

    #[error("invalid resolution index: {0}")]
    InvalidResolution(i64),

    /// Tag outside the fixed `DecoderType` enumeration
    #[error("barcode type {0} not found")]
    UnknownBarcodeType(i64),

    /// The tag resolved but the operation has no meaning for that symbology
    #[error("operation `{operation}` is not supported for {symbology}")]
    UnsupportedForType {
        symbology: &'static str,
        operation: &'static str,
    },

    #[error("barkoder config is not valid: {0}")]
    ConfigNotValid(String),

    #[error("color not set: {0}")]
    ColorNotSet(ColorError),

    #[error("invalid camera position: {0}")]
    InvalidCameraPosition(i64),

    /// A call arrived before a session was started (or after it ended)
    #[error("no active scanner config")]
    NoActiveConfig,

    /// Argument shape does not match what the command declares
    #[error("bad argument for `{command}`: {reason}")]
    BadArgument {
        command: &'static str,
        reason: String,
    },

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("length range not valid: {0}")]
    LengthRangeNotValid(ConfigError),

    /// An enumerated selector (checksum type, decoding speed, ...) is out of range
    #[error("{kind} {value} not found")]
    OptionNotFound { kind: &'static str, value: String },
}

impl Error {
    /// Wire code of this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::RegionNotApplied(_) => "RegionNotApplied",
            Self::ThreadLimitNotApplied(_) => "ThreadLimitNotApplied",
            Self::InvalidResolution(_) => "InvalidResolution",
            Self::UnknownBarcodeType(_) => "UnknownBarcodeType",
            Self::UnsupportedForType { .. } => "UnsupportedForType",
            Self::ConfigNotValid(_) => "ConfigNotValid",
            Self::ColorNotSet(_) => "ColorNotSet",
            Self::InvalidCameraPosition(_) => "InvalidCameraPosition",
            Self::NoActiveConfig => "NoActiveConfig",
            Self::BadArgument { .. } => "BadArgument",
            Self::UnknownCommand(_) => "UnknownCommand",
            Self::LengthRangeNotValid(_) => "LengthRangeNotValid",
            Self::OptionNotFound { .. } => "OptionNotFound",
        }
    }

    /// Short, stable description of the error class
    pub fn message(&self) -> &'static str {
        match self {
            Self::RegionNotApplied(_) => "Region of interest not set",
            Self::ThreadLimitNotApplied(_) => "Threads limit not set",
            Self::InvalidResolution(_) => "Invalid resolution",
            Self::UnknownBarcodeType(_) => "Barcode type not found",
            Self::UnsupportedForType { .. } => "Barcode type not supported",
            Self::ConfigNotValid(_) => "Barkoder config is not valid",
            Self::ColorNotSet(_) => "Color not set",
            Self::InvalidCameraPosition(_) => "Invalid camera position",
            Self::NoActiveConfig => "Barkoder config is not initialized",
            Self::BadArgument { .. } => "Bad argument",
            Self::UnknownCommand(_) => "Not implemented",
            Self::LengthRangeNotValid(_) => "Length range not valid",
            Self::OptionNotFound { .. } => "Option not found",
        }
    }

    /// Diagnostic details, if any
    pub fn details(&self) -> Option<String> {
        match self {
            Self::NoActiveConfig => None,
            other => Some(other.to_string()),
        }
    }

    /// Build the serializable reply sent back to the caller
    pub fn to_reply(&self) -> ErrorReply {
        ErrorReply {
            code: self.code(),
            message: self.message(),
            details: self.details(),
        }
    }
}

/// Wire form of an [`Error`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReply {
    pub code: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Rejections produced by the config's own validating setters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("region ({left}, {top}, {width}, {height}) is outside the normalized frame")]
    InvalidRegion {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },

    #[error("threads limit {0} is outside 1..={max}", max = crate::config::MAX_THREADS_LIMIT)]
    InvalidThreadsLimit(i64),

    #[error("length range {min}..{max} is invalid (min must be <= max, max <= {limit})", limit = crate::config::MAX_SYMBOL_LENGTH)]
    InvalidLengthRange { min: i64, max: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_carries_code_and_details() {
        let reply = Error::UnknownBarcodeType(99).to_reply();
        assert_eq!(reply.code, "UnknownBarcodeType");
        assert_eq!(reply.message, "Barcode type not found");
        assert_eq!(reply.details.as_deref(), Some("barcode type 99 not found"));
    }

    #[test]
    fn test_no_active_config_has_no_details() {
        let json = serde_json::to_value(Error::NoActiveConfig.to_reply()).unwrap();
        assert_eq!(json["code"], "NoActiveConfig");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_malformed_and_rejected_are_distinct() {
        let malformed = Error::BadArgument {
            command: "setThreadsLimit",
            reason: "expected integer".into(),
        };
        let rejected = Error::ThreadLimitNotApplied(ConfigError::InvalidThreadsLimit(0));
        assert_ne!(malformed.code(), rejected.code());
    }
}
