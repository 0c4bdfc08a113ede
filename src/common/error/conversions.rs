//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;
use crate::common::binary::BinaryError;

impl From<BinaryError> for Error {
    fn from(err: BinaryError) -> Self {
        match err {
            BinaryError::InsufficientData {
                offset,
                expected,
                available,
            } => Error::UnexpectedEof {
                offset,
                needed: expected,
                available,
            },
            BinaryError::ParseError(msg) => Error::InvalidFormat(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_becomes_eof() {
        let err: Error = BinaryError::InsufficientData {
            offset: 6,
            expected: 4,
            available: 1,
        }
        .into();
        assert!(matches!(
            err,
            Error::UnexpectedEof {
                offset: 6,
                needed: 4,
                available: 1
            }
        ));
    }
}
