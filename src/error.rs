//! Error
//!
//! This module provides the errors shared by the weather client and server
//! with [`thiserror`]
//!
use std::io;
use thiserror::Error;

/// Result use the [`MeteoError`] as error.
pub type Result<T> = std::result::Result<T, MeteoError>;

/// MeteoError covers transport and protocol failures.
///
/// Semantic outcomes such as an unsupported city or an invalid metric code
/// are delivered responses, not errors; they live in [`crate::Outcome`].
#[derive(Error, Debug)]
pub enum MeteoError {
    #[error("io error {0}")]
    /// IO relevant errors
    IOError(#[from] io::Error),

    /// A message shorter than its fixed wire size
    #[error("incomplete message: expected {expected} bytes, got {got}")]
    IncompleteMessage {
        /// The fixed size of the message being decoded.
        expected: usize,
        /// The number of bytes actually available.
        got: usize,
    },

    /// A response carried a status integer outside the known set
    #[error("unknown status code {0}")]
    InvalidStatus(i32),

    /// A successful response echoed a metric code outside {t,h,w,p}
    #[error("unknown metric code {0:#04x} in response")]
    UnknownMetric(u8),

    /// The request could not be transmitted in full
    #[error("send failed: {0}")]
    SendError(#[source] io::Error),

    /// The connection closed or failed before a full response arrived
    #[error("receive failed: {0}")]
    ReceiveError(#[source] io::Error),
}
