//! Error types for border extraction.

use thiserror::Error;

/// Failure while turning uploaded bytes into [`DocumentBorders`](super::DocumentBorders).
///
/// `Display` yields only the underlying message; callers add their own context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The container could not be decoded as a workbook.
    #[error("{message}")]
    Decode { message: String },

    /// The extraction task died before producing a result.
    #[error("{message}")]
    Aborted { message: String },
}

impl ExtractError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode { message: message.into() }
    }

    pub fn aborted(message: impl Into<String>) -> Self {
        Self::Aborted { message: message.into() }
    }

    pub fn missing_part(part: &str) -> Self {
        Self::decode(format!("Missing required part: {}", part))
    }
}

impl From<zip::result::ZipError> for ExtractError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::decode(format!("ZIP error: {}", err))
    }
}

impl From<quick_xml::Error> for ExtractError {
    fn from(err: quick_xml::Error) -> Self {
        Self::decode(format!("XML error: {}", err))
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(err: std::io::Error) -> Self {
        Self::decode(format!("IO error: {}", err))
    }
}
