use thiserror::Error;

/// Represents possible failures while parsing a FIX message.
///
/// `Incomplete` means the input ended mid-token and more bytes could
/// complete it; a framing layer may retry with a longer buffer.
/// `Syntax` means the bytes seen so far violate the grammar or the
/// framing checks; the message should be dropped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("incomplete FIX message: {0}")]
    Incomplete(&'static str),
    #[error("malformed FIX message: {0}")]
    Syntax(&'static str),
}
