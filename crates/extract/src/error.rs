use thiserror::Error;

/// Reasons a backslash-escaped payload could not be decoded
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnescapeError {
    #[error("trailing backslash at offset {0}")]
    TrailingBackslash(usize),

    #[error("unrecognized escape sequence '\\{escape}' at offset {offset}")]
    UnknownEscape { escape: char, offset: usize },

    #[error("malformed hex escape at offset {0}")]
    MalformedHex(usize),

    #[error("missing or invalid control character after '\\c' at offset {0}")]
    MalformedControl(usize),

    #[error("escape at offset {offset} is not a valid code point: {value:#x}")]
    InvalidCodePoint { value: u32, offset: usize },
}
