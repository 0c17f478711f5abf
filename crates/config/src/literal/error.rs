use thiserror::Error;

/// A literal expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} (at offset {offset})")]
pub struct LiteralError {
    /// Byte offset into the expression text.
    pub offset: usize,
    pub kind: LiteralErrorKind,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LiteralErrorKind {
    #[error("empty expression")]
    Empty,

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),

    #[error("unexpected {0}")]
    UnexpectedToken(String),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unsupported string prefix {0:?}")]
    UnsupportedPrefix(String),

    #[error("invalid escape sequence: {0}")]
    InvalidEscape(String),

    #[error("bytes literals may only contain ASCII characters")]
    NonAsciiBytes,

    #[error("cannot mix bytes and str literals")]
    MixedStringKinds,

    #[error("invalid number literal {0:?}")]
    InvalidNumber(String),

    #[error("integer literal does not fit in 64 bits")]
    IntegerOverflow,

    #[error("name {0:?} is not a literal")]
    NameNotAllowed(String),

    #[error("unary {0} applies to numbers only")]
    BadUnaryOperand(char),

    #[error("unhashable type {0} used as set member or dict key")]
    Unhashable(&'static str),

    #[error("literal nested deeper than {0} levels")]
    TooDeep(usize),
}
