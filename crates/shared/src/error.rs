use thiserror::Error;

use crate::domain::PadKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("layout spec is empty: expected a dial pad character")]
    EmptyLayout,
    #[error("unrecognized {kind:?} pad character '{ch}' at position {position}")]
    UnrecognizedChar {
        kind: PadKind,
        ch: char,
        position: usize,
    },
    #[error("level {level} has no symbol that can be encoded")]
    UnencodableLevel { level: usize },
}

impl CodecError {
    /// The offending input character, when the failure came from parsing.
    pub fn failing_char(&self) -> Option<char> {
        match self {
            CodecError::UnrecognizedChar { ch, .. } => Some(*ch),
            _ => None,
        }
    }
}
