//! Compact text form of a [`PadStack`]: `<layout-spec>;<output-code>`.
//!
//! The layout spec holds one character per level, dial pad first, for every
//! level except the outermost one. That pad is always restored on Apply.

use shared::{
    domain::{DialPadValue, Direction, PadKind, PadSymbol},
    error::CodecError,
};

use crate::stack::PadStack;

pub const SEPARATOR: char = ';';

pub fn encode_layout(stack: &PadStack) -> Result<String, CodecError> {
    // A lone dial pad is its own outermost level; it still has to be kept.
    let persisted = stack.outermost().max(1).min(stack.len());
    stack.levels()[..persisted]
        .iter()
        .enumerate()
        .map(|(level, pad)| {
            pad.current_symbol()
                .and_then(PadSymbol::code_char)
                .ok_or(CodecError::UnencodableLevel { level })
        })
        .collect()
}

pub fn encode(stack: &PadStack) -> Result<String, CodecError> {
    let layout = encode_layout(stack)?;
    Ok(format!("{layout}{SEPARATOR}{}", stack.output_code()))
}

/// Parses an encoded stack. Nothing is built unless every character is valid.
///
/// Every layout character is a level of its own; the outermost Apply pad is
/// appended on top. Only the layout part is trimmed, the code is kept as is.
pub fn decode(encoded: &str) -> Result<PadStack, CodecError> {
    let (layout, output_code) = encoded.split_once(SEPARATOR).unwrap_or((encoded, ""));
    let layout = layout.trim();

    let mut chars = layout.chars();
    let first = chars.next().ok_or(CodecError::EmptyLayout)?;
    let dial = DialPadValue::from_code_char(first).ok_or(CodecError::UnrecognizedChar {
        kind: PadKind::Dial,
        ch: first,
        position: 0,
    })?;

    let mut directions = chars
        .enumerate()
        .map(|(index, ch)| {
            Direction::from_code_char(ch).ok_or(CodecError::UnrecognizedChar {
                kind: PadKind::Direction,
                ch,
                position: index + 1,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    directions.push(Direction::Apply);

    Ok(PadStack::new(dial, &directions, output_code))
}

#[cfg(test)]
#[path = "tests/codec_tests.rs"]
mod tests;
