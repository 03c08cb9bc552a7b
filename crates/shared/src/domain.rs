use serde::{Deserialize, Serialize};

/// Grid position on a keypad, 1-indexed from the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coords {
    pub row: i32,
    pub col: i32,
}

impl Coords {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Unit step in `direction`. `Apply` has no geometric offset.
    pub fn step(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.offset();
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

/// Cursor position together with the one it moved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimatedCoords {
    pub previous: Coords,
    pub current: Coords,
}

impl AnimatedCoords {
    pub const fn stable(coords: Coords) -> Self {
        Self {
            previous: coords,
            current: coords,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.previous != self.current
    }

    /// `(rows, cols)` travelled by the last transition.
    pub fn offset(&self) -> (i32, i32) {
        (
            self.current.row - self.previous.row,
            self.current.col - self.previous.col,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Apply,
}

impl Direction {
    pub const ALL: [Direction; 5] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Apply,
    ];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Apply => (0, 0),
        }
    }

    /// Persisted character, uppercase.
    pub fn code_char(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Apply => 'A',
        }
    }

    pub fn from_code_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            'A' => Some(Direction::Apply),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Direction::Up => '↑',
            Direction::Down => '↓',
            Direction::Left => '←',
            Direction::Right => '→',
            Direction::Apply => 'A',
        }
    }

    /// Accepts codec characters as well as arrow glyphs and `^ v < >`.
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '↑' | '^' => Some(Direction::Up),
            '↓' | 'v' => Some(Direction::Down),
            '←' | '<' => Some(Direction::Left),
            '→' | '>' => Some(Direction::Right),
            other => Self::from_code_char(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialPadValue {
    Digit(u8),
    Apply,
}

impl DialPadValue {
    pub fn digit(value: u8) -> Option<Self> {
        (value <= 9).then_some(DialPadValue::Digit(value))
    }

    pub fn code_char(self) -> Option<char> {
        match self {
            DialPadValue::Digit(d) => char::from_digit(u32::from(d), 10),
            DialPadValue::Apply => Some('A'),
        }
    }

    pub fn from_code_char(c: char) -> Option<Self> {
        if c.eq_ignore_ascii_case(&'A') {
            return Some(DialPadValue::Apply);
        }
        let digit = c.to_digit(10)?;
        u8::try_from(digit).ok().and_then(Self::digit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadKind {
    Dial,
    Direction,
}

impl PadKind {
    pub fn symbol_from_code_char(self, c: char) -> Option<PadSymbol> {
        match self {
            PadKind::Dial => DialPadValue::from_code_char(c).map(PadSymbol::Dial),
            PadKind::Direction => Direction::from_code_char(c).map(PadSymbol::Direction),
        }
    }
}

/// A button label on either kind of keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadSymbol {
    Dial(DialPadValue),
    Direction(Direction),
}

impl PadSymbol {
    pub fn kind(self) -> PadKind {
        match self {
            PadSymbol::Dial(_) => PadKind::Dial,
            PadSymbol::Direction(_) => PadKind::Direction,
        }
    }

    pub fn is_apply(self) -> bool {
        matches!(
            self,
            PadSymbol::Dial(DialPadValue::Apply) | PadSymbol::Direction(Direction::Apply)
        )
    }

    /// `None` only for out-of-range digits.
    pub fn code_char(self) -> Option<char> {
        match self {
            PadSymbol::Dial(value) => value.code_char(),
            PadSymbol::Direction(direction) => Some(direction.code_char()),
        }
    }

    pub fn glyph(self) -> Option<char> {
        match self {
            PadSymbol::Dial(value) => value.code_char(),
            PadSymbol::Direction(direction) => Some(direction.glyph()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_chars_are_case_insensitive() {
        assert_eq!(Direction::from_code_char('u'), Some(Direction::Up));
        assert_eq!(Direction::from_code_char('R'), Some(Direction::Right));
        assert_eq!(Direction::from_code_char('x'), None);
    }

    #[test]
    fn key_aliases_map_to_directions() {
        assert_eq!(Direction::from_key('^'), Some(Direction::Up));
        assert_eq!(Direction::from_key('v'), Some(Direction::Down));
        assert_eq!(Direction::from_key('V'), None);
        assert_eq!(Direction::from_key('←'), Some(Direction::Left));
        assert_eq!(Direction::from_key('a'), Some(Direction::Apply));
    }

    #[test]
    fn dial_values_reject_out_of_range_digits() {
        assert_eq!(DialPadValue::digit(9), Some(DialPadValue::Digit(9)));
        assert_eq!(DialPadValue::digit(10), None);
        assert_eq!(DialPadValue::from_code_char('a'), Some(DialPadValue::Apply));
        assert_eq!(DialPadValue::from_code_char('U'), None);
        assert_eq!(DialPadValue::Digit(12).code_char(), None);
    }

    #[test]
    fn step_applies_unit_offsets() {
        let origin = Coords::new(2, 2);
        assert_eq!(origin.step(Direction::Up), Coords::new(1, 2));
        assert_eq!(origin.step(Direction::Right), Coords::new(2, 3));
        assert_eq!(origin.step(Direction::Apply), origin);
    }

    #[test]
    fn animated_offset_tracks_last_transition() {
        let coords = AnimatedCoords {
            previous: Coords::new(2, 3),
            current: Coords::new(2, 2),
        };
        assert!(coords.is_moving());
        assert_eq!(coords.offset(), (0, -1));
        assert!(!AnimatedCoords::stable(Coords::new(1, 1)).is_moving());
    }
}
