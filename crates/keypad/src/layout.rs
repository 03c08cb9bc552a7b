use shared::domain::{Coords, DialPadValue, Direction, PadKind, PadSymbol};

type Cell = Option<PadSymbol>;

const fn digit(value: u8) -> Cell {
    Some(PadSymbol::Dial(DialPadValue::Digit(value)))
}

const fn arrow(direction: Direction) -> Cell {
    Some(PadSymbol::Direction(direction))
}

const GAP: Cell = None;

/// Static description of a keypad grid. `None` cells are gaps.
#[derive(Debug, PartialEq, Eq)]
pub struct KeypadLayout {
    kind: PadKind,
    rows: i32,
    cols: i32,
    cells: &'static [&'static [Cell]],
    home: Coords,
}

/// ```text
/// 7 8 9
/// 4 5 6
/// 1 2 3
///   0 A
/// ```
pub static DIAL_PAD: KeypadLayout = KeypadLayout {
    kind: PadKind::Dial,
    rows: 4,
    cols: 3,
    cells: &[
        &[digit(7), digit(8), digit(9)],
        &[digit(4), digit(5), digit(6)],
        &[digit(1), digit(2), digit(3)],
        &[GAP, digit(0), Some(PadSymbol::Dial(DialPadValue::Apply))],
    ],
    home: Coords::new(4, 3),
};

/// ```text
///   ↑ A
/// ← ↓ →
/// ```
pub static DIRECTION_PAD: KeypadLayout = KeypadLayout {
    kind: PadKind::Direction,
    rows: 2,
    cols: 3,
    cells: &[
        &[GAP, arrow(Direction::Up), arrow(Direction::Apply)],
        &[
            arrow(Direction::Left),
            arrow(Direction::Down),
            arrow(Direction::Right),
        ],
    ],
    home: Coords::new(1, 3),
};

impl KeypadLayout {
    pub fn for_kind(kind: PadKind) -> &'static KeypadLayout {
        match kind {
            PadKind::Dial => &DIAL_PAD,
            PadKind::Direction => &DIRECTION_PAD,
        }
    }

    pub fn kind(&self) -> PadKind {
        self.kind
    }

    /// `(rows, cols)`.
    pub fn extents(&self) -> (i32, i32) {
        (self.rows, self.cols)
    }

    /// Position of the Apply key, where pads rest before their first `set`.
    pub fn home(&self) -> Coords {
        self.home
    }

    pub fn in_extents(&self, coords: Coords) -> bool {
        (1..=self.rows).contains(&coords.row) && (1..=self.cols).contains(&coords.col)
    }

    pub fn symbol_at(&self, coords: Coords) -> Option<PadSymbol> {
        if !self.in_extents(coords) {
            return None;
        }
        let row = usize::try_from(coords.row - 1).ok()?;
        let col = usize::try_from(coords.col - 1).ok()?;
        self.cells.get(row)?.get(col).copied().flatten()
    }

    pub fn coords_of(&self, symbol: PadSymbol) -> Option<Coords> {
        self.cells().find_map(|(coords, s)| (s == symbol).then_some(coords))
    }

    pub fn is_valid_pos(&self, coords: Coords) -> bool {
        self.symbol_at(coords).is_some()
    }

    pub fn is_gap(&self, coords: Coords) -> bool {
        self.in_extents(coords) && self.symbol_at(coords).is_none()
    }

    /// Labelled cells in row-major order; gaps are skipped.
    pub fn cells(&self) -> impl Iterator<Item = (Coords, PadSymbol)> + '_ {
        self.cells.iter().zip(1..).flat_map(|(row_cells, row)| {
            row_cells
                .iter()
                .copied()
                .zip(1..)
                .filter_map(move |(cell, col)| cell.map(|symbol| (Coords::new(row, col), symbol)))
        })
    }
}
