use shared::domain::{AnimatedCoords, Coords, DialPadValue, Direction, PadKind, PadSymbol};

use crate::layout::{KeypadLayout, DIAL_PAD, DIRECTION_PAD};

/// Cursor over one keypad. The current cell always carries a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PadModel {
    layout: &'static KeypadLayout,
    coords: AnimatedCoords,
}

impl PadModel {
    /// Starts on `symbol`, or on the layout's Apply key if the layout has no such symbol.
    pub fn new(layout: &'static KeypadLayout, symbol: PadSymbol) -> Self {
        let mut pad = Self {
            layout,
            coords: AnimatedCoords::stable(layout.home()),
        };
        pad.set(symbol);
        pad
    }

    pub fn dial(value: DialPadValue) -> Self {
        Self::new(&DIAL_PAD, PadSymbol::Dial(value))
    }

    pub fn direction(value: Direction) -> Self {
        Self::new(&DIRECTION_PAD, PadSymbol::Direction(value))
    }

    pub fn layout(&self) -> &'static KeypadLayout {
        self.layout
    }

    pub fn kind(&self) -> PadKind {
        self.layout.kind()
    }

    pub fn coords(&self) -> AnimatedCoords {
        self.coords
    }

    /// Jumps to `symbol` without a transition. Symbols the layout lacks are ignored.
    pub fn set(&mut self, symbol: PadSymbol) -> bool {
        match self.layout.coords_of(symbol) {
            Some(coords) => {
                self.coords = AnimatedCoords::stable(coords);
                true
            }
            None => false,
        }
    }

    pub fn current_symbol(&self) -> Option<PadSymbol> {
        self.layout.symbol_at(self.coords.current)
    }

    fn candidate(&self, direction: Direction) -> Option<Coords> {
        if direction == Direction::Apply {
            return None;
        }
        let next = self.coords.current.step(direction);
        self.layout.is_valid_pos(next).then_some(next)
    }

    pub fn can_apply(&self, direction: Direction) -> bool {
        self.candidate(direction).is_some()
    }

    /// Moves one cell. Returns `false` and leaves the pad untouched when the
    /// target is off the grid or a gap.
    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        let Some(next) = self.candidate(direction) else {
            return false;
        };
        self.coords = AnimatedCoords {
            previous: self.coords.current,
            current: next,
        };
        true
    }
}

#[cfg(test)]
#[path = "tests/pad_tests.rs"]
mod tests;
