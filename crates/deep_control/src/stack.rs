use keypad::PadModel;
use shared::{
    domain::{AnimatedCoords, DialPadValue, Direction, PadSymbol},
    protocol::{ControlOutcome, LevelSnapshot, StackSnapshot},
};
use tracing::debug;

pub const DEFAULT_DIAL_VALUE: DialPadValue = DialPadValue::Digit(6);
pub const DEFAULT_DIRECTION_LEVELS: [Direction; 3] =
    [Direction::Up, Direction::Left, Direction::Apply];

/// Level 0 is the dial pad; every level above it steers the one below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PadStack {
    levels: Vec<PadModel>,
    output_code: String,
}

impl Default for PadStack {
    fn default() -> Self {
        Self::new(DEFAULT_DIAL_VALUE, &DEFAULT_DIRECTION_LEVELS, String::new())
    }
}

impl PadStack {
    /// `directions` lists levels 1..=N, the last one being the pad the user touches.
    pub fn new(
        dial: DialPadValue,
        directions: &[Direction],
        output_code: impl Into<String>,
    ) -> Self {
        let levels = std::iter::once(PadModel::dial(dial))
            .chain(directions.iter().copied().map(PadModel::direction))
            .collect();
        Self {
            levels,
            output_code: output_code.into(),
        }
    }

    pub fn levels(&self) -> &[PadModel] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&PadModel> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the user-facing pad.
    pub fn outermost(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    pub fn output_code(&self) -> &str {
        &self.output_code
    }

    pub fn positions(&self) -> Vec<AnimatedCoords> {
        self.levels.iter().map(PadModel::coords).collect()
    }

    pub fn symbols(&self) -> Vec<Option<PadSymbol>> {
        self.levels.iter().map(PadModel::current_symbol).collect()
    }

    /// Routes a press on pad `level` down the stack.
    ///
    /// A direction moves the pad below. Apply on the dial pad emits its digit;
    /// Apply on a direction pad replays that pad's own symbol one level down,
    /// falling through every pad that itself rests on Apply.
    pub fn control(&mut self, level: usize, direction: Direction) -> ControlOutcome {
        if level >= self.levels.len() {
            debug!(level, levels = self.levels.len(), "control: level out of range");
            return ControlOutcome::Ignored;
        }

        if direction != Direction::Apply {
            let Some(target) = level.checked_sub(1) else {
                return ControlOutcome::Ignored;
            };
            return self.move_level(target, direction);
        }

        let mut level = level;
        loop {
            let Some(symbol) = self.levels[level].current_symbol() else {
                debug!(level, "control: level has no symbol, aborting cascade");
                return ControlOutcome::Ignored;
            };

            match (level, symbol) {
                (0, PadSymbol::Dial(DialPadValue::Apply)) => return ControlOutcome::Ignored,
                (0, PadSymbol::Dial(DialPadValue::Digit(digit))) => {
                    return self.emit(DialPadValue::Digit(digit));
                }
                (0, PadSymbol::Direction(_)) => return ControlOutcome::Ignored,
                (_, PadSymbol::Direction(Direction::Apply)) => level -= 1,
                (_, PadSymbol::Direction(replayed)) => return self.move_level(level - 1, replayed),
                (_, PadSymbol::Dial(_)) => return ControlOutcome::Ignored,
            }
        }
    }

    fn move_level(&mut self, target: usize, direction: Direction) -> ControlOutcome {
        let Some(pad) = self.levels.get_mut(target) else {
            return ControlOutcome::Ignored;
        };
        if pad.move_cursor(direction) {
            ControlOutcome::Moved {
                level: target,
                direction,
                to: pad.coords().current,
            }
        } else {
            debug!(level = target, ?direction, "control: move blocked");
            ControlOutcome::Blocked {
                level: target,
                direction,
            }
        }
    }

    fn emit(&mut self, value: DialPadValue) -> ControlOutcome {
        let (DialPadValue::Digit(digit), Some(ch)) = (value, value.code_char()) else {
            return ControlOutcome::Ignored;
        };
        self.output_code.push(ch);
        ControlOutcome::Emitted { digit }
    }

    /// Takes over `next`, keeping existing pads whose symbol is unchanged so
    /// their transition bookkeeping survives. Returns how many were kept.
    pub fn adopt(&mut self, next: PadStack) -> usize {
        let mut reused = 0;
        let levels = next
            .levels
            .into_iter()
            .enumerate()
            .map(|(index, incoming)| match self.levels.get(index) {
                Some(existing)
                    if existing.kind() == incoming.kind()
                        && existing.current_symbol() == incoming.current_symbol() =>
                {
                    reused += 1;
                    existing.clone()
                }
                _ => incoming,
            })
            .collect();
        self.levels = levels;
        self.output_code = next.output_code;
        reused
    }

    pub fn snapshot(&self, encoding: Option<String>) -> StackSnapshot {
        StackSnapshot {
            levels: self
                .levels
                .iter()
                .enumerate()
                .map(|(level, pad)| LevelSnapshot {
                    level,
                    kind: pad.kind(),
                    symbol: pad.current_symbol().and_then(PadSymbol::code_char),
                    coords: pad.coords(),
                })
                .collect(),
            output_code: self.output_code.clone(),
            encoding,
        }
    }
}

#[cfg(test)]
#[path = "tests/stack_tests.rs"]
mod tests;
