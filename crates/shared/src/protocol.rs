use serde::{Deserialize, Serialize};

use crate::domain::{AnimatedCoords, Coords, Direction, PadKind};

/// What a single `control` call did to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ControlOutcome {
    Moved {
        level: usize,
        direction: Direction,
        to: Coords,
    },
    /// The move would have left the grid or landed on a gap.
    Blocked {
        level: usize,
        direction: Direction,
    },
    Emitted {
        digit: u8,
    },
    Ignored,
}

impl ControlOutcome {
    pub fn changed_state(&self) -> bool {
        matches!(
            self,
            ControlOutcome::Moved { .. } | ControlOutcome::Emitted { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub level: usize,
    pub kind: PadKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<char>,
    pub coords: AnimatedCoords,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackSnapshot {
    pub levels: Vec<LevelSnapshot>,
    pub output_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}
