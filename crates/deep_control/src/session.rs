use anyhow::{Context, Result};
use shared::{
    domain::{AnimatedCoords, Direction},
    error::CodecError,
    protocol::{ControlOutcome, StackSnapshot},
};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};

use crate::{codec, stack::PadStack, store::StateStore};

/// A live pad stack plus the channels renderers watch.
///
/// Every subscriber sees the latest value immediately and then one update per
/// fully resolved press.
#[derive(Debug)]
pub struct DeepControl {
    stack: PadStack,
    positions: watch::Sender<Vec<AnimatedCoords>>,
    output_code: watch::Sender<String>,
}

impl Default for DeepControl {
    fn default() -> Self {
        Self::with_stack(PadStack::default())
    }
}

impl DeepControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stack(stack: PadStack) -> Self {
        let (positions, _) = watch::channel(stack.positions());
        let (output_code, _) = watch::channel(stack.output_code().to_string());
        Self {
            stack,
            positions,
            output_code,
        }
    }

    /// Starts from a persisted encoding, or from scratch when there is none or
    /// it cannot be parsed.
    pub fn from_encoding(encoding: Option<&str>) -> Self {
        let Some(encoding) = encoding else {
            return Self::default();
        };
        match codec::decode(encoding) {
            Ok(stack) => Self::with_stack(stack),
            Err(err) => {
                warn!(%encoding, error = %err, "discarding malformed pad stack encoding");
                Self::default()
            }
        }
    }

    pub async fn restore(store: &dyn StateStore, session: &str) -> Result<Self> {
        let encoding = store
            .load_encoding(session)
            .await
            .with_context(|| format!("failed to load pad stack for session '{session}'"))?;
        info!(session, found = encoding.is_some(), "restoring pad stack");
        Ok(Self::from_encoding(encoding.as_deref()))
    }

    pub async fn persist(&self, store: &dyn StateStore, session: &str) -> Result<String> {
        let encoding = self.encoding()?;
        store
            .save_encoding(session, &encoding)
            .await
            .with_context(|| format!("failed to save pad stack for session '{session}'"))?;
        debug!(session, %encoding, "persisted pad stack");
        Ok(encoding)
    }

    pub fn stack(&self) -> &PadStack {
        &self.stack
    }

    pub fn encoding(&self) -> Result<String, CodecError> {
        codec::encode(&self.stack)
    }

    pub fn snapshot(&self) -> StackSnapshot {
        self.stack.snapshot(self.encoding().ok())
    }

    /// Press `direction` on pad `level`.
    pub fn control(&mut self, level: usize, direction: Direction) -> ControlOutcome {
        let outcome = self.stack.control(level, direction);
        debug!(level, ?direction, ?outcome, "control");
        match outcome {
            ControlOutcome::Moved { .. } => self.publish_positions(),
            ControlOutcome::Emitted { .. } => self.publish_output_code(),
            ControlOutcome::Blocked { .. } | ControlOutcome::Ignored => {}
        }
        outcome
    }

    /// Press `direction` on the user-facing pad.
    pub fn press(&mut self, direction: Direction) -> ControlOutcome {
        self.control(self.stack.outermost(), direction)
    }

    /// Replaces the stack with a decoded one. A malformed encoding leaves the
    /// current stack and subscribers untouched.
    pub fn apply_encoding(&mut self, encoding: &str) -> Result<(), CodecError> {
        let next = codec::decode(encoding)?;
        let reused = self.stack.adopt(next);
        debug!(%encoding, reused, levels = self.stack.len(), "adopted pad stack");
        self.publish_positions();
        self.publish_output_code();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.stack.adopt(PadStack::default());
        self.publish_positions();
        self.publish_output_code();
    }

    pub fn subscribe_positions(&self) -> watch::Receiver<Vec<AnimatedCoords>> {
        self.positions.subscribe()
    }

    pub fn subscribe_output_code(&self) -> watch::Receiver<String> {
        self.output_code.subscribe()
    }

    pub fn positions_stream(&self) -> WatchStream<Vec<AnimatedCoords>> {
        WatchStream::new(self.subscribe_positions())
    }

    pub fn output_code_stream(&self) -> WatchStream<String> {
        WatchStream::new(self.subscribe_output_code())
    }

    fn publish_positions(&self) {
        let positions = self.stack.positions();
        self.positions.send_if_modified(|current| {
            if *current == positions {
                return false;
            }
            *current = positions;
            true
        });
    }

    fn publish_output_code(&self) {
        let code = self.stack.output_code();
        self.output_code.send_if_modified(|current| {
            if current == code {
                return false;
            }
            *current = code.to_string();
            true
        });
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
