//! Capture context - staging slot between "begin" and "claim"
//!
//! The context is an ordinary value owned by the caller, so staging never
//! leaks across threads or unrelated call sites. Its state is observable:
//! nothing staged, a chain being recorded, or the last chain claimed.

use crate::config::{OverwritePolicy, QueryConfig};
use crate::errors::{CaptureError, CaptureResult};
use crate::features::capture::{Recorder, StandIn};
use crate::features::expression::ExpressionChain;
use crate::shared::models::{Describe, TypeHandle};
use tracing::{debug, warn};

/// Observable state of a `CaptureContext`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// Nothing has been staged yet
    Idle,
    /// A chain is being recorded and has not been claimed
    Recording { root: TypeHandle, steps: usize },
    /// The last staged chain was claimed
    Claimed,
}

enum Slot {
    Idle,
    Recording(Recorder),
    Claimed,
}

/// Holds at most one unclaimed recording
pub struct CaptureContext {
    slot: Slot,
    overwrite: OverwritePolicy,
    max_chain_steps: usize,
}

impl CaptureContext {
    pub fn new() -> Self {
        Self::with_config(&QueryConfig::default())
    }

    pub fn with_config(config: &QueryConfig) -> Self {
        Self {
            slot: Slot::Idle,
            overwrite: config.overwrite_policy,
            max_chain_steps: config.max_chain_steps,
        }
    }

    /// Stage a fresh recording for `root` and return its stand-in
    pub fn begin(&mut self, root: TypeHandle) -> CaptureResult<StandIn> {
        if let Slot::Recording(previous) = &self.slot {
            match self.overwrite {
                OverwritePolicy::Reject => {
                    return Err(CaptureError::AlreadyStaged {
                        root: previous.root().name().to_string(),
                    })
                }
                OverwritePolicy::Replace => {
                    warn!("discarding unclaimed expression {}", previous.finish());
                }
            }
        }

        let recorder = Recorder::new(root, self.max_chain_steps)?;
        let stand_in = recorder.stand_in();
        self.slot = Slot::Recording(recorder);
        Ok(stand_in)
    }

    /// `begin` for a statically known type
    pub fn begin_for<T: Describe>(&mut self) -> CaptureResult<StandIn> {
        self.begin(T::type_handle())
    }

    /// Take the staged chain, leaving the context `Claimed`
    ///
    /// Returns `None` when nothing is staged, including a second claim.
    pub fn claim(&mut self) -> Option<ExpressionChain> {
        match std::mem::replace(&mut self.slot, Slot::Claimed) {
            Slot::Recording(recorder) => {
                let chain = recorder.finish();
                debug!("claimed expression {}", chain);
                Some(chain)
            }
            Slot::Idle => {
                self.slot = Slot::Idle;
                None
            }
            Slot::Claimed => None,
        }
    }

    /// `claim`, with the identity chain standing in for "nothing staged"
    pub fn claim_or_identity(&mut self) -> ExpressionChain {
        self.claim().unwrap_or_default()
    }

    pub fn state(&self) -> ContextState {
        match &self.slot {
            Slot::Idle => ContextState::Idle,
            Slot::Recording(recorder) => ContextState::Recording {
                root: recorder.root(),
                steps: recorder.len(),
            },
            Slot::Claimed => ContextState::Claimed,
        }
    }

    /// True while an unclaimed chain is staged
    pub fn is_staged(&self) -> bool {
        matches!(self.slot, Slot::Recording(_))
    }
}

impl Default for CaptureContext {
    fn default() -> Self {
        Self::new()
    }
}
