//! What a stand-in hands back from a recorded invocation

use crate::errors::{CaptureError, CaptureResult};
use crate::features::capture::infrastructure::{Recorder, StandIn};
use crate::features::expression::ExpressionChain;
use crate::shared::models::Value;
use std::fmt;

/// Result of invoking a member on a stand-in
///
/// Members returning another capturable type give a nested stand-in that
/// records into the same chain. Members returning a final, sealed or
/// primitive type give a placeholder, which only ends the chain.
#[derive(Debug, Clone)]
pub enum Captured {
    StandIn(StandIn),
    Placeholder(Placeholder),
}

impl Captured {
    /// Record a zero-argument member on the returned value
    pub fn get(&self, member: &str) -> CaptureResult<Captured> {
        self.invoke(member, Vec::new())
    }

    /// Record `member(args)` on the returned value
    pub fn invoke(&self, member: &str, args: Vec<Value>) -> CaptureResult<Captured> {
        match self {
            Captured::StandIn(stand_in) => stand_in.invoke(member, args),
            Captured::Placeholder(placeholder) => Err(CaptureError::ChainPastFinal {
                member: member.to_string(),
                after: placeholder.after.to_string(),
                final_type: placeholder.final_type.to_string(),
            }),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Captured::Placeholder(_))
    }

    pub fn as_stand_in(&self) -> Option<&StandIn> {
        match self {
            Captured::StandIn(stand_in) => Some(stand_in),
            Captured::Placeholder(_) => None,
        }
    }

    /// Snapshot of the chain recorded so far
    pub fn finish(&self) -> ExpressionChain {
        self.recorder().finish()
    }

    fn recorder(&self) -> &Recorder {
        match self {
            Captured::StandIn(stand_in) => stand_in.recorder(),
            Captured::Placeholder(placeholder) => &placeholder.recorder,
        }
    }
}

/// Sentinel for a member whose return type cannot be stood in for
#[derive(Clone)]
pub struct Placeholder {
    pub(crate) recorder: Recorder,
    pub(crate) after: &'static str,
    pub(crate) final_type: &'static str,
}

impl Placeholder {
    /// Member that produced this placeholder
    pub fn after(&self) -> &'static str {
        self.after
    }

    /// Declared return type of that member
    pub fn final_type(&self) -> &'static str {
        self.final_type
    }
}

impl fmt::Debug for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Placeholder({} after {}())", self.final_type, self.after)
    }
}
