//! Expression chains and replay
//!
//! An `ExpressionChain` is the frozen output of a recording session. Replay
//! walks the steps in order, dispatching each member on the runtime type of
//! the current value, so a chain recorded on `Person` replays on any type
//! that answers to the same members.

use crate::config::MAX_CHAIN_STEPS_LIMIT;
use crate::errors::{CaptureResult, InvokeError, ReplayError, ReplayResult};
use crate::features::capture::{InvocationStep, Recorder, StandIn};
use crate::shared::models::{Describe, Recordable, TypeHandle, Value};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Ordered, immutable list of recorded invocation steps
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionChain {
    root: Option<TypeHandle>,
    steps: Arc<[InvocationStep]>,
}

impl ExpressionChain {
    /// Zero-step chain: replay returns the root itself
    pub fn identity() -> Self {
        Self {
            root: None,
            steps: Arc::from(Vec::new()),
        }
    }

    /// Zero-step chain that remembers its root type
    pub fn identity_of(root: TypeHandle) -> Self {
        Self {
            root: Some(root),
            steps: Arc::from(Vec::new()),
        }
    }

    pub(crate) fn from_steps(root: TypeHandle, steps: Vec<InvocationStep>) -> Self {
        Self {
            root: Some(root),
            steps: Arc::from(steps),
        }
    }

    /// Record a chain by running `script` against a stand-in for `root`
    ///
    /// ```ignore
    /// let town = ExpressionChain::record(Person::type_handle(), |each| {
    ///     each.get("address")?.get("town")
    /// })?;
    /// ```
    pub fn record<F, R>(root: TypeHandle, script: F) -> CaptureResult<Self>
    where
        F: FnOnce(StandIn) -> CaptureResult<R>,
    {
        Self::record_with_limit(root, MAX_CHAIN_STEPS_LIMIT, script)
    }

    /// `record` for a statically known type
    pub fn record_for<T, F, R>(script: F) -> CaptureResult<Self>
    where
        T: Describe,
        F: FnOnce(StandIn) -> CaptureResult<R>,
    {
        Self::record(T::type_handle(), script)
    }

    /// `record` with an explicit step limit
    pub fn record_with_limit<F, R>(root: TypeHandle, max_steps: usize, script: F) -> CaptureResult<Self>
    where
        F: FnOnce(StandIn) -> CaptureResult<R>,
    {
        let recorder = Recorder::new(root, max_steps)?;
        script(recorder.stand_in())?;
        Ok(recorder.finish())
    }

    /// Chain of zero-argument members, e.g. `["address", "town"]`
    pub fn path(root: TypeHandle, members: &[&str]) -> CaptureResult<Self> {
        Self::record(root, |each| {
            let mut current = crate::features::capture::Captured::StandIn(each);
            for member in members {
                current = current.get(member)?;
            }
            Ok(current)
        })
    }

    pub fn steps(&self) -> &[InvocationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// True for the zero-step chain
    pub fn is_identity(&self) -> bool {
        self.steps.is_empty()
    }

    /// Type the chain was recorded on, if known
    pub fn root_type(&self) -> Option<TypeHandle> {
        self.root
    }

    /// Replay every step against `root`
    pub fn replay<R: Recordable + ?Sized>(&self, root: &R) -> ReplayResult<Value> {
        let Some(first) = self.steps.first() else {
            return Ok(root.to_value());
        };

        trace!("replaying {} on {}", self, root.descriptor());
        let mut current = root
            .invoke(first.member, &first.args)
            .map_err(|source| failure(0, first, root.descriptor().name(), source))?;

        for (index, step) in self.steps.iter().enumerate().skip(1) {
            current = apply_step(index, step, &current)?;
        }
        Ok(current)
    }

    /// Replay every step starting from an arbitrary value
    pub fn replay_value(&self, root: &Value) -> ReplayResult<Value> {
        let mut current = root.clone();
        for (index, step) in self.steps.iter().enumerate() {
            current = apply_step(index, step, &current)?;
        }
        Ok(current)
    }
}

impl Default for ExpressionChain {
    fn default() -> Self {
        Self::identity()
    }
}

fn apply_step(index: usize, step: &InvocationStep, current: &Value) -> ReplayResult<Value> {
    trace!("step {}: {} on {}", index, step, current.type_name());
    let result = match current {
        Value::Record(record) => record.invoke(step.member, &step.args),
        Value::Null => Err(InvokeError::NullTarget {
            member: step.member.to_string(),
        }),
        other => Err(InvokeError::NotARecord {
            member: step.member.to_string(),
            found: other.type_name().to_string(),
        }),
    };
    result.map_err(|source| failure(index, step, current.type_name(), source))
}

fn failure(index: usize, step: &InvocationStep, on_type: &str, source: InvokeError) -> ReplayError {
    ReplayError {
        step: index,
        member: step.member.to_string(),
        args: step.args.clone(),
        on_type: on_type.to_string(),
        source,
    }
}

impl fmt::Display for ExpressionChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => write!(f, "{}", root)?,
            None => f.write_str("_")?,
        }
        for step in self.steps.iter() {
            write!(f, ".{}", step)?;
        }
        Ok(())
    }
}
