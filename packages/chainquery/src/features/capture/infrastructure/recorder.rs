//! Invocation recorder
//!
//! A `Recorder` owns the in-progress chain. Every `StandIn` created from it
//! (the root stand-in and every nested one) appends to the same step list,
//! so `person.get("address")?.get("town")` records two steps in call order.
//! A stand-in remembers the position it was handed out at and may only
//! extend the chain from there; invoking an earlier one again fails with
//! `StaleStandIn`.
//!
//! Only the thread that created the recorder records. Invocations from any
//! other thread are validated and answered, but leave the chain untouched.

use crate::errors::{CaptureError, CaptureResult};
use crate::features::capture::domain::{Captured, InvocationStep, Placeholder};
use crate::features::expression::ExpressionChain;
use crate::shared::models::{Describe, ReturnType, TypeHandle, TypeKind, Value};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use tracing::{debug, trace, warn};

struct RecordingState {
    root: TypeHandle,
    steps: Vec<InvocationStep>,
    owner: ThreadId,
    max_steps: usize,
}

/// Shared, append-only recording session
#[derive(Clone)]
pub struct Recorder {
    state: Arc<Mutex<RecordingState>>,
}

impl Recorder {
    /// Start recording for `root`
    ///
    /// Fails with `UnsupportedTarget` when no stand-in can exist for the
    /// type (primitives and sealed types).
    pub fn new(root: TypeHandle, max_steps: usize) -> CaptureResult<Self> {
        match root.kind() {
            TypeKind::Record => {}
            TypeKind::Sealed => {
                return Err(CaptureError::UnsupportedTarget {
                    type_name: root.name().to_string(),
                    reason: "type is sealed and admits no stand-in".to_string(),
                })
            }
            TypeKind::Primitive => {
                return Err(CaptureError::UnsupportedTarget {
                    type_name: root.name().to_string(),
                    reason: "primitive types have no members to record".to_string(),
                })
            }
        }

        debug!("capture started for {}", root);
        Ok(Self {
            state: Arc::new(Mutex::new(RecordingState {
                root,
                steps: Vec::new(),
                owner: thread::current().id(),
                max_steps,
            })),
        })
    }

    /// Start recording for a statically known type
    pub fn for_type<T: Describe>(max_steps: usize) -> CaptureResult<Self> {
        Self::new(T::type_handle(), max_steps)
    }

    pub fn root(&self) -> TypeHandle {
        self.state.lock().root
    }

    /// Stand-in for the root type
    pub fn stand_in(&self) -> StandIn {
        StandIn {
            recorder: self.clone(),
            ty: self.root(),
            position: 0,
        }
    }

    /// Number of steps recorded so far
    pub fn len(&self) -> usize {
        self.state.lock().steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Immutable snapshot of the steps recorded so far
    pub fn finish(&self) -> ExpressionChain {
        let state = self.state.lock();
        ExpressionChain::from_steps(state.root, state.steps.clone())
    }

    /// Append a step at `position`; returns false when the caller is not the
    /// owner thread
    fn record(&self, step: InvocationStep, position: usize) -> CaptureResult<bool> {
        let mut state = self.state.lock();
        if state.owner != thread::current().id() {
            warn!(
                "ignoring {} on {} stand-in: invoked off the recording thread",
                step, step.declared_on
            );
            return Ok(false);
        }
        if position != state.steps.len() {
            return Err(CaptureError::StaleStandIn {
                member: step.member.to_string(),
                position,
                recorded: state.steps.len(),
            });
        }
        if state.steps.len() >= state.max_steps {
            return Err(CaptureError::ChainTooLong {
                limit: state.max_steps,
            });
        }
        trace!("recorded step {}: {}", state.steps.len(), step);
        state.steps.push(step);
        Ok(true)
    }
}

impl fmt::Debug for Recorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Recorder")
            .field("root", &state.root)
            .field("steps", &state.steps.len())
            .finish()
    }
}

/// Observes member invocations in place of a real value of type `ty`
#[derive(Clone)]
pub struct StandIn {
    recorder: Recorder,
    ty: TypeHandle,
    position: usize,
}

impl StandIn {
    /// Type this stand-in stands for
    pub fn type_handle(&self) -> TypeHandle {
        self.ty
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// Number of steps before this stand-in in the chain
    pub fn position(&self) -> usize {
        self.position
    }

    /// Record a zero-argument member
    pub fn get(&self, member: &str) -> CaptureResult<Captured> {
        self.invoke(member, Vec::new())
    }

    /// Record `member(args)`
    ///
    /// The member must be declared on this stand-in's type with a matching
    /// arity, and this stand-in must be the tip of the chain; mistakes
    /// surface here rather than at replay.
    pub fn invoke(&self, member: &str, args: Vec<Value>) -> CaptureResult<Captured> {
        let descriptor = self
            .ty
            .find_member(member)
            .ok_or_else(|| CaptureError::UnknownMember {
                type_name: self.ty.name().to_string(),
                member: member.to_string(),
            })?;

        if descriptor.arity != args.len() {
            return Err(CaptureError::Arity {
                type_name: self.ty.name().to_string(),
                member: member.to_string(),
                expected: descriptor.arity,
                found: args.len(),
            });
        }

        self.recorder
            .record(InvocationStep::new(descriptor.name, args, self.ty), self.position)?;

        let captured = match descriptor.returns {
            ReturnType::Record(handle) if handle().is_capturable() => Captured::StandIn(StandIn {
                recorder: self.recorder.clone(),
                ty: handle(),
                position: self.position + 1,
            }),
            returns => Captured::Placeholder(Placeholder {
                recorder: self.recorder.clone(),
                after: descriptor.name,
                final_type: returns.type_name(),
            }),
        };
        Ok(captured)
    }

    /// Snapshot of the chain recorded so far
    pub fn finish(&self) -> ExpressionChain {
        self.recorder.finish()
    }
}

impl fmt::Debug for StandIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StandIn({} @ {})", self.ty, self.position)
    }
}
