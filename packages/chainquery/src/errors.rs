//! Error types for chainquery
//!
//! Capture-time failures (`CaptureError`), member dispatch failures
//! (`InvokeError`), replay failures that carry the failing step
//! (`ReplayError`) and the query-level `QueryError` that wraps them.

use crate::config::ConfigError;
use crate::shared::models::Value;
use thiserror::Error;

/// Failure of a single member invocation against a real value
#[derive(Debug, Error)]
pub enum InvokeError {
    /// Member is not declared on the runtime type
    #[error("type '{type_name}' has no member '{member}'")]
    UnknownMember { type_name: String, member: String },

    /// Wrong number of arguments
    #[error("member '{member}' of '{type_name}' takes {expected} argument(s), {found} given")]
    Arity {
        type_name: String,
        member: String,
        expected: usize,
        found: usize,
    },

    /// Recorded argument cannot be converted to the parameter type
    #[error("argument {position} of '{member}' must be {expected}, found {found}")]
    Argument {
        member: String,
        position: usize,
        expected: &'static str,
        found: String,
    },

    /// A previous step produced null
    #[error("cannot invoke '{member}' on a null value")]
    NullTarget { member: String },

    /// A previous step produced a scalar, which has no members
    #[error("cannot invoke '{member}' on a {found} value")]
    NotARecord { member: String, found: String },

    /// The member itself reported an error
    #[error("member '{member}' failed: {source}")]
    Failed {
        member: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl InvokeError {
    /// Wrap an error raised by a member implementation
    pub fn failed(
        member: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        InvokeError::Failed {
            member: member.into(),
            source: source.into(),
        }
    }
}

/// Failure while recording an expression on a stand-in
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// No stand-in can be synthesized for the type
    #[error("cannot capture '{type_name}': {reason}")]
    UnsupportedTarget { type_name: String, reason: String },

    /// Member is not declared on the stand-in's type
    #[error("type '{type_name}' has no member '{member}'")]
    UnknownMember { type_name: String, member: String },

    /// Wrong number of arguments recorded
    #[error("member '{member}' of '{type_name}' takes {expected} argument(s), {found} given")]
    Arity {
        type_name: String,
        member: String,
        expected: usize,
        found: usize,
    },

    /// Chaining continued on the placeholder returned by a final-typed member
    #[error("cannot invoke '{member}' after '{after}', which returns final type {final_type}")]
    ChainPastFinal {
        member: String,
        after: String,
        final_type: String,
    },

    /// Recorder step limit reached
    #[error("expression chain exceeds {limit} steps")]
    ChainTooLong { limit: usize },

    /// Invocation on a stand-in that is no longer the tip of its chain
    #[error("cannot record '{member}' at step {position}: the chain already holds {recorded} steps, continue from the latest stand-in")]
    StaleStandIn {
        member: String,
        position: usize,
        recorded: usize,
    },

    /// Capture context already holds an unclaimed expression
    #[error("an unclaimed expression rooted at '{root}' is already staged")]
    AlreadyStaged { root: String },
}

/// Replay of one recorded step failed
#[derive(Debug, Error)]
#[error("step {step} {member}({}) on {on_type} failed: {source}", render_args(.args))]
pub struct ReplayError {
    /// Zero-based position of the step in the chain
    pub step: usize,
    pub member: String,
    pub args: Vec<Value>,
    /// Runtime type name of the value the step was applied to
    pub on_type: String,
    #[source]
    pub source: InvokeError,
}

fn render_args(args: &[Value]) -> String {
    args.iter()
        .map(|a| format!("{:?}", a))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Value rejected by an enforcing collection wrapper
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("value of type '{found}' is not assignable to '{expected}'")]
pub struct TypeMismatch {
    pub expected: String,
    pub found: String,
}

/// Main error type for query operations
#[derive(Debug, Error)]
pub enum QueryError {
    /// Stand-in requested for a type that cannot be stood in for
    #[error("unsupported capture target '{type_name}': {reason}")]
    UnsupportedCaptureTarget { type_name: String, reason: String },

    /// Element type of a source cannot be determined
    #[error("ambiguous element type: {0}")]
    AmbiguousElementType(String),

    /// Replaying the expression against an element failed
    #[error("replay failed on element {index}: {source}")]
    ReplayFailure {
        index: usize,
        #[source]
        source: ReplayError,
    },

    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),

    /// Any other capture-time error
    #[error("capture error: {0}")]
    Capture(CaptureError),

    /// Capture context was empty and the engine rejects identity claims
    #[error("no expression staged in the capture context")]
    NoStagedExpression,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<CaptureError> for QueryError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::UnsupportedTarget { type_name, reason } => {
                QueryError::UnsupportedCaptureTarget { type_name, reason }
            }
            other => QueryError::Capture(other),
        }
    }
}

/// Result type alias for query operations
pub type Result<T> = std::result::Result<T, QueryError>;

/// Result type alias for capture operations
pub type CaptureResult<T> = std::result::Result<T, CaptureError>;

/// Result type alias for replay
pub type ReplayResult<T> = std::result::Result<T, ReplayError>;
