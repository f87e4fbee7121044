//! One recorded member invocation

use crate::shared::models::{TypeHandle, Value};
use std::fmt;

/// `(member, arguments)` plus the type the member was resolved on while
/// recording
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationStep {
    pub member: &'static str,
    pub args: Vec<Value>,
    pub declared_on: TypeHandle,
}

impl InvocationStep {
    pub fn new(member: &'static str, args: Vec<Value>, declared_on: TypeHandle) -> Self {
        Self {
            member,
            args,
            declared_on,
        }
    }
}

impl fmt::Display for InvocationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.member)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match arg {
                Value::String(s) => write!(f, "{:?}", s)?,
                other => write!(f, "{}", other)?,
            }
        }
        f.write_str(")")
    }
}
