//! The `Recordable` trait: dynamic member dispatch for element types

use super::type_descriptor::TypeHandle;
use super::value::Value;
use crate::errors::InvokeError;
use std::fmt::Debug;
use std::sync::Arc;

/// A value whose members can be recorded on a stand-in and later replayed
///
/// Usually implemented through `recordable!`, which wires `invoke` to the
/// type's inherent accessor methods.
pub trait Recordable: Debug + Send + Sync + 'static {
    /// Runtime type of this value
    fn descriptor(&self) -> TypeHandle;

    /// Invoke `member` with already-converted arguments
    fn invoke(&self, member: &str, args: &[Value]) -> Result<Value, InvokeError>;

    /// This value as a `Value::Record`
    fn to_value(&self) -> Value;
}

impl Recordable for Arc<dyn Recordable> {
    fn descriptor(&self) -> TypeHandle {
        (**self).descriptor()
    }

    fn invoke(&self, member: &str, args: &[Value]) -> Result<Value, InvokeError> {
        (**self).invoke(member, args)
    }

    fn to_value(&self) -> Value {
        Value::Record(Arc::clone(self))
    }
}

#[doc(hidden)]
pub fn check_arity(
    ty: TypeHandle,
    member: &str,
    expected: usize,
    found: usize,
) -> Result<(), InvokeError> {
    if expected == found {
        Ok(())
    } else {
        Err(InvokeError::Arity {
            type_name: ty.name().to_string(),
            member: member.to_string(),
            expected,
            found,
        })
    }
}

/// Conversion of a member's return value into a replay result
///
/// Members may return any `Value`-convertible type, an `Option` of one
/// (`None` replays as `Null`) or a `Result<_, InvokeError>`.
pub trait IntoMemberResult {
    fn into_member_result(self) -> Result<Value, InvokeError>;
}

macro_rules! into_member_result {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoMemberResult for $ty {
                fn into_member_result(self) -> Result<Value, InvokeError> {
                    Ok(Value::from(self))
                }
            }
        )*
    };
}

into_member_result! {
    Value,
    String,
    &'static str,
    i64,
    i32,
    u32,
    f64,
    bool,
    Vec<Value>,
    Vec<u8>,
    Arc<dyn Recordable>,
}

impl<T: Into<Value>> IntoMemberResult for Option<T> {
    fn into_member_result(self) -> Result<Value, InvokeError> {
        Ok(Value::from(self))
    }
}

impl<T: Into<Value>> IntoMemberResult for Result<T, InvokeError> {
    fn into_member_result(self) -> Result<Value, InvokeError> {
        self.map(Into::into)
    }
}
