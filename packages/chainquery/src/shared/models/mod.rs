//! Shared models

pub mod recordable;
mod type_descriptor;
pub mod value;

pub use recordable::{check_arity, IntoMemberResult, Recordable};
pub use type_descriptor::{
    Describe, MemberDescriptor, ReturnType, TypeDescriptor, TypeHandle, TypeKind,
};
pub use value::{take_arg, FromValue, Value};
