//! Static type metadata
//!
//! Stand-ins cannot reflect over a type at runtime, so every recordable
//! type publishes a `TypeDescriptor`: its name, what kind of stand-in it
//! admits, its parent types and the members it exposes.

use std::fmt;
use std::hash::{Hash, Hasher};

/// What the recorder may synthesize for a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Has members; a stand-in can be created for it
    Record,
    /// Has members but no stand-in may be created (the "final class" case)
    Sealed,
    /// Scalar (integers, floats, strings, booleans)
    Primitive,
}

/// Declared return type of a member
#[derive(Debug, Clone, Copy)]
pub enum ReturnType {
    /// Chaining stops here; carries the type name for diagnostics
    Final(&'static str),
    /// Another recordable type; recording continues on a nested stand-in
    Record(fn() -> TypeHandle),
}

impl ReturnType {
    pub fn type_name(&self) -> &'static str {
        match self {
            ReturnType::Final(name) => name,
            ReturnType::Record(handle) => handle().name(),
        }
    }
}

/// One invocable member
#[derive(Debug)]
pub struct MemberDescriptor {
    pub name: &'static str,
    pub arity: usize,
    pub returns: ReturnType,
}

/// Everything the recorder and replayer know about a type
#[derive(Debug)]
pub struct TypeDescriptor {
    pub name: &'static str,
    pub kind: TypeKind,
    pub parents: &'static [fn() -> TypeHandle],
    pub members: &'static [MemberDescriptor],
}

/// Cheap copyable reference to a `TypeDescriptor`
///
/// Identity is the descriptor's address: every type owns exactly one
/// static descriptor.
#[derive(Clone, Copy)]
pub struct TypeHandle(&'static TypeDescriptor);

impl TypeHandle {
    pub const fn new(descriptor: &'static TypeDescriptor) -> Self {
        TypeHandle(descriptor)
    }

    pub fn name(&self) -> &'static str {
        self.0.name
    }

    pub fn kind(&self) -> TypeKind {
        self.0.kind
    }

    pub fn descriptor(&self) -> &'static TypeDescriptor {
        self.0
    }

    /// Direct parents
    pub fn parents(&self) -> impl Iterator<Item = TypeHandle> {
        self.0.parents.iter().map(|parent| parent())
    }

    /// Whether a stand-in can be synthesized for this type
    pub fn is_capturable(&self) -> bool {
        self.0.kind == TypeKind::Record
    }

    /// True when `other` is this type or (transitively) one of its subtypes
    pub fn is_assignable_from(&self, other: TypeHandle) -> bool {
        if *self == other {
            return true;
        }
        other.parents().any(|parent| self.is_assignable_from(parent))
    }

    /// Look a member up on this type, then on its parents
    ///
    /// A type's own declaration shadows a parent's. Every parent member must
    /// be answered by the runtime type's `invoke`; `recordable!` does that by
    /// forwarding to the field named after `via`.
    pub fn find_member(&self, name: &str) -> Option<&'static MemberDescriptor> {
        self.0
            .members
            .iter()
            .find(|m| m.name == name)
            .or_else(|| self.parents().find_map(|parent| parent.find_member(name)))
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.0 as *const TypeDescriptor).hash(state);
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHandle({})", self.0.name)
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name)
    }
}

/// Types with a static descriptor
///
/// Implemented by `recordable!` for element types and here for the
/// scalar types members commonly return.
pub trait Describe {
    fn type_handle() -> TypeHandle;
}

macro_rules! primitive_descriptor {
    ($($ty:ty => $name:expr),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn type_handle() -> TypeHandle {
                    static DESCRIPTOR: TypeDescriptor = TypeDescriptor {
                        name: $name,
                        kind: TypeKind::Primitive,
                        parents: &[],
                        members: &[],
                    };
                    TypeHandle::new(&DESCRIPTOR)
                }
            }
        )*
    };
}

primitive_descriptor! {
    i64 => "i64",
    i32 => "i32",
    f64 => "f64",
    bool => "bool",
    String => "String",
}
