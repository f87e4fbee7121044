//! Typed Collections Feature
//!
//! Wrappers that carry a declared element type, so an empty collection
//! still resolves to a capturable type. The enforcing variants also check
//! every addition against that type.

pub mod enforcing_list;
pub mod enforcing_set;
pub mod typed;
pub mod typed_view;

pub use enforcing_list::{enforcing_typed_view, EnforcingTypedList};
pub use enforcing_set::{enforcing_typed_set, EnforcingTypedSet};
pub use typed::{check_type, check_types_of, Typed};
pub use typed_view::{typed_view, TypedView};
