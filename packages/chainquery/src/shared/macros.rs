//! Shared macros for the crate
//!
//! `recordable!` publishes a type's members so a stand-in can record them
//! and a replay can dispatch them.

/// Declare the recordable members of a type
///
/// `->` marks a member whose result ends a chain; `=>` marks a member that
/// returns another recordable type, so recording continues on a nested
/// stand-in. Members must be inherent methods taking `&self` plus owned
/// arguments implementing `FromValue`, returning anything implementing
/// `IntoMemberResult`. The type itself must be `Clone + Debug + Send + Sync`.
///
/// A subtype names its parent together with the field holding the parent
/// value (`impl Employee: Person via person`). Members the subtype does not
/// declare itself are forwarded to that field, so everything the parent
/// answers to replays on the subtype too.
///
/// ```ignore
/// recordable! {
///     impl Person {
///         first_name() -> String;
///         address() => Address;
///         initials(separator: String) -> String;
///     }
/// }
///
/// recordable! {
///     impl Employee: Person via person {
///         employee_id() -> i64;
///     }
/// }
///
/// // Replayable, but no stand-in may be created for it
/// recordable! {
///     sealed impl Badge {
///         number() -> i64;
///     }
/// }
/// ```
#[macro_export]
macro_rules! recordable {
    (@count) => { 0usize };
    (@count $head:tt $($tail:tt)*) => { 1usize + $crate::recordable!(@count $($tail)*) };

    (@returns -> $ret:ty) => {
        $crate::ReturnType::Final(stringify!($ret))
    };
    (@returns => $ret:ty) => {
        $crate::ReturnType::Record(<$ret as $crate::Describe>::type_handle)
    };

    (@describe $ty:ident, $kind:ident, [$($parent:ident via $field:ident)?],
        $( $member:ident ( $($arg:ident : $aty:ty),* ) $arrow:tt $ret:ty ; )*
    ) => {
        impl $crate::Describe for $ty {
            fn type_handle() -> $crate::TypeHandle {
                static DESCRIPTOR: $crate::TypeDescriptor = $crate::TypeDescriptor {
                    name: stringify!($ty),
                    kind: $crate::TypeKind::$kind,
                    parents: &[$(<$parent as $crate::Describe>::type_handle)?],
                    members: &[$(
                        $crate::MemberDescriptor {
                            name: stringify!($member),
                            arity: $crate::recordable!(@count $($arg)*),
                            returns: $crate::recordable!(@returns $arrow $ret),
                        }
                    ),*],
                };
                $crate::TypeHandle::new(&DESCRIPTOR)
            }
        }

        impl $crate::Recordable for $ty {
            fn descriptor(&self) -> $crate::TypeHandle {
                <$ty as $crate::Describe>::type_handle()
            }

            #[allow(unused_mut, unused_variables, unreachable_code)]
            fn invoke(
                &self,
                member: &str,
                args: &[$crate::Value],
            ) -> ::std::result::Result<$crate::Value, $crate::InvokeError> {
                $(
                    if member == stringify!($member) {
                        $crate::shared::models::check_arity(
                            <$ty as $crate::Describe>::type_handle(),
                            member,
                            $crate::recordable!(@count $($arg)*),
                            args.len(),
                        )?;
                        let mut position = 0usize;
                        $(
                            let $arg: $aty =
                                $crate::shared::models::take_arg(member, args, &mut position)?;
                        )*
                        return $crate::IntoMemberResult::into_member_result(
                            self.$member($($arg),*),
                        );
                    }
                )*
                $(
                    let parent: &$parent = &self.$field;
                    return $crate::Recordable::invoke(parent, member, args).map_err(|err| match err {
                        $crate::InvokeError::UnknownMember { member, .. } => {
                            $crate::InvokeError::UnknownMember {
                                type_name: stringify!($ty).to_string(),
                                member,
                            }
                        }
                        other => other,
                    });
                )?
                Err($crate::InvokeError::UnknownMember {
                    type_name: stringify!($ty).to_string(),
                    member: member.to_string(),
                })
            }

            fn to_value(&self) -> $crate::Value {
                $crate::Value::Record(::std::sync::Arc::new(::std::clone::Clone::clone(self)))
            }
        }

        impl ::std::convert::From<$ty> for $crate::Value {
            fn from(value: $ty) -> Self {
                $crate::Value::Record(::std::sync::Arc::new(value))
            }
        }

        impl $crate::IntoMemberResult for $ty {
            fn into_member_result(
                self,
            ) -> ::std::result::Result<$crate::Value, $crate::InvokeError> {
                Ok($crate::Value::Record(::std::sync::Arc::new(self)))
            }
        }
    };

    (sealed impl $ty:ident $(: $parent:ident via $field:ident)? { $($body:tt)* }) => {
        $crate::recordable!(@describe $ty, Sealed, [$($parent via $field)?], $($body)*);
    };
    (impl $ty:ident $(: $parent:ident via $field:ident)? { $($body:tt)* }) => {
        $crate::recordable!(@describe $ty, Record, [$($parent via $field)?], $($body)*);
    };
}
