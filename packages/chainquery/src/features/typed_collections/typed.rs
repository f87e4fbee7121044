//! Typed capability and runtime type checks

use crate::errors::TypeMismatch;
use crate::shared::models::{Recordable, TypeHandle};

/// Collection that declares its element type
pub trait Typed {
    fn element_type(&self) -> TypeHandle;
}

/// Fail unless `value`'s runtime type is assignable to `expected`
pub fn check_type<T: Recordable + ?Sized>(expected: TypeHandle, value: &T) -> Result<(), TypeMismatch> {
    let found = value.descriptor();
    if expected.is_assignable_from(found) {
        Ok(())
    } else {
        Err(TypeMismatch {
            expected: expected.name().to_string(),
            found: found.name().to_string(),
        })
    }
}

/// `check_type` for every value; stops at the first mismatch
pub fn check_types_of<'a, T, I>(expected: TypeHandle, values: I) -> Result<(), TypeMismatch>
where
    T: Recordable + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    values
        .into_iter()
        .try_for_each(|value| check_type(expected, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Describe;
    use crate::test_fixtures::{Address, Employee, Person};
    use std::sync::Arc;

    #[test]
    fn test_check_type_accepts_subtypes() {
        let employee = Employee {
            person: Person::new("Ann", "Lee"),
            employee_id: 3,
        };
        assert!(check_type(Person::type_handle(), &employee).is_ok());
        assert!(check_type(Employee::type_handle(), &Person::new("Bo", "Ng")).is_err());
    }

    #[test]
    fn test_check_types_of_reports_first_mismatch() {
        let values: Vec<Arc<dyn Recordable>> = vec![
            Arc::new(Person::new("Bo", "Ng")),
            Arc::new(Address::new("1 High St", "Leeds", "LS1")),
        ];
        let err = check_types_of(Person::type_handle(), &values).unwrap_err();
        assert_eq!(err.found, "Address");
        assert_eq!(err.expected, "Person");
    }
}
