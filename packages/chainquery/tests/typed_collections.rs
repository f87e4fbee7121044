//! Typed views, enforcing wrappers and type resolution through them

mod common;

use chainquery::{
    enforcing_typed_set, enforcing_typed_view, from, recordable, select, typed_view, Describe,
    EnforcingTypedList, EnforcingTypedSet, ExpressionChain, Match, QueryEngine, QueryError,
    Recordable, ResolutionStrategy, Source, TypeHandle, Typed, Value,
};
use common::{employee, people, Address, Employee, Person};
use std::any::Any;
use std::collections::HashSet;
use std::sync::Arc;

fn person_list() -> Vec<Arc<dyn Recordable>> {
    people()
        .into_iter()
        .map(|p| Arc::new(p) as Arc<dyn Recordable>)
        .collect()
}

#[test]
fn test_empty_typed_view_resolves_and_yields_nothing() {
    let empty = typed_view(Vec::<Person>::new(), Person::type_handle());
    let query = from(&empty).unwrap();
    assert_eq!(query.resolution().strategy, ResolutionStrategy::Declared);
    let names = query.path(&["first_name"]).unwrap().collect().unwrap();
    assert!(names.is_empty());
}

#[test]
fn test_declared_type_wins_over_first_element() {
    let mixed = typed_view(
        vec![
            Arc::new(employee("Eve", "Smith", 3)) as Arc<dyn Recordable>,
            Arc::new(Person::new("Bo", "Ng", 22)),
        ],
        Person::type_handle(),
    );
    let query = from(&mixed).unwrap();
    assert_eq!(query.element_type(), Person::type_handle());
}

#[test]
fn test_enforcing_list_rejects_and_keeps_delegate_in_sync() {
    let mut backing = person_list();
    {
        let mut list: EnforcingTypedList<Arc<dyn Recordable>, _> =
            enforcing_typed_view(&mut backing, Person::type_handle());

        let err = list
            .push(Arc::new(Address::new("1 High St", "Leeds", "West Yorkshire")))
            .unwrap_err();
        assert_eq!(err.expected, "Person");
        assert_eq!(err.found, "Address");

        list.push(Arc::new(employee("Eve", "Smith", 3))).unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(list.element_type(), Person::type_handle());
    }
    assert_eq!(backing.len(), 4);
    assert_eq!(backing[3].descriptor(), Employee::type_handle());
}

#[derive(Debug, Clone)]
struct Manager {
    person: Person,
    level: i64,
}

impl Manager {
    fn level(&self) -> i64 {
        self.level
    }
}

recordable! {
    impl Manager: Person via person {
        level() -> i64;
    }
}

#[test]
fn test_subtype_in_enforcing_list_answers_parent_members() {
    let mut list: EnforcingTypedList<Arc<dyn Recordable>> =
        enforcing_typed_view(person_list(), Person::type_handle());
    list.push(Arc::new(Manager {
        person: Person::new("Ann", "Lee", 45),
        level: 2,
    }))
    .unwrap();

    let names = from(&list).unwrap().path(&["first_name"]).unwrap().collect().unwrap();
    assert_eq!(
        names,
        vec![
            Value::from("Billy"),
            Value::from("Billy"),
            Value::from("James"),
            Value::from("Ann"),
        ]
    );

    // recording on the subtype reaches parent members too
    let each = QueryEngine::new().capture_for::<Manager>().unwrap();
    each.get("address").unwrap().get("town").unwrap();
    assert_eq!(each.finish().to_string(), "Manager.address().town()");
}

#[test]
fn test_mismatch_converts_to_query_error() {
    let mut list: EnforcingTypedList<Arc<dyn Recordable>> =
        enforcing_typed_view(person_list(), Employee::type_handle());
    let result: Result<(), QueryError> = list
        .push(Arc::new(Person::new("Bo", "Ng", 22)))
        .map_err(QueryError::from);
    assert!(matches!(result, Err(QueryError::TypeMismatch(_))));
}

#[test]
fn test_queries_run_over_enforcing_list() {
    let list: EnforcingTypedList<Arc<dyn Recordable>> =
        enforcing_typed_view(person_list(), Person::type_handle());
    let last_name = ExpressionChain::path(Person::type_handle(), &["last_name"]).unwrap();
    let smiths = select(&list, &last_name, Match::eq("Smith")).unwrap();
    assert_eq!(smiths.len(), 2);

    let sub = list.sub_list(1..3);
    assert_eq!(Source::len(&sub), 2);
    assert_eq!(select(&sub, &last_name, Match::eq("Smith")).unwrap().len(), 1);
}

#[test]
fn test_staged_removal_through_enforcing_list() {
    let mut list: EnforcingTypedList<Person> =
        enforcing_typed_view(people(), Person::type_handle());
    let removed = chainquery::from_mut(&mut list)
        .unwrap()
        .path(&["first_name"])
        .unwrap()
        .remove(Match::eq("James"))
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(list.len(), 2);
}

#[test]
fn test_enforcing_set() {
    let mut set: EnforcingTypedSet<Person> =
        enforcing_typed_set(HashSet::new(), Employee::type_handle());
    assert!(set.insert(Person::new("Bo", "Ng", 22)).is_err());
    assert!(set.is_empty());

    let mut people_set: EnforcingTypedSet<Person> =
        enforcing_typed_set(HashSet::new(), Person::type_handle());
    people_set.extend_checked(people()).unwrap();
    assert_eq!(people_set.len(), 3);

    let removed = QueryEngine::new().remove_matching(&mut people_set, |p: &Person| p.age > 30);
    assert_eq!(removed, 2);
}

/// Third-party collection with a private type tag
struct Roster {
    kind: TypeHandle,
    members: Vec<Person>,
}

impl Source for Roster {
    type Item = Person;

    fn iter_items(&self) -> Box<dyn Iterator<Item = &Person> + '_> {
        Box::new(self.members.iter())
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

#[test]
fn test_tag_probe_resolves_empty_roster() {
    let mut engine = QueryEngine::new();
    engine
        .resolver_mut()
        .register_probe::<Roster, _>("roster", |roster| Some(roster.kind));

    let roster = Roster {
        kind: Person::type_handle(),
        members: Vec::new(),
    };
    let query = engine.from(&roster).unwrap();
    assert_eq!(
        query.resolution().strategy,
        ResolutionStrategy::TagProbe("roster".to_string())
    );
    assert!(query.path(&["age"]).unwrap().collect().unwrap().is_empty());

    // default engine has no probe registered
    assert!(matches!(
        from(&roster),
        Err(QueryError::AmbiguousElementType(_))
    ));
}
