#![cfg(test)]

use std::any::TypeId;

use crate::entity::EntityAllocator;
use crate::Error;

use super::*;

#[derive(Debug, Copy, Clone, PartialEq)]
struct Position(i32);

#[derive(Debug, Copy, Clone, PartialEq)]
struct Velocity(i32);

#[test]
fn test_insertion() {
    let mut entities = EntityAllocator::new();
    let mut store = ComponentStore::new();

    let entity = entities.allocate();
    let component = "foo";

    assert_eq!(store.insert(entity, component), None);
    assert!(store.attached::<&str>(entity));
    assert_eq!(store.get::<&str>(entity), Some(&"foo"));

    assert_eq!(store.remove::<&str>(entity), Ok("foo"));
    assert!(!store.attached::<&str>(entity));
    assert_eq!(store.get::<&str>(entity), None);
}

#[test]
fn test_replace() {
    let mut entities = EntityAllocator::new();
    let mut store = ComponentStore::new();

    let entity = entities.allocate();
    assert_eq!(store.insert(entity, 123), None);
    assert_eq!(store.insert(entity, 456), Some(123));
    assert_eq!(store.remove::<i32>(entity), Ok(456));
    assert_eq!(
        store.remove::<i32>(entity),
        Err(Error::MissingEntity(entity)),
    );
}

#[test]
fn test_missing_component() {
    let mut entities = EntityAllocator::new();
    let mut store = ComponentStore::new();

    let entity = entities.allocate();
    store.insert(entity, Position(0));

    let error = store.remove::<Velocity>(entity).unwrap_err();
    assert!(matches!(error, Error::MissingComponent { entity: e, .. } if e == entity));
    assert_eq!(store.get::<Position>(entity), Some(&Position(0)));
}

#[test]
fn test_pruning() {
    let mut entities = EntityAllocator::new();
    let mut store = ComponentStore::new();

    let entity = entities.allocate();
    store.insert(entity, Position(1));
    store.insert(entity, Velocity(2));
    assert_eq!(store.len(), 1);

    store.remove::<Velocity>(entity).unwrap();
    assert!(store.contains(entity));
    assert!(store.holders(TypeId::of::<Velocity>()).is_none());

    store.remove::<Position>(entity).unwrap();
    assert!(!store.contains(entity));
    assert!(store.holders(TypeId::of::<Position>()).is_none());
    assert!(store.is_empty());
}

#[test]
fn test_delete_and_purge() {
    let mut entities = EntityAllocator::new();
    let mut store = ComponentStore::new();

    let first = entities.allocate();
    let second = entities.allocate();
    let third = entities.allocate();
    for entity in [first, second, third] {
        store.insert(entity, Position(entity.id() as i32));
    }
    store.insert(second, Velocity(0));

    store.delete(first).unwrap();
    assert_eq!(store.delete(first), Err(Error::MissingEntity(first)));
    assert!(!store.attached::<Position>(first));

    assert_eq!(store.purge([second, third, first]), 2);
    assert!(store.is_empty());
    assert!(store.holders(TypeId::of::<Position>()).is_none());
    assert!(store.holders(TypeId::of::<Velocity>()).is_none());
}

#[test]
fn test_get_mut() {
    let mut entities = EntityAllocator::new();
    let mut store = ComponentStore::new();

    let entity = entities.allocate();
    store.insert(entity, Position(0));
    if let Some(position) = store.get_mut::<Position>(entity) {
        position.0 += 10;
    }
    assert_eq!(store.get::<Position>(entity), Some(&Position(10)));
    assert_eq!(store.get_mut::<Velocity>(entity), None);
}
