#![cfg(test)]

use std::cell::RefCell;
use std::rc::Rc;

use crate::{Entity, Error, Registry, System, World};

#[derive(Debug, Copy, Clone, PartialEq)]
struct Position(i32);

#[derive(Debug, Copy, Clone, PartialEq)]
struct Velocity(i32);

#[derive(Debug, Copy, Clone, PartialEq)]
struct Dead;

fn positions(world: &World<i32>) -> Vec<(Entity, Position)> {
    world
        .get_component::<Position>()
        .map(|(entity, position)| (entity, *position))
        .collect()
}

#[test]
fn test_attach_query_detach() {
    let mut world: World<i32> = World::new();

    let entity = world.create_entity((Position(0),));
    assert_eq!(positions(&world), vec![(entity, Position(0))]);

    world.add_component(entity, Velocity(1));
    let both: Vec<_> = world.get_components::<(Position, Velocity)>().collect();
    assert_eq!(both, vec![(entity, (&Position(0), &Velocity(1)))]);

    assert_eq!(world.remove_component::<Velocity>(entity), Ok(Velocity(1)));
    assert_eq!(world.get_components::<(Position, Velocity)>().count(), 0);
    assert_eq!(positions(&world), vec![(entity, Position(0))]);
}

#[test]
fn test_deferred_deletion() {
    let mut world: World<i32> = World::new();

    let entity = world.create_entity((Position(0), Velocity(0)));
    world.delete_entity(entity, false).unwrap();
    assert!(world.has_component::<Position>(entity));
    assert!(world.registry().is_pending(entity));
    assert_eq!(positions(&world), vec![(entity, Position(0))]);

    world.update(&0);
    assert!(!world.has_component::<Position>(entity));
    assert!(!world.has_component::<Velocity>(entity));
    assert!(positions(&world).is_empty());
    assert_eq!(world.get_components::<(Position, Velocity)>().count(), 0);
    assert_eq!(world.registry().pending_deletions(), 0);
}

#[test]
fn test_immediate_deletion() {
    let mut world: World<i32> = World::new();

    let first = world.create_entity((Position(1),));
    let second = world.create_entity((Position(2),));
    world.delete_entity(first, false).unwrap();
    world.delete_entity(first, true).unwrap();
    assert!(!world.registry().is_alive(first));
    assert!(!world.registry().is_pending(first));
    assert_eq!(positions(&world), vec![(second, Position(2))]);

    assert_eq!(
        world.delete_entity(first, true),
        Err(Error::MissingEntity(first)),
    );
    assert_eq!(
        world.delete_entity(first, false),
        Err(Error::MissingEntity(first)),
    );
}

#[test]
fn test_component_errors() {
    let mut world: World<i32> = World::new();

    let entity = world.create_entity((Position(1),));
    let empty = world.create_entity(());
    assert!(!world.registry().is_alive(empty));

    assert!(matches!(
        world.remove_component::<Velocity>(entity),
        Err(Error::MissingComponent { .. }),
    ));
    assert_eq!(
        world.remove_component::<Velocity>(empty),
        Err(Error::MissingEntity(empty)),
    );
    assert!(matches!(
        world.registry().component::<Velocity>(entity),
        Err(Error::MissingComponent { .. }),
    ));
    assert_eq!(world.registry().component::<Position>(entity), Ok(&Position(1)));
    assert_eq!(world.try_component::<Velocity>(entity), None);
    assert!(!world.has_component::<Position>(empty));

    world.registry_mut().component_mut::<Position>(entity).unwrap().0 = 7;
    assert_eq!(world.try_component::<Position>(entity), Some(&Position(7)));
}

#[test]
fn test_last_component_forgets_entity() {
    let mut world: World<i32> = World::new();

    let entity = world.create_entity((Position(0),));
    world.remove_component::<Position>(entity).unwrap();
    assert!(!world.registry().is_alive(entity));
    assert_eq!(world.registry().entity_count(), 0);
    assert_eq!(world.add_component(entity, Velocity(3)), None);
    assert!(world.registry().is_alive(entity));
}

#[test]
fn test_ids_never_recycled() {
    let mut world: World<i32> = World::new();

    let first = world.create_entity((Position(0),));
    world.delete_entity(first, true).unwrap();
    world.clear();
    let second = world.create_entity((Position(0),));
    assert!(second > first);
}

/// Moves every entity and records the context it was given.
struct Movement {
    contexts: Rc<RefCell<Vec<i32>>>,
}

impl System<i32> for Movement {
    fn update(&mut self, registry: &mut Registry, context: &i32) {
        self.contexts.borrow_mut().push(*context);
        for (_, (position, velocity)) in registry.get_components_mut::<(Position, Velocity)>() {
            position.0 += velocity.0 * *context;
        }
    }
}

/// Kills everything which went past the border; attaches a marker first.
struct Border {
    limit: i32,
    killed: Vec<Entity>,
}

impl System<i32> for Border {
    fn update(&mut self, registry: &mut Registry, _context: &i32) {
        let outside: Vec<_> = registry
            .get_component::<Position>()
            .filter(|(_, position)| position.0 > self.limit)
            .map(|(entity, _)| entity)
            .collect();
        for entity in outside {
            registry.add_component(entity, Dead);
            registry.delete_entity(entity, false).unwrap();
            self.killed.push(entity);
        }
    }
}

/// Counts entities marked as dead in the same tick.
struct Reaper {
    seen: usize,
    initialized: bool,
}

impl System<i32> for Reaper {
    fn update(&mut self, registry: &mut Registry, _context: &i32) {
        self.seen += registry.get_component::<Dead>().count();
    }

    fn initialize(&mut self, registry: &mut Registry) {
        self.initialized = true;
        registry.create_entity((Position(-100),));
    }

    fn destroy(&mut self, registry: &mut Registry) {
        registry.clear_cache();
        self.initialized = false;
    }
}

#[test]
fn test_tick() {
    let contexts = Rc::new(RefCell::new(Vec::new()));
    let mut world: World<i32> = World::new();

    let slow = world.create_entity((Position(0), Velocity(1)));
    let fast = world.create_entity((Position(0), Velocity(3)));

    world.register_system(
        Reaper {
            seen: 0,
            initialized: false,
        },
        -1,
    );
    world.register_system(
        Border {
            limit: 8,
            killed: Vec::new(),
        },
        5,
    );
    world.register_system(
        Movement {
            contexts: Rc::clone(&contexts),
        },
        10,
    );
    assert_eq!(world.system_count(), 3);
    assert!(world.system::<Reaper>().unwrap().initialized);
    assert_eq!(world.registry().entity_count(), 3);

    world.update(&1);
    world.update(&1);
    assert_eq!(world.system::<Border>().unwrap().killed, Vec::<Entity>::new());

    // Border observes the move made by Movement earlier in the same tick,
    // Reaper observes the marker attached by Border.
    world.update(&2);
    assert_eq!(world.system::<Border>().unwrap().killed, vec![fast]);
    assert_eq!(world.system::<Reaper>().unwrap().seen, 1);
    assert!(world.registry().is_pending(fast));
    assert!(world.has_component::<Position>(fast));

    world.update(&0);
    assert!(!world.registry().is_alive(fast));
    assert_eq!(world.try_component::<Position>(slow), Some(&Position(4)));
    assert_eq!(world.system::<Reaper>().unwrap().seen, 1);
    assert_eq!(*contexts.borrow(), [1, 1, 2, 0]);

    let reaper = world.unregister_system::<Reaper>().unwrap();
    assert!(!reaper.initialized);
    assert!(world.unregister_system::<Reaper>().is_none());
    assert_eq!(world.system_count(), 2);
}

#[test]
fn test_cache_across_systems() {
    let mut world: World<i32> = World::new();

    let entity = world.create_entity((Position(0),));
    assert_eq!(world.get_component::<Position>().count(), 1);
    assert_eq!(world.registry().cached_queries(), 1);

    world.add_component(entity, Velocity(0));
    assert_eq!(world.registry().cached_queries(), 0);

    world.get_components::<(Position, Velocity)>().count();
    world.registry_mut().clear_cache();
    assert_eq!(world.registry().cached_queries(), 0);
}

#[test]
fn test_foreign_entity() {
    let mut other = Registry::new();
    other.create_entity((Position(0),));
    let foreign = other.create_entity((Position(1),));

    let mut registry = Registry::default();
    assert!(registry.add_component(foreign, Velocity(2)).is_none());
    assert!(registry.is_alive(foreign));
    assert_eq!(registry.try_component::<Velocity>(foreign), Some(&Velocity(2)));

    let first = Registry::new().create_entity((Dead,));
    assert_eq!(first.id(), 1);
    assert_eq!(registry.create_entity((Dead,)).id(), 1);
}
