//! Entity Component System (ECS) utilities for game engine.
//!
//! Components of any `'static` type are attached to [`Entity`] identifiers
//! and queried by their types. Systems registered in the [`World`] are
//! updated once per tick in order of descending priority.
//!
//! ```
//! use flappy_ecs::{Registry, System, World};
//!
//! #[derive(Debug, PartialEq)]
//! struct Position(f32);
//! struct Velocity(f32);
//!
//! struct Movement;
//!
//! impl System<f32> for Movement {
//!     fn update(&mut self, registry: &mut Registry, delta: &f32) {
//!         for (_, (position, velocity)) in registry.get_components_mut::<(Position, Velocity)>() {
//!             position.0 += velocity.0 * delta;
//!         }
//!     }
//! }
//!
//! let mut world: World<f32> = World::new();
//! let entity = world.create_entity((Position(0.0), Velocity(2.0)));
//! world.register_system(Movement, 0);
//! world.update(&0.5);
//! assert_eq!(world.try_component::<Position>(entity), Some(&Position(1.0)));
//! ```

pub use component::{Bundle, Component, ComponentMap, ComponentStore};
pub use deletion::DeletionQueue;
pub use entity::Entity;
pub use error::{Error, Result};
pub use query::{Query, QueryCache, QueryIter, QueryIterMut, QueryKey};
pub use registry::Registry;
pub use system::{AsAny, Scheduler, System};
pub use world::World;

mod component;
mod deletion;
mod entity;
mod error;
mod query;
mod registry;
mod system;
mod world;
