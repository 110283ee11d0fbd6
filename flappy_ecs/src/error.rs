//! Utilities for ECS error handling.

use thiserror::Error;

use crate::Entity;

/// Result of any registry operation which can return an error.
pub type Result<T> = std::result::Result<T, Error>;

/// Error of the registry operation.
///
/// Every error is a precondition violation which could be corrected by the caller.
///
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("entity {entity} has no component of type `{component}`")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    #[error("entity {0} does not exist")]
    MissingEntity(Entity),
}

impl Error {
    pub(crate) fn missing_component<T>(entity: Entity) -> Self {
        Self::MissingComponent {
            entity,
            component: std::any::type_name::<T>(),
        }
    }
}
