//! Systems of the flappy simulation.

use flappy_ecs::{Registry, System, World};

use crate::components::{Flap, Pipe, RigidBody, Score, Scrollable, Transform};
use crate::config::DeltaTime;

/// Context of one tick of the simulation.
#[derive(Debug, Copy, Clone)]
pub struct Frame {
    pub delta: DeltaTime,
    pub flap: bool,
}

impl Frame {
    fn seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

pub const PLAYER_X: f32 = 100.0;
pub const SCREEN_WIDTH: f32 = 640.0;
pub const PIPE_SPACING: f32 = 260.0;
pub const PIPE_SPEED: f32 = -150.0;

/// Sets vertical velocity of the player on flap.
pub struct FlapSystem;

impl System<Frame> for FlapSystem {
    fn update(&mut self, registry: &mut Registry, frame: &Frame) {
        if !frame.flap {
            return;
        }
        for (_, (flap, body)) in registry.get_components_mut::<(Flap, RigidBody)>() {
            body.velocity = flap.force;
        }
    }
}

/// Accelerates every rigid body down.
pub struct GravitySystem {
    pub force: f32,
}

impl System<Frame> for GravitySystem {
    fn update(&mut self, registry: &mut Registry, frame: &Frame) {
        let dv = self.force * frame.seconds();
        for (_, body) in registry.get_component_mut::<RigidBody>() {
            body.velocity += dv;
        }
    }
}

/// Moves rigid bodies vertically and stops them at the ground.
pub struct MovementSystem;

impl System<Frame> for MovementSystem {
    fn update(&mut self, registry: &mut Registry, frame: &Frame) {
        let dt = frame.seconds();
        for (_, (transform, body)) in registry.get_components_mut::<(Transform, RigidBody)>() {
            transform.y += body.velocity * dt;
            if transform.y < 0.0 {
                transform.y = 0.0;
                body.velocity = 0.0;
            }
        }
    }
}

/// Moves obstacles horizontally.
pub struct ScrollSystem;

impl System<Frame> for ScrollSystem {
    fn update(&mut self, registry: &mut Registry, frame: &Frame) {
        let dt = frame.seconds();
        for (_, (transform, scrollable)) in registry.get_components_mut::<(Transform, Scrollable)>()
        {
            transform.x += scrollable.speed * dt;
        }
    }
}

/// Deletes obstacles which left the screen and spawns their replacements.
///
/// Deletion is deferred, so systems running later in the same tick
/// still see the old obstacles.
///
pub struct DespawnSystem {
    pub left_border: f32,
    pub respawn_x: f32,
}

impl System<Frame> for DespawnSystem {
    fn update(&mut self, registry: &mut Registry, _frame: &Frame) {
        let gone: Vec<_> = registry
            .get_components::<(Pipe, Transform, Scrollable)>()
            .filter(|(_, (_, transform, _))| transform.x < self.left_border)
            .map(|(entity, (_, transform, scrollable))| (entity, transform.y, *scrollable))
            .collect();

        for (entity, y, scrollable) in gone {
            if registry.is_pending(entity) {
                continue;
            }
            if let Err(error) = registry.delete_entity(entity, false) {
                log::error!("pipe despawn failure: {}", error);
                continue;
            }
            let replacement = registry.create_entity((
                Pipe::default(),
                Transform::new(self.respawn_x, y),
                scrollable,
            ));
            log::debug!("pipe {} left the screen, {} spawned", entity, replacement);
        }
    }
}

/// Counts obstacles which the player has passed.
pub struct ScoreSystem;

impl System<Frame> for ScoreSystem {
    fn update(&mut self, registry: &mut Registry, _frame: &Frame) {
        let player = registry
            .get_components::<(Flap, Transform)>()
            .next()
            .map(|(entity, (_, transform))| (entity, transform.x));
        let (player, player_x) = match player {
            Some(player) => player,
            None => return,
        };

        let mut passed = 0;
        for (_, (pipe, transform)) in registry.get_components_mut::<(Pipe, Transform)>() {
            if !pipe.passed && transform.x < player_x {
                pipe.passed = true;
                passed += 1;
            }
        }
        if passed == 0 {
            return;
        }
        if let Some(score) = registry.try_component_mut::<Score>(player) {
            score.value += passed;
            log::info!("score: {}", score.value);
        }
    }
}

/// Spawns the player with obstacles and registers every system of the simulation.
pub fn populate(world: &mut World<Frame>) {
    world.create_entity((
        Transform::new(PLAYER_X, 400.0),
        RigidBody::default(),
        Flap { force: 350.0 },
        Score::default(),
    ));
    for index in 0..3 {
        let x = SCREEN_WIDTH + PIPE_SPACING * index as f32;
        world.create_entity((
            Pipe::default(),
            Transform::new(x, 0.0),
            Scrollable { speed: PIPE_SPEED },
        ));
    }

    world.register_system(FlapSystem, 30);
    world.register_system(GravitySystem { force: -900.0 }, 20);
    world.register_system(MovementSystem, 10);
    world.register_system(ScrollSystem, 10);
    world.register_system(
        DespawnSystem {
            left_border: -PIPE_SPACING / 2.0,
            respawn_x: SCREEN_WIDTH + PIPE_SPACING,
        },
        0,
    );
    world.register_system(ScoreSystem, -10);
}
