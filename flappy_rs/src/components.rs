//! Components of the flappy simulation.

/// Position of the object on the screen. Axis `y` points up, ground is at zero.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Transform {
    pub x: f32,
    pub y: f32,
}

impl Transform {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Vertical velocity of the object affected by gravity.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct RigidBody {
    pub velocity: f32,
}

/// Horizontal movement of the obstacles.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Scrollable {
    pub speed: f32,
}

/// Marks the player and stores the impulse of one flap.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Flap {
    pub force: f32,
}

/// Marks the obstacle.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Pipe {
    pub passed: bool,
}

/// Count of obstacles passed by the player.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Score {
    pub value: u32,
}
