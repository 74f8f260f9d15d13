//! Simulation module
//!
//! All gameplay logic lives here. This module stays platform-free:
//! - Time comes from an injected [`Clock`], never the host directly
//! - Input arrives as a plain [`InputState`] snapshot
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod enemy;
pub mod input;
pub mod level;
pub mod physics;
pub mod scene;
pub mod state;
pub mod tick;

pub use clock::{Clock, ManualClock, SystemClock};
pub use collision::{Aabb, CollisionOutcome, Contact, Hazard, Landing, resolve_collisions};
pub use input::{Drag, InputState};
pub use level::Level;
pub use scene::{Scene, SceneError, SceneTimers, handle_confirm};
pub use state::{
    Camera, Collectible, CollectibleKind, Enemy, EnemyVariant, Float, GameState, Goal, HopCycle,
    Obstacle, Patrol, Player, Projectile, SessionStats, Turret,
};
pub use tick::tick;
