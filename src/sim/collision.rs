//! Collision detection and response for axis-aligned boxes
//!
//! Every solid the player can touch is resolved with a prioritized contact
//! rule list evaluated in a fixed order; the first rule that matches wins.
//! This is a discrete approximation, not a swept test: a fast diagonal hit on
//! a corner can resolve as a side hit instead of a landing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameState, Player};

/// Axis-aligned bounding box (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap: touching edges don't count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Which face of a solid the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Landed on the top face
    Top,
    /// Moving left into the solid's right face
    RightFace,
    /// Moving right into the solid's left face
    LeftFace,
    /// Jumped up into the bottom face
    Bottom,
}

/// Contact rules in priority order
pub const CONTACT_PRIORITY: [Contact; 4] =
    [Contact::Top, Contact::RightFace, Contact::LeftFace, Contact::Bottom];

/// How strict the top-landing rule is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// Falling, and last frame's bottom edge was above the top (within tolerance)
    FromAbove,
    /// Any downward motion counts as a landing
    AnyDescent,
}

impl Contact {
    /// Does this rule fire for `player` overlapping `solid`?
    ///
    /// Uses the player's velocity to reconstruct where it was last frame.
    pub fn matches(self, player: &Player, solid: &Aabb, landing: Landing, tolerance: f32) -> bool {
        let vel = player.vel;
        let body = player.bounds();
        match self {
            Contact::Top => {
                vel.y > 0.0
                    && match landing {
                        Landing::FromAbove => body.bottom() - vel.y < solid.top() + tolerance,
                        Landing::AnyDescent => true,
                    }
            }
            Contact::RightFace => vel.x < 0.0 && body.right() - vel.x > solid.right() - tolerance,
            Contact::LeftFace => vel.x > 0.0 && body.left() - vel.x < solid.left() + tolerance,
            Contact::Bottom => vel.y < 0.0,
        }
    }

    /// Push the player out through this face
    pub fn apply(self, player: &mut Player, solid: &Aabb) {
        match self {
            Contact::Top => player.land_on(solid.top()),
            Contact::RightFace => {
                player.pos.x = solid.right();
                player.vel.x = 0.0;
            }
            Contact::LeftFace => {
                player.pos.x = solid.left() - player.size.x;
                player.vel.x = 0.0;
            }
            Contact::Bottom => {
                player.pos.y = solid.bottom();
                player.vel.y = 0.0;
            }
        }
    }
}

/// First matching contact rule, if any
pub fn classify_contact(player: &Player, solid: &Aabb, landing: Landing, tolerance: f32) -> Option<Contact> {
    CONTACT_PRIORITY
        .into_iter()
        .find(|contact| contact.matches(player, solid, landing, tolerance))
}

/// Resolve an overlap against a solid box. Returns the contact applied.
pub fn resolve_solid(player: &mut Player, solid: &Aabb, landing: Landing, tolerance: f32) -> Option<Contact> {
    if !player.bounds().overlaps(solid) {
        return None;
    }
    let contact = classify_contact(player, solid, landing, tolerance)?;
    contact.apply(player, solid);
    Some(contact)
}

/// What killed the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hazard {
    Enemy(usize),
    Projectile(usize),
}

/// Frame-level result of collision resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    Continue,
    /// Landed on the unlocked goal
    Won,
    Died(Hazard),
}

/// Resolve every player interaction for this frame.
///
/// Order: obstacles, enemies, projectiles, star, badge, goal. A lethal hit
/// stops resolution for the rest of the frame.
pub fn resolve_collisions(state: &mut GameState) -> CollisionOutcome {
    let tolerance = state.tuning.landing_tolerance;

    // Obstacles: solid on all sides, first landing per index scores
    for (index, obstacle) in state.obstacles.iter().enumerate() {
        let solid = obstacle.bounds();
        let contact = resolve_solid(&mut state.player, &solid, Landing::FromAbove, tolerance);
        if contact == Some(Contact::Top) && state.stats.visited.insert(index) {
            state.stats.score += state.tuning.obstacle_bonus;
        }
    }

    // Enemies: stomp from above or die
    for (index, enemy) in state.enemies.iter_mut().enumerate() {
        if !enemy.alive || !state.player.bounds().overlaps(&enemy.bounds()) {
            continue;
        }
        let stomp = state.player.vel.y > 0.0 && state.player.pos.y < enemy.pos.y + state.tuning.stomp_window;
        if stomp {
            enemy.alive = false;
            state.player.vel.y = state.tuning.stomp_bounce;
            state.stats.score += state.tuning.enemy_kill_bonus;
            state.stats.kills += 1;
            log::debug!("Enemy {} stomped (kills: {})", index, state.stats.kills);
        } else {
            return CollisionOutcome::Died(Hazard::Enemy(index));
        }
    }

    // Projectiles: any touch is lethal
    let body = state.player.bounds();
    if let Some(index) = state.projectiles.iter().position(|p| p.bounds().overlaps(&body)) {
        return CollisionOutcome::Died(Hazard::Projectile(index));
    }

    // Collectibles
    if !state.star.collected && state.star.bounds().overlaps(&body) {
        state.star.collected = true;
        state.player.has_star = true;
        state.stats.star_collected = true;
        state.stats.score += state.tuning.star_bonus;
        log::debug!("Star collected");
    }
    if !state.badge.collected && state.badge.bounds().overlaps(&body) {
        state.badge.collected = true;
        state.stats.badge_collected = true;
        state.stats.score += state.tuning.badge_bonus;
        log::debug!("Badge collected");
    }

    // Goal: a wall until the star is in hand, then a landing pad that wins
    let solid = state.goal.bounds();
    if state.stats.star_collected {
        let contact = resolve_solid(&mut state.player, &solid, Landing::FromAbove, tolerance);
        if contact == Some(Contact::Top) {
            return CollisionOutcome::Won;
        }
    } else {
        resolve_solid(&mut state.player, &solid, Landing::AnyDescent, tolerance);
    }

    CollisionOutcome::Continue
}
