//! Named drawables and load tracking
//!
//! The core only knows sprites by [`SpriteId`]. The host loads the images and
//! reports back; nothing may enter Playing until every sprite is available.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Every drawable the game needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    PlayerIdle,
    PlayerRun,
    PlayerRunStar,
    Enemy,
    Projectile,
    Block1,
    Block2,
    Block3,
    Backdrop1,
    Backdrop2,
    Tree,
    TreeLit,
    Star,
    Badge,
    Reward,
    StartArt,
    EndArt,
}

impl SpriteId {
    pub const ALL: [SpriteId; 17] = [
        SpriteId::PlayerIdle,
        SpriteId::PlayerRun,
        SpriteId::PlayerRunStar,
        SpriteId::Enemy,
        SpriteId::Projectile,
        SpriteId::Block1,
        SpriteId::Block2,
        SpriteId::Block3,
        SpriteId::Backdrop1,
        SpriteId::Backdrop2,
        SpriteId::Tree,
        SpriteId::TreeLit,
        SpriteId::Star,
        SpriteId::Badge,
        SpriteId::Reward,
        SpriteId::StartArt,
        SpriteId::EndArt,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SpriteId::PlayerIdle => "player_idle",
            SpriteId::PlayerRun => "player_run",
            SpriteId::PlayerRunStar => "player_run_star",
            SpriteId::Enemy => "enemy",
            SpriteId::Projectile => "projectile",
            SpriteId::Block1 => "block1",
            SpriteId::Block2 => "block2",
            SpriteId::Block3 => "block3",
            SpriteId::Backdrop1 => "backdrop1",
            SpriteId::Backdrop2 => "backdrop2",
            SpriteId::Tree => "tree",
            SpriteId::TreeLit => "tree_lit",
            SpriteId::Star => "star",
            SpriteId::Badge => "badge",
            SpriteId::Reward => "reward",
            SpriteId::StartArt => "start_art",
            SpriteId::EndArt => "end_art",
        }
    }

    /// Relative URL the web host loads this sprite from
    pub fn path(&self) -> String {
        format!("assets/{}.png", self.name())
    }

    /// Block sprite for an obstacle variant
    pub fn block(variant: u8) -> Self {
        match variant % 3 {
            0 => SpriteId::Block1,
            1 => SpriteId::Block2,
            _ => SpriteId::Block3,
        }
    }
}

/// Overall loading state
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading { loaded: usize, total: usize },
    Ready,
    /// Loading has taken longer than the stall timeout, or an image failed
    Stalled { missing: Vec<SpriteId>, waited_ms: f64 },
}

/// Tracks which sprites have finished loading
#[derive(Debug, Clone)]
pub struct AssetTracker {
    loaded: BTreeSet<SpriteId>,
    failed: BTreeSet<SpriteId>,
    started_ms: f64,
    stall_ms: f64,
    stall_reported: bool,
}

impl AssetTracker {
    pub fn new(started_ms: f64, stall_ms: f64) -> Self {
        Self {
            loaded: BTreeSet::new(),
            failed: BTreeSet::new(),
            started_ms,
            stall_ms,
            stall_reported: false,
        }
    }

    /// Tracker with everything already available (headless runs, tests)
    pub fn preloaded() -> Self {
        let mut tracker = Self::new(0.0, f64::INFINITY);
        tracker.loaded.extend(SpriteId::ALL);
        tracker
    }

    pub fn mark_loaded(&mut self, id: SpriteId) {
        self.failed.remove(&id);
        if self.loaded.insert(id) {
            log::debug!("Loaded sprite {}", id.name());
        }
    }

    pub fn mark_failed(&mut self, id: SpriteId) {
        if !self.loaded.contains(&id) && self.failed.insert(id) {
            log::warn!("Sprite {} failed to load", id.name());
        }
    }

    pub fn is_ready(&self) -> bool {
        self.loaded.len() == SpriteId::ALL.len()
    }

    pub fn missing(&self) -> Vec<SpriteId> {
        SpriteId::ALL
            .into_iter()
            .filter(|id| !self.loaded.contains(id))
            .collect()
    }

    pub fn missing_names(&self) -> Vec<String> {
        self.missing().iter().map(|id| id.name().to_string()).collect()
    }

    pub fn status(&self, now_ms: f64) -> LoadStatus {
        if self.is_ready() {
            return LoadStatus::Ready;
        }
        let waited_ms = now_ms - self.started_ms;
        if !self.failed.is_empty() || waited_ms > self.stall_ms {
            return LoadStatus::Stalled {
                missing: self.missing(),
                waited_ms,
            };
        }
        LoadStatus::Loading {
            loaded: self.loaded.len(),
            total: SpriteId::ALL.len(),
        }
    }

    /// Like [`status`](Self::status), logging the first time loading stalls
    pub fn poll(&mut self, now_ms: f64) -> LoadStatus {
        let status = self.status(now_ms);
        if let LoadStatus::Stalled { missing, waited_ms } = &status {
            if !self.stall_reported {
                self.stall_reported = true;
                log::warn!(
                    "Asset loading stalled after {:.0}ms, missing: {:?}",
                    waited_ms,
                    missing.iter().map(SpriteId::name).collect::<Vec<_>>()
                );
            }
        }
        status
    }
}
