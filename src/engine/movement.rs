//! Recent movement trail per user.
//!
//! Keeps the last `trail_capacity` reported positions for each user, oldest
//! dropped first. Users are never forgotten once seen.

use crate::config::MovementConfig;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::time::SystemTime;
use tourwatch_types::movement::{MonitoringStatus, MovementSummary, TrailPoint};
use tourwatch_types::point::GeoPoint;
use tourwatch_types::rating::round_to_tenth;

pub struct MovementLog {
    trails: RwLock<FxHashMap<String, VecDeque<TrailPoint>>>,
    capacity: usize,
}

impl MovementLog {
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            trails: RwLock::new(FxHashMap::default()),
            capacity: config.trail_capacity,
        }
    }

    pub fn record(&self, user_id: &str, position: GeoPoint, now: SystemTime) {
        let mut trails = self.trails.write();
        let trail = trails
            .entry(user_id.to_string())
            .or_insert_with(|| VecDeque::with_capacity(self.capacity.min(64)));

        trail.push_back(TrailPoint {
            position,
            recorded_at: now,
        });
        while trail.len() > self.capacity {
            trail.pop_front();
        }
    }

    /// The user's trail, oldest first. Empty for unknown users.
    pub fn trail(&self, user_id: &str) -> Vec<TrailPoint> {
        self.trails
            .read()
            .get(user_id)
            .map(|t| t.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn tracked_users(&self) -> usize {
        self.trails.read().len()
    }

    pub fn summary(&self) -> MovementSummary {
        let trails = self.trails.read();
        if trails.is_empty() {
            return MovementSummary::default();
        }

        let total: usize = trails.values().map(VecDeque::len).sum();
        MovementSummary {
            total_users: trails.len(),
            average_movements: round_to_tenth(total as f64 / trails.len() as f64),
            status: MonitoringStatus::Active,
        }
    }

    pub fn clear(&self) {
        self.trails.write().clear();
    }
}

impl Default for MovementLog {
    fn default() -> Self {
        Self::new(&MovementConfig::default())
    }
}
