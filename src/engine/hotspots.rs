//! Hotspot detection: latest position per user, re-clustered on every update.
//!
//! Each user has exactly one current position, replaced on update. After
//! every update the fresh positions are clustered again and the published
//! hotspot list is replaced as a whole.
//!
//! Staleness is passive: positions older than the freshness window are
//! skipped by clustering but stay in the map until the user reports again or
//! `cleanup_stale()` is called. Nothing evicts them automatically.
//!
//! Joins are volatile. `join_hotspot` edits the currently published hotspot,
//! and the next recompute rebuilds the list from geometry alone, so a joined
//! user who is not physically inside the cluster disappears from it.

use crate::compute::clustering::seed_clusters;
use crate::compute::distance::DistanceMetric;
use crate::config::HotspotConfig;
use crate::error::{Result, TourwatchError};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::time::SystemTime;
use tourwatch_types::hotspot::{Hotspot, HotspotMember, TouristPosition};
use tourwatch_types::point::GeoPoint;

/// Outcome of a successful `join_hotspot` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The user was appended; carries the new member count.
    Joined { tourist_count: usize },
    /// The user was already listed; nothing changed.
    AlreadyMember,
}

/// Stored position plus the slot it was first inserted at.
///
/// The slot fixes clustering order: a user keeps their original slot when
/// their position is overwritten.
#[derive(Debug, Clone)]
struct TrackedPosition {
    slot: u64,
    position: TouristPosition,
}

#[derive(Debug, Default)]
struct DetectorState {
    positions: FxHashMap<String, TrackedPosition>,
    next_slot: u64,
    hotspots: Vec<Hotspot>,
}

impl DetectorState {
    /// Fresh positions in slot order.
    fn fresh_positions(&self, now: SystemTime, config: &HotspotConfig) -> Vec<&TrackedPosition> {
        let window = config.freshness_window();
        let mut fresh: Vec<&TrackedPosition> = self
            .positions
            .values()
            .filter(|t| t.position.is_fresh_at(now, window))
            .collect();
        fresh.sort_unstable_by_key(|t| t.slot);
        fresh
    }

    fn recompute(&mut self, now: SystemTime, config: &HotspotConfig, metric: DistanceMetric) {
        let fresh: Vec<&TouristPosition> = self
            .fresh_positions(now, config)
            .into_iter()
            .map(|t| &t.position)
            .collect();

        if fresh.len() < config.min_members {
            log::debug!(
                "Hotspot recompute: {} fresh of {} tracked positions, below minimum of {}",
                fresh.len(),
                self.positions.len(),
                config.min_members
            );
            self.hotspots = Vec::new();
            return;
        }

        let mut hotspots = Vec::new();
        for cluster in seed_clusters(&fresh, config.radius_km, metric) {
            if cluster.len() < config.min_members {
                continue;
            }

            let count = cluster.len() as f64;
            let center_lat = cluster.iter().map(|&i| fresh[i].position.lat()).sum::<f64>() / count;
            let center_lng = cluster.iter().map(|&i| fresh[i].position.lng()).sum::<f64>() / count;
            let members: Vec<HotspotMember> = cluster.iter().map(|&i| fresh[i].member()).collect();

            hotspots.push(Hotspot {
                id: format!("hotspot_{}", hotspots.len() + 1),
                center_lat,
                center_lng,
                member_count: members.len(),
                members,
                created_at: now,
                radius_meters: config.radius_meters(),
            });
        }

        log::debug!(
            "Hotspot recompute: {} fresh of {} tracked positions, {} hotspots",
            fresh.len(),
            self.positions.len(),
            hotspots.len()
        );

        self.hotspots = hotspots;
    }
}

/// Tracks the latest position of each user and publishes proximity hotspots.
///
/// All state sits behind one lock; an upsert and the recompute it triggers
/// run under the same write guard, so readers only ever see a complete
/// hotspot list.
pub struct HotspotDetector {
    state: RwLock<DetectorState>,
    config: HotspotConfig,
    metric: DistanceMetric,
}

impl HotspotDetector {
    pub fn new(config: HotspotConfig, metric: DistanceMetric) -> Self {
        Self {
            state: RwLock::new(DetectorState::default()),
            config,
            metric,
        }
    }

    pub fn config(&self) -> &HotspotConfig {
        &self.config
    }

    /// Upsert a user's position and re-detect hotspots.
    ///
    /// Coordinates are stored as given. Returns the position this one
    /// replaced, if any.
    pub fn record_position(
        &self,
        user_id: &str,
        position: GeoPoint,
        display_name: &str,
        now: SystemTime,
    ) -> Option<TouristPosition> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let new_position = TouristPosition::new(user_id, position, display_name, now);

        let previous = match state.positions.get_mut(user_id) {
            Some(tracked) => Some(std::mem::replace(&mut tracked.position, new_position)),
            None => {
                let slot = state.next_slot;
                state.next_slot += 1;
                state.positions.insert(
                    user_id.to_string(),
                    TrackedPosition {
                        slot,
                        position: new_position,
                    },
                );
                None
            }
        };

        log::trace!(
            "Recorded position for {} at ({}, {})",
            user_id,
            position.lat(),
            position.lng()
        );

        state.recompute(now, &self.config, self.metric);
        previous
    }

    /// Re-detect hotspots at `now` without recording anything.
    ///
    /// Lets a caller age positions out of the published list between
    /// reports. Discards joins exactly like a position update does.
    pub fn recompute(&self, now: SystemTime) {
        self.state.write().recompute(now, &self.config, self.metric);
    }

    /// Snapshot of the currently published hotspots, in discovery order.
    pub fn hotspots(&self) -> Vec<Hotspot> {
        self.state.read().hotspots.clone()
    }

    pub fn hotspot(&self, id: &str) -> Option<Hotspot> {
        self.state.read().hotspots.iter().find(|h| h.id == id).cloned()
    }

    pub fn hotspot_count(&self) -> usize {
        self.state.read().hotspots.len()
    }

    /// Add a user to a published hotspot.
    ///
    /// Membership is checked by exact `user_id`. The change lives only until
    /// the next recompute.
    pub fn join_hotspot(&self, id: &str, user_id: &str, display_name: &str) -> Result<JoinOutcome> {
        let mut state = self.state.write();
        let hotspot = state
            .hotspots
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| TourwatchError::HotspotNotFound(id.to_string()))?;

        if hotspot.has_member(user_id) {
            return Ok(JoinOutcome::AlreadyMember);
        }

        hotspot.members.push(HotspotMember {
            user_id: user_id.to_string(),
            name: display_name.to_string(),
        });
        hotspot.member_count = hotspot.members.len();

        log::debug!(
            "{} joined {} ({} tourists)",
            user_id,
            id,
            hotspot.member_count
        );

        Ok(JoinOutcome::Joined {
            tourist_count: hotspot.member_count,
        })
    }

    pub fn position(&self, user_id: &str) -> Option<TouristPosition> {
        self.state
            .read()
            .positions
            .get(user_id)
            .map(|t| t.position.clone())
    }

    /// Positions that would take part in clustering at `now`, in clustering order.
    pub fn fresh_positions(&self, now: SystemTime) -> Vec<TouristPosition> {
        self.state
            .read()
            .fresh_positions(now, &self.config)
            .into_iter()
            .map(|t| t.position.clone())
            .collect()
    }

    /// Number of stored positions, stale ones included.
    pub fn tracked_positions(&self) -> usize {
        self.state.read().positions.len()
    }

    /// Drop positions outside the freshness window at `now`.
    ///
    /// Published hotspots are left alone; stale positions never contribute
    /// to them anyway. Returns the number of positions removed.
    pub fn cleanup_stale(&self, now: SystemTime) -> usize {
        let window = self.config.freshness_window();
        let mut state = self.state.write();
        let before = state.positions.len();
        state
            .positions
            .retain(|_, t| t.position.is_fresh_at(now, window));
        let removed = before - state.positions.len();

        if removed > 0 {
            log::debug!("Removed {} stale positions", removed);
        }
        removed
    }

    /// Forget every position and hotspot.
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.positions.clear();
        state.hotspots.clear();
        state.next_slot = 0;
    }
}

impl Default for HotspotDetector {
    fn default() -> Self {
        Self::new(HotspotConfig::default(), DistanceMetric::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    const SEED_LAT: f64 = 27.1751;
    const SEED_LNG: f64 = 78.0421;

    fn now() -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    /// Point `meters` north of the seed.
    fn north_of_seed(meters: f64) -> GeoPoint {
        GeoPoint::new(SEED_LAT + (meters / 1000.0 / 6371.0).to_degrees(), SEED_LNG)
    }

    fn record(detector: &HotspotDetector, user: &str, meters: f64, at: SystemTime) {
        detector.record_position(user, north_of_seed(meters), &format!("Tourist {user}"), at);
    }

    fn member_ids(hotspot: &Hotspot) -> Vec<&str> {
        hotspot.members.iter().map(|m| m.user_id.as_str()).collect()
    }

    #[test]
    fn test_three_close_positions_form_one_hotspot() {
        let detector = HotspotDetector::default();
        record(&detector, "a", 0.0, now());
        record(&detector, "b", 100.0, now());
        record(&detector, "c", 400.0, now());

        let hotspots = detector.hotspots();
        assert_eq!(hotspots.len(), 1);

        let h = &hotspots[0];
        assert_eq!(h.id, "hotspot_1");
        assert_eq!(h.member_count, 3);
        assert_eq!(member_ids(h), vec!["a", "b", "c"]);
        assert_eq!(h.radius_meters, 500);
        assert_eq!(h.created_at, now());

        let expected_lat = (north_of_seed(0.0).lat()
            + north_of_seed(100.0).lat()
            + north_of_seed(400.0).lat())
            / 3.0;
        assert!((h.center_lat - expected_lat).abs() < 1e-12);
        assert!((h.center_lng - SEED_LNG).abs() < 1e-12);
    }

    #[test]
    fn test_two_positions_yield_no_hotspot() {
        let detector = HotspotDetector::default();
        record(&detector, "a", 0.0, now());
        record(&detector, "b", 10.0, now());
        assert!(detector.hotspots().is_empty());
    }

    #[test]
    fn test_membership_is_decided_by_seed_only() {
        let detector = HotspotDetector::default();
        record(&detector, "seed", 0.0, now());
        record(&detector, "b", 200.0, now());
        record(&detector, "c", 450.0, now());
        // 650 m from the seed, 200 m from "c".
        record(&detector, "d", 650.0, now());

        let hotspots = detector.hotspots();
        assert_eq!(hotspots.len(), 1);
        assert_eq!(member_ids(&hotspots[0]), vec!["seed", "b", "c"]);
        assert!(!hotspots[0].has_member("d"));
    }

    #[test]
    fn test_stale_position_is_excluded() {
        let detector = HotspotDetector::default();
        let old = now() - Duration::from_secs(31 * 60);
        record(&detector, "old", 0.0, old);
        record(&detector, "b", 50.0, now());
        record(&detector, "c", 80.0, now());

        assert!(detector.hotspots().is_empty());
        assert_eq!(detector.tracked_positions(), 3);
        assert_eq!(detector.fresh_positions(now()).len(), 2);

        // Reporting again refreshes the old entry.
        record(&detector, "old", 0.0, now());
        assert_eq!(detector.hotspots().len(), 1);
    }

    #[test]
    fn test_position_just_inside_window_counts() {
        let detector = HotspotDetector::default();
        let almost = now() - Duration::from_secs(30 * 60 - 1);
        record(&detector, "a", 0.0, almost);
        record(&detector, "b", 50.0, now());
        record(&detector, "c", 80.0, now());
        assert_eq!(detector.hotspots().len(), 1);
    }

    #[test]
    fn test_upsert_replaces_and_keeps_order() {
        let detector = HotspotDetector::default();
        // "far" is inserted first but sits 5 km away.
        record(&detector, "far", 5_000.0, now());
        record(&detector, "b", 100.0, now());
        record(&detector, "c", 200.0, now());
        record(&detector, "d", 300.0, now());
        assert_eq!(member_ids(&detector.hotspots()[0]), vec!["b", "c", "d"]);

        // Moving in keeps its first slot, so it now seeds the cluster.
        let previous = detector.record_position("far", north_of_seed(0.0), "Far", now());
        assert_eq!(previous.map(|p| p.position), Some(north_of_seed(5_000.0)));
        assert_eq!(detector.tracked_positions(), 4);

        let hotspots = detector.hotspots();
        assert_eq!(hotspots.len(), 1);
        assert_eq!(member_ids(&hotspots[0]), vec!["far", "b", "c", "d"]);
        assert_eq!(hotspots[0].members[0].name, "Far");
    }

    #[test]
    fn test_small_clusters_are_dropped_and_ids_are_ordinal() {
        let detector = HotspotDetector::default();
        // Pair far away (dropped), then two qualifying groups.
        record(&detector, "p1", 20_000.0, now());
        record(&detector, "p2", 20_010.0, now());
        for (i, user) in ["a1", "a2", "a3"].iter().enumerate() {
            record(&detector, user, i as f64 * 10.0, now());
        }
        for (i, user) in ["b1", "b2", "b3"].iter().enumerate() {
            record(&detector, user, 10_000.0 + i as f64 * 10.0, now());
        }

        let hotspots = detector.hotspots();
        let ids: Vec<&str> = hotspots.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["hotspot_1", "hotspot_2"]);
        assert_eq!(member_ids(&hotspots[0]), vec!["a1", "a2", "a3"]);
        assert_eq!(member_ids(&hotspots[1]), vec!["b1", "b2", "b3"]);
    }

    #[test]
    fn test_join_and_already_member() {
        let detector = HotspotDetector::default();
        record(&detector, "a", 0.0, now());
        record(&detector, "b", 10.0, now());
        record(&detector, "c", 20.0, now());

        let outcome = detector.join_hotspot("hotspot_1", "z", "Zed").unwrap();
        assert_eq!(outcome, JoinOutcome::Joined { tourist_count: 4 });

        let outcome = detector.join_hotspot("hotspot_1", "z", "Zed").unwrap();
        assert_eq!(outcome, JoinOutcome::AlreadyMember);

        let outcome = detector.join_hotspot("hotspot_1", "a", "Tourist a").unwrap();
        assert_eq!(outcome, JoinOutcome::AlreadyMember);

        let h = detector.hotspot("hotspot_1").unwrap();
        assert_eq!(h.member_count, 4);
        assert_eq!(h.members.iter().filter(|m| m.user_id == "z").count(), 1);
    }

    #[test]
    fn test_join_unknown_hotspot_fails() {
        let detector = HotspotDetector::default();
        let err = detector.join_hotspot("hotspot_9", "z", "Zed").unwrap_err();
        assert!(matches!(err, TourwatchError::HotspotNotFound(ref id) if id == "hotspot_9"));
        assert!(detector.hotspot("hotspot_9").is_none());
    }

    #[test]
    fn test_join_is_lost_on_next_recompute() {
        let detector = HotspotDetector::default();
        record(&detector, "a", 0.0, now());
        record(&detector, "b", 10.0, now());
        record(&detector, "c", 20.0, now());
        detector.join_hotspot("hotspot_1", "remote", "Remote").unwrap();

        record(&detector, "b", 15.0, now());
        let h = detector.hotspot("hotspot_1").unwrap();
        assert!(!h.has_member("remote"));
        assert_eq!(h.member_count, 3);
    }

    #[test]
    fn test_cleanup_stale_removes_only_stale() {
        let detector = HotspotDetector::default();
        record(&detector, "old", 0.0, now() - Duration::from_secs(3600));
        record(&detector, "new", 0.0, now());

        assert_eq!(detector.cleanup_stale(now()), 1);
        assert!(detector.position("old").is_none());
        assert!(detector.position("new").is_some());
        assert_eq!(detector.cleanup_stale(now()), 0);
    }

    #[test]
    fn test_recompute_ages_out_hotspots() {
        let detector = HotspotDetector::default();
        record(&detector, "a", 0.0, now());
        record(&detector, "b", 10.0, now());
        record(&detector, "c", 20.0, now());
        assert_eq!(detector.hotspot_count(), 1);

        detector.recompute(now() + Duration::from_secs(31 * 60));
        assert_eq!(detector.hotspot_count(), 0);
    }

    #[test]
    fn test_malformed_coordinates_are_stored() {
        let detector = HotspotDetector::default();
        detector.record_position("nan", GeoPoint::new(f64::NAN, 0.0), "NaN", now());
        record(&detector, "a", 0.0, now());
        record(&detector, "b", 10.0, now());
        record(&detector, "c", 20.0, now());

        assert_eq!(detector.tracked_positions(), 4);
        let hotspots = detector.hotspots();
        assert_eq!(hotspots.len(), 1);
        assert_eq!(member_ids(&hotspots[0]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_concurrent_updates_different_users() {
        use std::sync::Arc;
        use std::thread;

        let detector = Arc::new(HotspotDetector::default());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let detector = detector.clone();
                thread::spawn(move || {
                    for j in 0..50 {
                        detector.record_position(
                            &format!("user_{:02}", i),
                            north_of_seed(j as f64),
                            "Tourist",
                            now(),
                        );
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(detector.tracked_positions(), 8);
        // Final positions all lie within 49 m of the seed.
        let hotspots = detector.hotspots();
        assert_eq!(hotspots.len(), 1);
        assert_eq!(hotspots[0].member_count, 8);
    }
}
