use crate::point::{GeoPoint, Located};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Latest reported position of a single user.
///
/// The detector keeps at most one of these per `user_id`; a new report
/// replaces the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouristPosition {
    pub user_id: String,
    pub position: GeoPoint,
    #[serde(rename = "name")]
    pub display_name: String,
    pub observed_at: SystemTime,
}

impl TouristPosition {
    pub fn new(
        user_id: impl Into<String>,
        position: GeoPoint,
        display_name: impl Into<String>,
        observed_at: SystemTime,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            position,
            display_name: display_name.into(),
            observed_at,
        }
    }

    /// Whether this position is strictly younger than `window` at `now`.
    ///
    /// A timestamp in the future of `now` counts as age zero.
    pub fn is_fresh_at(&self, now: SystemTime, window: std::time::Duration) -> bool {
        let age = now.duration_since(self.observed_at).unwrap_or_default();
        age < window
    }

    pub fn member(&self) -> HotspotMember {
        HotspotMember {
            user_id: self.user_id.clone(),
            name: self.display_name.clone(),
        }
    }
}

impl Located for TouristPosition {
    fn location(&self) -> GeoPoint {
        self.position
    }
}

/// A user listed in a hotspot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotspotMember {
    pub user_id: String,
    pub name: String,
}

/// A dense group of recently reported tourists.
///
/// Hotspots are rebuilt from scratch on every detection cycle. The `id`
/// (`hotspot_<n>`) only reflects discovery order within one cycle and must
/// not be treated as a stable identity across cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub id: String,
    #[serde(rename = "lat")]
    pub center_lat: f64,
    #[serde(rename = "lng")]
    pub center_lng: f64,
    #[serde(rename = "tourist_count")]
    pub member_count: usize,
    #[serde(rename = "tourists")]
    pub members: Vec<HotspotMember>,
    /// Serialized as serde's `{secs_since_epoch, nanos_since_epoch}`; format
    /// it as ISO 8601 at the request layer if clients expect a string.
    pub created_at: SystemTime,
    #[serde(rename = "radius")]
    pub radius_meters: u32,
}

impl Hotspot {
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.center_lat, self.center_lng)
    }

    pub fn has_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m.user_id == user_id)
    }
}

impl Located for Hotspot {
    fn location(&self) -> GeoPoint {
        self.center()
    }
}
