use crate::point::GeoPoint;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// One entry in a user's recent movement trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub position: GeoPoint,
    #[serde(rename = "timestamp")]
    pub recorded_at: SystemTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MonitoringStatus {
    #[default]
    #[serde(rename = "No data available")]
    NoData,
    #[serde(rename = "Active monitoring")]
    Active,
}

/// Movement activity across all tracked users.
///
/// With no data only `status` is serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementSummary {
    #[serde(default, skip_serializing_if = "is_zero_users")]
    pub total_users: usize,
    /// Mean trail length per user, rounded to one decimal.
    #[serde(default, skip_serializing_if = "is_zero_movements")]
    pub average_movements: f64,
    pub status: MonitoringStatus,
}

// Every tracked user has at least one trail point, so both are zero only
// when nothing has been recorded.
fn is_zero_users(total_users: &usize) -> bool {
    *total_users == 0
}

fn is_zero_movements(average_movements: &f64) -> bool {
    *average_movements == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_strings() {
        let summary = MovementSummary::default();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "No data available" }));

        let active = MovementSummary {
            total_users: 2,
            average_movements: 1.5,
            status: MonitoringStatus::Active,
        };
        let json = serde_json::to_value(&active).unwrap();
        assert_eq!(json["status"], "Active monitoring");
        assert_eq!(json["total_users"], 2);
        assert_eq!(json["average_movements"], 1.5);

        let back: MovementSummary =
            serde_json::from_str(r#"{"status": "No data available"}"#).unwrap();
        assert_eq!(back, MovementSummary::default());
    }
}
