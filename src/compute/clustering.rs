//! Proximity grouping over small, frequently rebuilt point sets.
//!
//! Both passes are quadratic in the worst case and return groups as lists of
//! indices into the input slice, in discovery order. Neither pass computes a
//! transitive closure: membership is always decided against one fixed point
//! per group (the seed or the anchor).

use super::distance::{DistanceMetric, within_radius};
use tourwatch_types::point::Located;

/// Seed-only proximity clustering.
///
/// Walks `items` in order. Each item not yet assigned becomes the seed of a
/// new cluster, and every later unassigned item within `radius_km` of that
/// seed joins it. Distance to other members is never considered, so two
/// items 0.4 km apart can land in different clusters when only one of them is
/// close enough to the seed.
///
/// Every item ends up in exactly one cluster; callers drop the small ones.
///
/// ```
/// use tourwatch::compute::{seed_clusters, DistanceMetric};
/// use tourwatch::GeoPoint;
///
/// let points = vec![
///     GeoPoint::new(0.0, 0.0),
///     GeoPoint::new(0.0, 0.004),  // ~445 m east of the seed
///     GeoPoint::new(0.0, 0.008),  // ~890 m from the seed, ~445 m from its neighbour
/// ];
/// let clusters = seed_clusters(&points, 0.5, DistanceMetric::Haversine);
/// assert_eq!(clusters, vec![vec![0, 1], vec![2]]);
/// ```
pub fn seed_clusters<T: Located>(
    items: &[T],
    radius_km: f64,
    metric: DistanceMetric,
) -> Vec<Vec<usize>> {
    let mut assigned = vec![false; items.len()];
    let mut clusters = Vec::new();

    for seed_idx in 0..items.len() {
        if assigned[seed_idx] {
            continue;
        }
        assigned[seed_idx] = true;

        let seed = items[seed_idx].location();
        let mut cluster = vec![seed_idx];

        // Everything before seed_idx is already assigned.
        for candidate_idx in (seed_idx + 1)..items.len() {
            if assigned[candidate_idx] {
                continue;
            }
            if within_radius(&seed, &items[candidate_idx].location(), radius_km, metric) {
                assigned[candidate_idx] = true;
                cluster.push(candidate_idx);
            }
        }

        clusters.push(cluster);
    }

    clusters
}

/// First-fit anchor grouping.
///
/// Walks `items` in order and puts each one into the *first* existing group
/// whose anchor (the group's first item) lies within `radius_km`, testing
/// groups in creation order. An item that fits nowhere anchors a new group.
/// A closer anchor created later never wins over an earlier one that
/// qualifies.
pub fn first_fit_groups<T: Located>(
    items: &[T],
    radius_km: f64,
    metric: DistanceMetric,
) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for (idx, item) in items.iter().enumerate() {
        let location = item.location();
        let target = groups.iter_mut().find(|group| {
            let anchor = items[group[0]].location();
            within_radius(&location, &anchor, radius_km, metric)
        });

        match target {
            Some(group) => group.push(idx),
            None => groups.push(vec![idx]),
        }
    }

    groups
}
