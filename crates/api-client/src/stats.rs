//! Aggregate statistics over logged discards
//!
//! Everything here is computed locally from the records the backend returns.

use crate::endpoints::{DiscardRecord, POINTS_PER_DISCARD};
use recycling_geo::MaterialType;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Number of contributors listed in [`CommunityStats::top_contributors`]
pub const TOP_CONTRIBUTORS: usize = 5;

/// Share of one material within a set of discards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialShare {
    /// Material
    pub material: MaterialType,
    /// Number of discards
    pub count: usize,
    /// Percentage of all discards, 0..=100
    pub percentage: f64,
}

/// Discard counts per material
///
/// Tags the backend stores outside the known set count as
/// [`MaterialType::Other`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaterialBreakdown {
    /// Number of discards considered
    pub total_discards: usize,
    /// Materials by count descending, ties in canonical material order
    pub materials: Vec<MaterialShare>,
}

impl MaterialBreakdown {
    /// Build the breakdown for a set of discards
    pub fn from_discards(discards: &[DiscardRecord]) -> Self {
        let mut counts: BTreeMap<MaterialType, usize> = BTreeMap::new();
        for discard in discards {
            let material = discard.material().unwrap_or(MaterialType::Other);
            *counts.entry(material).or_default() += 1;
        }

        let total = discards.len();
        let mut materials: Vec<MaterialShare> = counts
            .into_iter()
            .map(|(material, count)| MaterialShare {
                material,
                count,
                percentage: percentage(count, total),
            })
            .collect();
        // BTreeMap iteration already yields canonical order; a stable sort keeps it for ties
        materials.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            total_discards: total,
            materials,
        }
    }

    /// Count for one material
    pub fn count(&self, material: MaterialType) -> usize {
        self.materials
            .iter()
            .find(|share| share.material == material)
            .map_or(0, |share| share.count)
    }

    /// Points earned for these discards
    pub fn points(&self) -> u64 {
        self.total_discards as u64 * u64::from(POINTS_PER_DISCARD)
    }
}

/// Discards logged in one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    /// Month as `YYYY-MM`
    pub month: String,
    /// Number of discards
    pub discards: usize,
}

/// A contributor ranked by logged discards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contributor {
    /// User identifier
    pub user_id: u64,
    /// Number of discards
    pub discards: usize,
    /// Points earned from those discards
    pub points: u64,
}

/// Community-wide statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommunityStats {
    /// Per-material breakdown
    #[serde(flatten)]
    pub breakdown: MaterialBreakdown,
    /// Distinct users with at least one discard
    pub contributors: usize,
    /// Discards carrying a valid GPS fix
    pub with_gps: usize,
    /// Discards per month, oldest first
    pub by_month: Vec<MonthlyCount>,
    /// Most active users, at most [`TOP_CONTRIBUTORS`]
    pub top_contributors: Vec<Contributor>,
}

impl CommunityStats {
    /// Aggregate a community discard listing
    pub fn from_discards(discards: &[DiscardRecord]) -> Self {
        let breakdown = MaterialBreakdown::from_discards(discards);

        let contributors: BTreeSet<u64> = discards.iter().filter_map(|d| d.user_id).collect();

        let with_gps = discards
            .iter()
            .filter(|d| matches!(d.gps(), Ok(Some(_))))
            .count();

        let mut months: BTreeMap<String, usize> = BTreeMap::new();
        for discard in discards {
            *months
                .entry(discard.timestamp.format("%Y-%m").to_string())
                .or_default() += 1;
        }
        let by_month = months
            .into_iter()
            .map(|(month, discards)| MonthlyCount { month, discards })
            .collect();

        let mut per_user: HashMap<u64, usize> = HashMap::new();
        for user_id in discards.iter().filter_map(|d| d.user_id) {
            *per_user.entry(user_id).or_default() += 1;
        }
        let mut top_contributors: Vec<Contributor> = per_user
            .into_iter()
            .map(|(user_id, discards)| Contributor {
                user_id,
                discards,
                points: discards as u64 * u64::from(POINTS_PER_DISCARD),
            })
            .collect();
        top_contributors.sort_by(|a, b| b.discards.cmp(&a.discards).then(a.user_id.cmp(&b.user_id)));
        top_contributors.truncate(TOP_CONTRIBUTORS);

        Self {
            breakdown,
            contributors: contributors.len(),
            with_gps,
            by_month,
            top_contributors,
        }
    }

    /// Total number of discards
    pub fn total_discards(&self) -> usize {
        self.breakdown.total_discards
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn discard(id: u64, user: u64, material: &str, when: &str) -> DiscardRecord {
        DiscardRecord {
            id,
            user_id: Some(user),
            material_type: material.to_string(),
            quantity: None,
            location_manual: None,
            location_gps_lat: None,
            location_gps_lon: None,
            timestamp: NaiveDateTime::parse_from_str(when, "%Y-%m-%dT%H:%M:%S").unwrap(),
        }
    }

    fn sample() -> Vec<DiscardRecord> {
        let mut with_fix = discard(5, 2, "glass", "2024-06-01T09:00:00");
        with_fix.location_gps_lat = Some(-23.55);
        with_fix.location_gps_lon = Some(-46.63);

        let mut bad_fix = discard(6, 3, "paper", "2024-06-02T09:00:00");
        bad_fix.location_gps_lat = Some(123.0);
        bad_fix.location_gps_lon = Some(0.0);

        vec![
            discard(1, 1, "plastic", "2024-05-01T10:00:00"),
            discard(2, 1, "plastic", "2024-05-03T10:00:00"),
            discard(3, 2, "paper", "2024-05-20T10:00:00"),
            discard(4, 1, "plastico", "2024-06-01T10:00:00"),
            with_fix,
            bad_fix,
            discard(7, 4, "styrofoam", "2024-07-01T10:00:00"),
        ]
    }

    #[test]
    fn test_empty() {
        let stats = CommunityStats::from_discards(&[]);
        assert_eq!(stats.total_discards(), 0);
        assert!(stats.breakdown.materials.is_empty());
        assert_eq!(stats.contributors, 0);
        assert!(stats.top_contributors.is_empty());
    }

    #[test]
    fn test_material_breakdown_order() {
        let breakdown = MaterialBreakdown::from_discards(&sample());
        let order: Vec<(MaterialType, usize)> = breakdown
            .materials
            .iter()
            .map(|s| (s.material, s.count))
            .collect();

        assert_eq!(
            order,
            vec![
                (MaterialType::Plastic, 3),
                (MaterialType::Paper, 2),
                (MaterialType::Glass, 1),
                (MaterialType::Other, 1),
            ]
        );
        assert_eq!(breakdown.count(MaterialType::Metal), 0);
        assert_eq!(breakdown.points(), 70);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let breakdown = MaterialBreakdown::from_discards(&sample());
        let sum: f64 = breakdown.materials.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!((breakdown.materials[0].percentage - 300.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_community_stats() {
        let stats = CommunityStats::from_discards(&sample());
        assert_eq!(stats.total_discards(), 7);
        assert_eq!(stats.contributors, 4);
        assert_eq!(stats.with_gps, 1);
        assert_eq!(
            stats.by_month,
            vec![
                MonthlyCount { month: "2024-05".into(), discards: 3 },
                MonthlyCount { month: "2024-06".into(), discards: 3 },
                MonthlyCount { month: "2024-07".into(), discards: 1 },
            ]
        );
        assert_eq!(
            stats.top_contributors[0],
            Contributor { user_id: 1, discards: 3, points: 30 }
        );
        assert_eq!(stats.top_contributors[1].user_id, 2);
        // users 3 and 4 tie on one discard each
        assert_eq!(stats.top_contributors[2].user_id, 3);
        assert_eq!(stats.top_contributors[3].user_id, 4);
    }

    #[test]
    fn test_serializes_flat() {
        let json = serde_json::to_value(CommunityStats::from_discards(&sample())).unwrap();
        assert_eq!(json["total_discards"], 7);
        assert_eq!(json["materials"][0]["material"], "plastic");
    }
}
