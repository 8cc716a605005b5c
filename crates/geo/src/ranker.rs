//! Proximity ranking of collection points.
//!
//! Distances are computed for every point (in parallel with the `parallel`
//! feature), then the points are stably sorted nearest first. The ranker is
//! a pure function of its inputs.

use crate::{distance_km, CollectionPoint, GeoCoordinate};
use serde::{Deserialize, Serialize};

/// Width of the grid cells used to order distances, kilometers.
///
/// Distances are quantized to `floor(d / DISTANCE_EPSILON_KM)`. Two distances
/// tie when they fall in the same cell, so values just under 2e-9 km apart
/// can tie while values closer than 1e-9 km on either side of a cell
/// boundary do not.
pub const DISTANCE_EPSILON_KM: f64 = 1e-9;

/// A collection point with its distance from a reference coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPoint {
    /// The ranked point
    #[serde(flatten)]
    pub point: CollectionPoint,
    /// Great-circle distance from the reference, kilometers
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

/// Result of [`rank`].
///
/// Serializes as a flat list of points; `distanceKm` is present only when
/// a reference coordinate was available.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Ranking {
    /// Sorted nearest first
    Nearest(Vec<RankedPoint>),
    /// No reference: catalog order, no distances
    CatalogOrder(Vec<CollectionPoint>),
}

impl Ranking {
    /// Number of entries.
    pub fn len(&self) -> usize {
        match self {
            Ranking::Nearest(points) => points.len(),
            Ranking::CatalogOrder(points) => points.len(),
        }
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ranked entries, if a reference was available.
    pub fn ranked(&self) -> Option<&[RankedPoint]> {
        match self {
            Ranking::Nearest(points) => Some(points),
            Ranking::CatalogOrder(_) => None,
        }
    }

    /// Iterates over `(point, distance)` pairs in output order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (&CollectionPoint, Option<f64>)> + '_> {
        match self {
            Ranking::Nearest(points) => {
                Box::new(points.iter().map(|r| (&r.point, Some(r.distance_km))))
            }
            Ranking::CatalogOrder(points) => Box::new(points.iter().map(|p| (p, None))),
        }
    }
}

/// Ranks `points` by distance from `reference`.
///
/// With a reference, every point gets a distance and the output is sorted
/// ascending; ties keep catalog order. Without one, the points come back
/// unchanged in catalog order.
///
/// # Example
/// ```
/// use recycling_geo::{rank, Catalog};
///
/// let catalog = Catalog::demo();
/// let ranking = rank(None, catalog.all());
/// assert!(ranking.ranked().is_none());
/// assert_eq!(ranking.len(), 3);
/// ```
pub fn rank(reference: Option<&GeoCoordinate>, points: &[CollectionPoint]) -> Ranking {
    match reference {
        Some(reference) => Ranking::Nearest(rank_by_distance(reference, points)),
        None => Ranking::CatalogOrder(points.to_vec()),
    }
}

/// The `limit` nearest points.
pub fn nearest(
    reference: &GeoCoordinate,
    points: &[CollectionPoint],
    limit: usize,
) -> Vec<RankedPoint> {
    let mut ranked = rank_by_distance(reference, points);
    ranked.truncate(limit);
    ranked
}

/// Points within `radius_km` of the reference, nearest first.
pub fn within_radius(
    reference: &GeoCoordinate,
    points: &[CollectionPoint],
    radius_km: f64,
) -> Vec<RankedPoint> {
    let mut ranked = rank_by_distance(reference, points);
    ranked.retain(|r| r.distance_km <= radius_km);
    ranked
}

fn rank_by_distance(reference: &GeoCoordinate, points: &[CollectionPoint]) -> Vec<RankedPoint> {
    let mut ranked = calculate_distances(reference, points);
    // Stable: equal cells keep insertion order.
    ranked.sort_by_key(|r| tie_cell(r.distance_km));
    ranked
}

/// Quantizes a distance onto the epsilon grid used for ordering.
#[inline]
fn tie_cell(distance_km: f64) -> u64 {
    // Distances are finite and bounded by half the circumference.
    (distance_km / DISTANCE_EPSILON_KM) as u64
}

fn calculate_distances(reference: &GeoCoordinate, points: &[CollectionPoint]) -> Vec<RankedPoint> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        points
            .par_iter()
            .map(|point| calculate_single_distance(reference, point))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        points
            .iter()
            .map(|point| calculate_single_distance(reference, point))
            .collect()
    }
}

#[inline]
fn calculate_single_distance(reference: &GeoCoordinate, point: &CollectionPoint) -> RankedPoint {
    RankedPoint {
        point: point.clone(),
        distance_km: distance_km(reference, &point.coordinate),
    }
}
