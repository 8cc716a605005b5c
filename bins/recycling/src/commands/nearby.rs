//! Nearby command - rank collection points by distance

use crate::context::{coordinate_arg, Context};
use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use recycling_cli::output::{format_count, format_distance, Status};
use recycling_core::Error;
use recycling_geo::links::view_on_map_url;
use recycling_geo::{
    nearest, within_radius, CollectionPoint, FixedLocation, LocationProvider, LocationSession,
    LocationState, MaterialType, NoLocation, Ranking,
};
use recycling_telemetry::Timer;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Args, Debug)]
pub struct NearbyArgs {
    /// Your latitude in degrees
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Your longitude in degrees
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Only points accepting this material
    #[arg(short, long)]
    pub material: Option<MaterialType>,

    /// Show at most this many points
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Only points within this many kilometres (needs a location)
    #[arg(short, long)]
    pub radius: Option<f64>,

    /// Catalog file (JSON or TOML)
    #[arg(long)]
    pub catalog: Option<String>,
}

#[derive(Serialize)]
struct JsonNearbyOutput<'a> {
    location: &'a LocationState,
    total: usize,
    points: &'a Ranking,
}

/// Resolve the user's location through a session and report the final state
pub(crate) async fn locate<P: LocationProvider>(provider: P, timeout: Duration) -> LocationState {
    let session = LocationSession::with_timeout(provider, timeout);
    let timer = Timer::start("locate");
    match session.request().await {
        Ok(at) => info!(%at, "Location acquired"),
        Err(e) => debug!(error = %e, "No location, falling back to catalog order"),
    }
    timer.stop();
    session.state()
}

pub async fn run(ctx: &Context, args: NearbyArgs) -> Result<()> {
    if let Some(radius) = args.radius {
        if !radius.is_finite() || radius < 0.0 {
            return Err(Error::validation(format!(
                "radius must be a non-negative number of km, got {radius}"
            ))
            .into());
        }
    }

    let catalog = ctx.catalog(args.catalog.as_deref())?;
    let points: Vec<CollectionPoint> = match args.material {
        Some(material) => catalog.accepting(material),
        None => catalog.all().to_vec(),
    };

    let state = match coordinate_arg(args.lat, args.lng)? {
        Some(at) => locate(FixedLocation(at), ctx.location_timeout()).await,
        None => {
            locate(
                NoLocation::unavailable("no coordinates given"),
                ctx.location_timeout(),
            )
            .await
        }
    };

    let ranking = select(&state, points, args.radius, args.limit);

    if ctx.is_json() {
        return ctx.print_json(&JsonNearbyOutput {
            location: &state,
            total: ranking.len(),
            points: &ranking,
        });
    }

    print_text(&state, &ranking, args.radius, args.material);
    Ok(())
}

fn select(
    state: &LocationState,
    points: Vec<CollectionPoint>,
    radius: Option<f64>,
    limit: Option<usize>,
) -> Ranking {
    match state.reference() {
        Some(reference) => {
            let mut ranked = match radius {
                Some(radius) => within_radius(&reference, &points, radius),
                None => nearest(&reference, &points, limit.unwrap_or(points.len())),
            };
            if let Some(limit) = limit {
                ranked.truncate(limit);
            }
            Ranking::Nearest(ranked)
        }
        None => {
            let mut points = points;
            if let Some(limit) = limit {
                points.truncate(limit);
            }
            Ranking::CatalogOrder(points)
        }
    }
}

fn print_text(
    state: &LocationState,
    ranking: &Ranking,
    radius: Option<f64>,
    material: Option<MaterialType>,
) {
    match state.reference() {
        Some(at) => Status::header(&format!("Collection points near {at}")),
        None => {
            Status::header("Collection points");
            Status::warning("Location unknown, showing catalog order (pass --lat and --lng)");
            if radius.is_some() {
                Status::warning("--radius ignored without a location");
            }
        }
    }

    if ranking.is_empty() {
        let filter = material.map_or(String::new(), |m| format!(" accepting {}", m.label()));
        Status::info(&format!("No collection points{filter}"));
        return;
    }

    for (index, (point, distance)) in ranking.iter().enumerate() {
        let distance =
            distance.map_or(String::new(), |km| format!("  {}", format_distance(km).cyan()));
        println!();
        println!("  {}. {}{}", index + 1, point.name.bold(), distance);
        println!("     {}", point.address.dimmed());

        let materials: Vec<&str> = point.materials.iter().map(MaterialType::label).collect();
        println!("     Accepts: {}", materials.join(", "));
        println!("     {} {}", "Map:".dimmed(), view_on_map_url(&point.coordinate));
    }

    println!();
    println!("  {}", format_count(ranking.len(), "point", "points").dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;
    use recycling_geo::{Catalog, GeoCoordinate, PointId};

    fn ids(ranking: &Ranking) -> Vec<u64> {
        ranking.iter().map(|(p, _)| p.id.0).collect()
    }

    #[tokio::test]
    async fn test_locate_fixed() {
        let at = GeoCoordinate::new(-23.5489, -46.6388).unwrap();
        let state = locate(FixedLocation(at), Duration::from_secs(1)).await;
        assert_eq!(state, LocationState::Acquired(at));
    }

    #[tokio::test]
    async fn test_locate_none() {
        let state = locate(NoLocation::unavailable("off"), Duration::from_secs(1)).await;
        assert_eq!(state, LocationState::Unavailable);
    }

    #[test]
    fn test_select_nearest_first() {
        let at = GeoCoordinate::new(-23.5489, -46.6388).unwrap();
        let state = LocationState::Acquired(at);
        let ranking = select(&state, Catalog::demo().all().to_vec(), None, None);
        assert_eq!(ids(&ranking), vec![2, 3, 1]);
    }

    #[test]
    fn test_select_limit_and_radius() {
        let at = GeoCoordinate::new(-23.5489, -46.6388).unwrap();
        let state = LocationState::Acquired(at);
        let points = Catalog::demo().all().to_vec();

        assert_eq!(ids(&select(&state, points.clone(), None, Some(2))), vec![2, 3]);
        assert_eq!(ids(&select(&state, points.clone(), Some(1.0), None)), vec![2]);
        assert_eq!(ids(&select(&state, points, Some(50.0), Some(1))), vec![2]);
    }

    #[test]
    fn test_select_without_location() {
        let points = Catalog::demo().all().to_vec();
        let ranking = select(&LocationState::Unavailable, points, Some(1.0), Some(2));
        assert!(ranking.ranked().is_none());
        assert_eq!(ids(&ranking), vec![1, 2]);
        assert!(ranking.iter().all(|(p, _)| p.id != PointId(3)));
    }
}
