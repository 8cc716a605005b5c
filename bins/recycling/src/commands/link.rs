//! Link command - map and directions URLs for a collection point

use crate::commands::nearby::locate;
use crate::context::{coordinate_arg, Context};
use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use recycling_core::{Error, ErrorCode};
use recycling_geo::links::{directions_from_state, view_on_map_url};
use recycling_geo::{FixedLocation, GeoError, LocationState, PointId};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Collection point id
    pub id: u64,

    /// Your latitude, for directions
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Your longitude, for directions
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Catalog file (JSON or TOML)
    #[arg(long)]
    pub catalog: Option<String>,
}

#[derive(Serialize)]
struct JsonLinkOutput<'a> {
    id: PointId,
    name: &'a str,
    view_on_map: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    directions: Option<String>,
}

pub async fn run(ctx: &Context, args: LinkArgs) -> Result<()> {
    let catalog = ctx.catalog(args.catalog.as_deref())?;
    let id = PointId(args.id);
    let point = catalog.get(id).ok_or_else(|| {
        Error::new(ErrorCode::CatalogError, format!("No collection point with id {id}"))
            .with_suggestion("Run `recycling nearby` to list point ids")
    })?;

    let state = match coordinate_arg(args.lat, args.lng)? {
        Some(at) => locate(FixedLocation(at), ctx.location_timeout()).await,
        None => LocationState::Unknown,
    };

    let directions = match directions_from_state(&state, &point.coordinate) {
        Ok(url) => Some(url),
        Err(GeoError::LocationRequired) => None,
        Err(e) => return Err(e.into()),
    };
    let view_on_map = view_on_map_url(&point.coordinate);

    if ctx.is_json() {
        return ctx.print_json(&JsonLinkOutput {
            id,
            name: &point.name,
            view_on_map,
            directions,
        });
    }

    println!();
    println!("  {}", point.name.bold());
    println!("  {}", point.address.dimmed());
    println!();
    println!("  {:<12} {}", "Map:".dimmed(), view_on_map);
    match directions {
        Some(url) => println!("  {:<12} {}", "Directions:".dimmed(), url),
        None => println!(
            "  {:<12} {}",
            "Directions:".dimmed(),
            "pass --lat and --lng to get directions".yellow()
        ),
    }
    println!();

    Ok(())
}
