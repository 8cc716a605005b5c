//! Discard command - log and list discards

use crate::context::{coordinate_arg, Context};
use anyhow::Result;
use clap::Subcommand;
use owo_colors::OwoColorize;
use recycling_api_client::endpoints::{DiscardRecord, NewDiscard, POINTS_PER_DISCARD};
use recycling_cli::output::{format_count, Status};
use recycling_cli::progress;
use recycling_core::Error;
use recycling_geo::MaterialType;

#[derive(Subcommand, Debug)]
pub enum DiscardAction {
    /// Log a discard and earn points
    Log {
        /// User id
        #[arg(short, long)]
        user: u64,

        /// Material discarded
        #[arg(short, long)]
        material: MaterialType,

        /// Quantity, e.g. "2 kg"
        #[arg(short, long)]
        quantity: Option<String>,

        /// Where it was discarded
        #[arg(short, long)]
        place: Option<String>,

        /// GPS latitude
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// GPS longitude
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
    },

    /// List discards, community-wide unless a user is given
    List {
        /// Only this user's discards
        #[arg(short, long)]
        user: Option<u64>,
    },
}

pub async fn run(ctx: &Context, action: DiscardAction) -> Result<()> {
    match action {
        DiscardAction::Log { user, material, quantity, place, lat, lng } => {
            let mut discard = NewDiscard::new(user, material);
            if let Some(quantity) = quantity {
                discard = discard.with_quantity(quantity);
            }
            if let Some(place) = place {
                discard = discard.with_location_manual(place);
            }
            if let Some(at) = coordinate_arg(lat, lng)? {
                discard = discard.with_gps(at);
            }
            log(ctx, &discard).await
        }
        DiscardAction::List { user } => list(ctx, user).await,
    }
}

async fn log(ctx: &Context, discard: &NewDiscard) -> Result<()> {
    let client = ctx.client()?;
    let pb = ctx.spinner("Logging discard...");

    let created = match client.discards().log(discard).await {
        Ok(created) => created,
        Err(e) => {
            progress::finish_error(&pb, "Logging failed");
            return Err(Error::from(e).into());
        }
    };
    pb.finish_and_clear();

    if ctx.is_json() {
        return ctx.print_json(&created);
    }

    Status::success(&format!("{} (discard id {})", created.message, created.discard_id));
    Status::info(&format!("+{POINTS_PER_DISCARD} points for user {}", discard.user_id));
    Ok(())
}

async fn list(ctx: &Context, user: Option<u64>) -> Result<()> {
    let client = ctx.client()?;
    let pb = ctx.spinner("Fetching discards...");

    let result = match user {
        Some(id) => client.discards().for_user(id).await,
        None => client.discards().community().await,
    };
    let discards = match result {
        Ok(discards) => discards,
        Err(e) => {
            progress::finish_error(&pb, "Listing failed");
            return Err(Error::from(e).into());
        }
    };
    pb.finish_and_clear();

    if ctx.is_json() {
        return ctx.print_json(&discards);
    }

    match user {
        Some(id) => Status::header(&format!("Discards by user {id}")),
        None => Status::header("Community discards"),
    }
    for discard in &discards {
        print_discard(discard);
    }
    println!();
    println!("  {}", format_count(discards.len(), "discard", "discards").dimmed());
    Ok(())
}

fn print_discard(discard: &DiscardRecord) {
    let material = discard
        .material()
        .map_or_else(|_| discard.material_type.clone(), |m| m.label().to_string());
    let when = discard.timestamp.format("%Y-%m-%d %H:%M");

    let mut line = format!("  {}  {:<10}", when.to_string().dimmed(), material.green());
    if let Some(quantity) = &discard.quantity {
        line.push_str(&format!("  {quantity}"));
    }
    if let Some(place) = &discard.location_manual {
        line.push_str(&format!("  @ {place}"));
    }
    if let Ok(Some(at)) = discard.gps() {
        line.push_str(&format!("  ({at})"));
    }
    if let Some(user) = discard.user_id {
        line.push_str(&format!("  {}", format!("user {user}").dimmed()));
    }
    println!("{line}");
}
