//! Stats command - community and per-user recycling statistics

use crate::context::Context;
use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use recycling_api_client::stats::{CommunityStats, MaterialBreakdown};
use recycling_cli::output::{format_count, format_percent, percent_bar, Status};
use recycling_cli::progress;
use recycling_core::Error;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Statistics for one user instead of the community
    #[arg(short, long)]
    pub user: Option<u64>,
}

#[derive(Serialize)]
struct JsonUserStats {
    user_id: u64,
    points: u64,
    #[serde(flatten)]
    breakdown: MaterialBreakdown,
}

pub async fn run(ctx: &Context, args: StatsArgs) -> Result<()> {
    let client = ctx.client()?;
    let pb = ctx.spinner("Fetching discards...");

    let result = match args.user {
        Some(id) => client.discards().for_user(id).await,
        None => client.discards().community().await,
    };
    let discards = match result {
        Ok(discards) => discards,
        Err(e) => {
            progress::finish_error(&pb, "Fetching failed");
            return Err(Error::from(e).into());
        }
    };
    pb.finish_and_clear();

    match args.user {
        Some(user_id) => {
            let breakdown = MaterialBreakdown::from_discards(&discards);
            if ctx.is_json() {
                return ctx.print_json(&JsonUserStats {
                    user_id,
                    points: breakdown.points(),
                    breakdown,
                });
            }
            Status::header(&format!("Recycling by user {user_id}"));
            print_breakdown(&breakdown);
            println!("  {:<16} {}", "Points earned:".dimmed(), breakdown.points().green().bold());
            println!();
        }
        None => {
            let stats = CommunityStats::from_discards(&discards);
            if ctx.is_json() {
                return ctx.print_json(&stats);
            }
            print_community(&ctx.config.schema.general.app_name, &stats);
        }
    }

    Ok(())
}

fn print_breakdown(breakdown: &MaterialBreakdown) {
    println!(
        "  {:<16} {}",
        "Total:".dimmed(),
        format_count(breakdown.total_discards, "discard", "discards")
    );
    if breakdown.materials.is_empty() {
        return;
    }

    Status::subheader("  By material");
    for share in &breakdown.materials {
        println!(
            "  {:<12} {} {:>6}  ({})",
            share.material.label(),
            percent_bar(share.percentage, 20).green(),
            format_percent(share.percentage),
            share.count
        );
    }
    println!();
}

fn print_community(app_name: &str, stats: &CommunityStats) {
    Status::header(&format!("{app_name} community recycling"));
    print_breakdown(&stats.breakdown);

    println!("  {:<16} {}", "Contributors:".dimmed(), stats.contributors);
    println!("  {:<16} {}", "With GPS:".dimmed(), stats.with_gps);

    if !stats.by_month.is_empty() {
        Status::subheader("  By month");
        for month in &stats.by_month {
            println!("  {:<12} {}", month.month, month.discards);
        }
    }

    if !stats.top_contributors.is_empty() {
        Status::subheader("  Top contributors");
        for (rank, contributor) in stats.top_contributors.iter().enumerate() {
            println!(
                "  {}. user {:<6} {}  {} pts",
                rank + 1,
                contributor.user_id,
                format_count(contributor.discards, "discard", "discards"),
                contributor.points.green()
            );
        }
    }
    println!();
}
