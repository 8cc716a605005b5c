//! User command - register and look up users

use crate::context::Context;
use anyhow::Result;
use clap::Subcommand;
use owo_colors::OwoColorize;
use recycling_api_client::endpoints::{NewUser, User};
use recycling_cli::output::Status;
use recycling_cli::progress;
use recycling_core::Error;

#[derive(Subcommand, Debug)]
pub enum UserAction {
    /// Register a new user
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Age in years
        #[arg(long)]
        age: Option<u32>,

        /// Neighborhood
        #[arg(long)]
        neighborhood: Option<String>,

        /// City
        #[arg(long)]
        city: Option<String>,
    },

    /// Show a user's profile and points
    Show {
        /// User id
        id: u64,
    },
}

pub async fn run(ctx: &Context, action: UserAction) -> Result<()> {
    match action {
        UserAction::Create { name, age, neighborhood, city } => {
            if name.trim().is_empty() {
                return Err(Error::validation("name cannot be empty").into());
            }
            let mut user = NewUser::new(name.trim());
            user.age = age;
            user.neighborhood = neighborhood;
            user.city = city;
            create(ctx, &user).await
        }
        UserAction::Show { id } => show(ctx, id).await,
    }
}

async fn create(ctx: &Context, user: &NewUser) -> Result<()> {
    let client = ctx.client()?;
    let pb = ctx.spinner("Registering user...");

    let created = match client.users().create(user).await {
        Ok(created) => created,
        Err(e) => {
            progress::finish_error(&pb, "Registration failed");
            return Err(Error::from(e).into());
        }
    };
    pb.finish_and_clear();

    if ctx.is_json() {
        return ctx.print_json(&created);
    }

    Status::success(&format!("{} (user id {})", created.message, created.user_id.bold()));
    Ok(())
}

async fn show(ctx: &Context, id: u64) -> Result<()> {
    let client = ctx.client()?;
    let pb = ctx.spinner("Fetching user...");

    let user = match client.users().get(id).await {
        Ok(user) => user,
        Err(e) => {
            progress::finish_error(&pb, "Lookup failed");
            return Err(Error::from(e).into());
        }
    };
    pb.finish_and_clear();

    if ctx.is_json() {
        return ctx.print_json(&user);
    }

    print_profile(&user);
    Ok(())
}

fn print_profile(user: &User) {
    Status::header(&user.name);
    let dash = || "-".to_string();
    println!("  {:<14} {}", "Id:".dimmed(), user.id);
    println!("  {:<14} {}", "Age:".dimmed(), user.age.map_or_else(dash, |a| a.to_string()));
    println!(
        "  {:<14} {}",
        "Neighborhood:".dimmed(),
        user.neighborhood.clone().unwrap_or_else(dash)
    );
    println!("  {:<14} {}", "City:".dimmed(), user.city.clone().unwrap_or_else(dash));
    println!("  {:<14} {}", "Points:".dimmed(), user.points.green().bold());
    println!();
}
