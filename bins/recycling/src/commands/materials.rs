//! Materials command - list material types

use crate::context::Context;
use anyhow::Result;
use owo_colors::OwoColorize;
use recycling_geo::MaterialType;
use serde::Serialize;

#[derive(Serialize)]
struct MaterialDetail {
    tag: &'static str,
    label: &'static str,
}

pub fn run(ctx: &Context) -> Result<()> {
    let materials: Vec<MaterialDetail> = MaterialType::all()
        .iter()
        .map(|m| MaterialDetail {
            tag: m.as_str(),
            label: m.label(),
        })
        .collect();

    if ctx.is_json() {
        return ctx.print_json(&materials);
    }

    println!();
    println!("  {:<12} {}", "Tag".dimmed(), "Label".dimmed());
    for material in &materials {
        println!("  {:<12} {}", material.tag.green(), material.label);
    }
    println!();

    Ok(())
}
