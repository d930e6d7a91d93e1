//! Plot layout command.

use clap::Args;
use serde::Serialize;
use taskradar_core::{Config, PlotCanvas, PlotLayout, TaskQuery, TaskStore};

#[derive(Args)]
pub struct PlotArgs {
    /// Canvas width (default from config)
    #[arg(long)]
    width: Option<f64>,
    /// Canvas height (default from config)
    #[arg(long)]
    height: Option<f64>,
    /// Interior padding (default from config)
    #[arg(long)]
    padding: Option<f64>,
    /// Only plot tasks assigned to these members (repeatable)
    #[arg(long = "member")]
    members: Vec<String>,
}

/// Layout plus marker sizes in canvas units.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlotOutput {
    #[serde(flatten)]
    layout: PlotLayout,
    marker_sizes: Vec<MarkerSize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkerSize {
    task_id: String,
    size: f64,
}

pub fn run(args: PlotArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let canvas = PlotCanvas::new(
        args.width.unwrap_or(config.plot.width),
        args.height.unwrap_or(config.plot.height),
        args.padding.unwrap_or(config.plot.padding),
    )?;
    let scale = config.plot.marker_scale();

    let tasks = TaskStore::open()?.list()?;
    let query = TaskQuery {
        members: args.members,
        ..Default::default()
    };
    let selected: Vec<_> = query.apply(&tasks).into_iter().cloned().collect();

    let layout = canvas.layout(&selected);
    let marker_sizes = layout
        .points
        .iter()
        .map(|p| MarkerSize {
            task_id: p.task_id.clone(),
            size: scale.size(p.relative_size),
        })
        .collect();

    let output = PlotOutput {
        layout,
        marker_sizes,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
