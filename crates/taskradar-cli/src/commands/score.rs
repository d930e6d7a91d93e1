//! Dry-run scoring for a piece of text.

use clap::Args;
use taskradar_core::KeywordScorer;

#[derive(Args)]
pub struct ScoreArgs {
    /// Task title
    title: String,
    /// Task description
    #[arg(long)]
    description: Option<String>,
}

pub fn run(args: ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.title.trim().is_empty() {
        return Err(taskradar_core::ValidationError::EmptyTitle.into());
    }
    let explanation = KeywordScorer::new().explain(&args.title, args.description.as_deref());
    println!("{}", serde_json::to_string_pretty(&explanation)?);
    Ok(())
}
