use std::sync::Arc;

use civic_report::complaints::{categorize, OpenAiChatClient, PriorityScorer};
use civic_report::config::AppConfig;
use civic_report::error::AppError;
use civic_report::telemetry;
use clap::Args;

#[derive(Args, Debug)]
pub(crate) struct TriageArgs {
    /// Complaint title
    #[arg(long)]
    pub(crate) title: String,
    /// Complaint description
    #[arg(long)]
    pub(crate) description: String,
    /// Optional photo URL forwarded to the scorer
    #[arg(long)]
    pub(crate) photo_url: Option<String>,
}

/// Run the classifier and scorer once against command-line input.
///
/// Without a scoring credential configured the collaborator call fails and
/// the fallback priority is printed, which doubles as a demo of the outage
/// path.
pub(crate) async fn run_triage(args: TriageArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let category = categorize(&args.title, &args.description);

    let client = Arc::new(OpenAiChatClient::from_config(&config.scoring)?);
    let scorer = PriorityScorer::new(client, config.scoring.model.clone());
    let priority = scorer
        .score(&args.title, &args.description, args.photo_url.as_deref())
        .await;

    println!("title:     {}", args.title);
    println!("category:  {}", category.label());
    println!("priority:  {priority}");

    Ok(())
}
