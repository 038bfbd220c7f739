//! Description summarization handler

use crate::config::Config;
use crate::error::Result;
use crate::gateway::ModelGateway;
use colored::Colorize;

/// Condense a geological description and print the key points
pub async fn run_summarize(config: Config, text: &str) -> Result<()> {
    let gateway = ModelGateway::new(config.gateway)?;

    match gateway.summarize(text).await {
        Ok(summary) => {
            println!("{}", "Key Points".bold().underline());
            println!("{}", summary);
            Ok(())
        }
        Err(e) => {
            tracing::error!("summarize failed: {}", e);
            println!("{}", "Summary failed. Please try again.".red());
            Ok(())
        }
    }
}
