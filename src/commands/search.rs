//! Grounded knowledge search handler

use crate::commands::print_citations;
use crate::config::Config;
use crate::error::Result;
use crate::gateway::ModelGateway;
use colored::Colorize;

/// Run one grounded search and render the answer with its sources
///
/// A failed call is recovered here: the notice is blocking (no partial
/// results are shown) and the user repeats the search if they want to
/// retry.
pub async fn run_search(config: Config, query: &str) -> Result<()> {
    let gateway = ModelGateway::new(config.gateway)?;

    match gateway.search_grounded(query).await {
        Ok(result) => {
            println!("{}", "Geological Insights".bold().underline());
            println!("{}", result.answer);
            print_citations(&result.citations);
            Ok(())
        }
        Err(e) => {
            tracing::error!("search_grounded failed: {}", e);
            println!("{}", "Search failed. Please try again.".red());
            Ok(())
        }
    }
}
