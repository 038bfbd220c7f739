//! PetroSphere - Petrology study assistant CLI
//!
#![doc = "PetroSphere - Petrology study assistant CLI"]
#![doc = "Main entry point for the PetroSphere application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use petrosphere::cli::{Cli, Commands, SizeArg, SpecimenCommand};
use petrosphere::commands;
use petrosphere::config::Config;
use petrosphere::gateway::ResolutionTier;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or("config/config.yaml".to_string());
    let config = Config::load(&config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { reasoning } => {
            tracing::info!("Starting interactive chat session");
            commands::chat::run_chat(config, reasoning).await?;
            Ok(())
        }
        Commands::Search { query } => {
            tracing::info!("Running grounded search");
            commands::search::run_search(config, &query).await?;
            Ok(())
        }
        Commands::Locate { query, lat, lng } => {
            tracing::info!("Running location query");
            commands::locate::run_locate(config, &query, lat, lng).await?;
            Ok(())
        }
        Commands::Generate {
            prompt,
            size,
            output,
        } => {
            tracing::info!("Synthesizing specimen image");
            commands::generate::run_generate(config, &prompt, tier_from_arg(size), &output)
                .await?;
            Ok(())
        }
        Commands::Edit {
            image,
            instruction,
            output,
        } => {
            tracing::info!("Editing specimen image");
            commands::edit::run_edit(config, &image, &instruction, &output).await?;
            Ok(())
        }
        Commands::Analyze {
            image,
            specimen,
            question,
        } => {
            tracing::info!("Analyzing thin-section view");
            commands::analyze::run_analyze(config, image, specimen, question).await?;
            Ok(())
        }
        Commands::Summarize { text } => {
            tracing::info!("Summarizing description");
            commands::summarize::run_summarize(config, &text).await?;
            Ok(())
        }
        Commands::Specimens { command } => match command {
            SpecimenCommand::List => {
                commands::specimens::list_specimens()?;
                Ok(())
            }
            SpecimenCommand::Show { id } => {
                commands::specimens::show_specimen(&id)?;
                Ok(())
            }
        },
        Commands::Auth => {
            tracing::info!("Starting credential selection");
            commands::auth::run_auth()?;
            Ok(())
        }
    }
}

/// Map the CLI size argument onto a gateway resolution tier
fn tier_from_arg(size: SizeArg) -> ResolutionTier {
    match size {
        SizeArg::OneK => ResolutionTier::OneK,
        SizeArg::TwoK => ResolutionTier::TwoK,
        SizeArg::FourK => ResolutionTier::FourK,
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("petrosphere=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
