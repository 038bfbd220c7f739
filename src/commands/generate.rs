//! Specimen image synthesis handler

use crate::config::Config;
use crate::error::Result;
use crate::gateway::{ModelGateway, ResolutionTier};
use colored::Colorize;
use std::path::Path;

/// Synthesize a specimen image and write it to disk
///
/// A successful call that returns no image is an explicit empty state,
/// not a failure.
pub async fn run_generate(
    config: Config,
    prompt: &str,
    tier: ResolutionTier,
    output: &Path,
) -> Result<()> {
    let gateway = ModelGateway::new(config.gateway)?;

    match gateway.synthesize_image(prompt, tier).await {
        Ok(Some(generated)) => {
            if let Err(e) = generated.image.validate() {
                tracing::error!("Generated payload failed validation: {}", e);
                println!("{}", "The model returned an undecodable image.".red());
                return Ok(());
            }
            generated.image.save(output)?;
            println!(
                "{} {} ({} tier, {})",
                "Saved".green().bold(),
                output.display(),
                generated.tier,
                generated.image.mime_type
            );
            Ok(())
        }
        Ok(None) => {
            println!("The model returned no image for this prompt. Try rephrasing it.");
            Ok(())
        }
        Err(e) => {
            tracing::error!("synthesize_image failed: {}", e);
            println!(
                "{}",
                "Error generating image. Ensure you've selected an API key if prompted.".red()
            );
            Ok(())
        }
    }
}
