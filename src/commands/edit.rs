//! Specimen image editing handler

use crate::config::Config;
use crate::error::Result;
use crate::gateway::ModelGateway;
use crate::media::ImagePayload;
use colored::Colorize;
use std::path::Path;

/// Edit a source image with an instruction and write the result to disk
pub async fn run_edit(
    config: Config,
    image: &Path,
    instruction: &str,
    output: &Path,
) -> Result<()> {
    let source = match ImagePayload::from_file(image) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("Failed to load source image: {}", e);
            println!("{} {}", "Cannot read source image:".red(), e);
            return Ok(());
        }
    };

    let gateway = ModelGateway::new(config.gateway)?;

    match gateway.edit_image(&source, instruction).await {
        Ok(Some(edited)) => {
            if let Err(e) = edited.image.validate() {
                tracing::error!("Edited payload failed validation: {}", e);
                println!("{}", "The model returned an undecodable image.".red());
                return Ok(());
            }
            edited.image.save(output)?;
            println!(
                "{} {} (from {}, \"{}\")",
                "Saved".green().bold(),
                output.display(),
                edited.source_mime,
                edited.instruction
            );
            Ok(())
        }
        Ok(None) => {
            println!("The model returned no image for this edit. Try a different instruction.");
            Ok(())
        }
        Err(e) => {
            tracing::error!("edit_image failed: {}", e);
            println!("{}", "Error editing image.".red());
            Ok(())
        }
    }
}
