//! Thin-section analysis handler

use crate::config::Config;
use crate::error::{PetrosphereError, Result};
use crate::gateway::ModelGateway;
use crate::media::ImagePayload;
use crate::specimens::{self, Polarization};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Resolve the image path and question for an analyze invocation
///
/// Either an explicit image file or a catalog specimen id is accepted.
/// For a specimen, the question defaults to the catalog's microscope
/// prompt for its plane-polarized view.
pub fn resolve_target(
    image: Option<PathBuf>,
    specimen: Option<String>,
    question: Option<String>,
) -> Result<(PathBuf, String)> {
    match (image, specimen) {
        (Some(path), None) => {
            let question = question.ok_or_else(|| {
                PetrosphereError::InvalidInput(
                    "a question is required when analyzing an image file".to_string(),
                )
            })?;
            Ok((path, question))
        }
        (None, Some(id)) => {
            let spec = specimens::find(&id).ok_or_else(|| {
                PetrosphereError::InvalidInput(format!("unknown specimen id: {}", id))
            })?;
            let question =
                question.unwrap_or_else(|| spec.analysis_question(Polarization::Ppl));
            Ok((PathBuf::from(spec.ppl_image), question))
        }
        _ => Err(PetrosphereError::InvalidInput(
            "pass either --image <path> or --specimen <id>".to_string(),
        )
        .into()),
    }
}

/// Analyze a thin-section view and print the answer
pub async fn run_analyze(
    config: Config,
    image: Option<PathBuf>,
    specimen: Option<String>,
    question: Option<String>,
) -> Result<()> {
    let (path, question) = resolve_target(image, specimen, question)?;

    let payload = match ImagePayload::from_file(Path::new(&path)) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("Failed to load image for analysis: {}", e);
            println!("{} {}", "Cannot read image:".red(), e);
            return Ok(());
        }
    };

    let gateway = ModelGateway::new(config.gateway)?;

    match gateway.analyze_view(&payload.to_data_uri(), &question).await {
        Ok(answer) => {
            println!("{}", "AI Analysis".bold().underline());
            println!("{}", answer);
            Ok(())
        }
        Err(e) => {
            tracing::error!("analyze_view failed: {}", e);
            println!("{}", "Analysis failed. Please try again.".red());
            Ok(())
        }
    }
}
