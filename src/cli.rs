//! Command-line interface definition for PetroSphere
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for chat, grounded search, field location, image
//! synthesis/editing, thin-section analysis, and credential setup.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// PetroSphere - Petrology study assistant CLI
///
/// Study igneous, metamorphic, and sedimentary rocks through a
/// generative model gateway: chat, grounded search, field location,
/// specimen image synthesis, and thin-section analysis.
#[derive(Parser, Debug, Clone)]
#[command(name = "petrosphere")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Override the model endpoint base URL
    #[arg(long, env = "PETROSPHERE_API_BASE")]
    pub api_base: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for PetroSphere
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session with the petrology assistant
    Chat {
        /// Enable extended reasoning mode (deeper answers, higher latency)
        #[arg(short, long)]
        reasoning: bool,
    },

    /// Search rock and mineral knowledge with live-web grounding
    Search {
        /// Free-text query
        query: String,
    },

    /// Locate geological formations and outcrops with maps grounding
    Locate {
        /// Free-text query (e.g. "columnar jointing", "ophiolite complexes")
        query: String,

        /// Latitude used to bias results toward a location
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude used to bias results toward a location
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },

    /// Synthesize a geological specimen image
    Generate {
        /// Descriptive prompt for the specimen
        prompt: String,

        /// Output resolution tier
        #[arg(short, long, value_enum, default_value = "1k")]
        size: SizeArg,

        /// Path to write the generated image to
        #[arg(short, long, default_value = "generated.png")]
        output: PathBuf,
    },

    /// Edit an existing specimen image with an instruction
    Edit {
        /// Path to the source image
        #[arg(short, long)]
        image: PathBuf,

        /// Edit instruction (e.g. "highlight the phenocrysts")
        instruction: String,

        /// Path to write the edited image to
        #[arg(short, long, default_value = "edited.png")]
        output: PathBuf,
    },

    /// Analyze a thin-section image
    Analyze {
        /// Path to the image to analyze
        #[arg(short, long, conflicts_with = "specimen")]
        image: Option<PathBuf>,

        /// Catalog specimen id to analyze instead of a file
        #[arg(short, long)]
        specimen: Option<String>,

        /// Question to ask about the view
        question: Option<String>,
    },

    /// Summarize a geological description into key points
    Summarize {
        /// Description text to condense
        text: String,
    },

    /// Browse the reference specimen catalog
    Specimens {
        /// Specimen subcommand
        #[command(subcommand)]
        command: SpecimenCommand,
    },

    /// Store the model endpoint API key
    Auth,
}

/// Specimen catalog subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SpecimenCommand {
    /// List all catalog specimens
    List,

    /// Show a specimen's mineral facts
    Show {
        /// Specimen id (e.g. spec-1)
        id: String,
    },
}

/// Resolution tier argument for image synthesis
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeArg {
    /// 1K output
    #[value(name = "1k", alias = "1K")]
    OneK,
    /// 2K output
    #[value(name = "2k", alias = "2K")]
    TwoK,
    /// 4K output
    #[value(name = "4k", alias = "4K")]
    FourK,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_chat() {
        let cli = Cli::try_parse_from(["petrosphere", "chat", "--reasoning"]).unwrap();
        match cli.command {
            Commands::Chat { reasoning } => assert!(reasoning),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_search() {
        let cli = Cli::try_parse_from(["petrosphere", "search", "basalt weathering"]).unwrap();
        match cli.command {
            Commands::Search { query } => assert_eq!(query, "basalt weathering"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_locate_requires_paired_coordinates() {
        // --lat without --lng is rejected
        let result = Cli::try_parse_from(["petrosphere", "locate", "tuff rings", "--lat", "64.1"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "petrosphere",
            "locate",
            "tuff rings",
            "--lat",
            "64.1",
            "--lng",
            "-21.9",
        ])
        .unwrap();
        match cli.command {
            Commands::Locate { lat, lng, .. } => {
                assert_eq!(lat, Some(64.1));
                assert_eq!(lng, Some(-21.9));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_generate_size_values() {
        let cli = Cli::try_parse_from([
            "petrosphere",
            "generate",
            "olivine basalt",
            "--size",
            "4k",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate { size, .. } => assert_eq!(size, SizeArg::FourK),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_generate_default_size() {
        let cli = Cli::try_parse_from(["petrosphere", "generate", "gabbro"]).unwrap();
        match cli.command {
            Commands::Generate { size, .. } => assert_eq!(size, SizeArg::OneK),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_analyze_image_conflicts_with_specimen() {
        let result = Cli::try_parse_from([
            "petrosphere",
            "analyze",
            "--image",
            "view.png",
            "--specimen",
            "spec-1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_specimens_show() {
        let cli = Cli::try_parse_from(["petrosphere", "specimens", "show", "spec-2"]).unwrap();
        match cli.command {
            Commands::Specimens {
                command: SpecimenCommand::Show { id },
            } => assert_eq!(id, "spec-2"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
