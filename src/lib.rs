//! PetroSphere - Petrology study assistant CLI library
//!
//! This library provides the core functionality for the PetroSphere CLI:
//! the model gateway adapter, media encoding, credential storage, the
//! reference specimen catalog, and configuration management.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `gateway`: Model gateway adapter (the one logic boundary), its
//!   domain types, and the endpoint wire format
//! - `commands`: Command handlers invoked by the CLI entrypoint
//! - `media`: Image payload encoding, data URIs, and validation
//! - `credentials`: Keyring-backed API key storage
//! - `specimens`: Read-only reference specimen catalog
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use petrosphere::config::GatewayConfig;
//! use petrosphere::gateway::ModelGateway;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let gateway = ModelGateway::new(GatewayConfig::default())?;
//!     let result = gateway.search_grounded("basalt weathering").await?;
//!     println!("{}", result.answer);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod media;
pub mod specimens;

// Re-export commonly used types
pub use config::Config;
pub use error::{PetrosphereError, Result};
pub use gateway::{
    Citation, ConversationSession, ConversationTurn, ModelGateway, ResolutionTier,
};
pub use media::ImagePayload;
