/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.
Each handler drives exactly one gateway operation and renders its
result. Gateway failures are recovered here: logged and surfaced as a
short human-readable message, never left to propagate uncaught.
*/

use crate::gateway::Citation;
use colored::Colorize;

// Interactive chat session
pub mod chat;

// Grounded knowledge search
pub mod search;

// Maps-grounded field location
pub mod locate;

// Specimen image synthesis
pub mod generate;

// Specimen image editing
pub mod edit;

// Thin-section analysis
pub mod analyze;

// Description summarization
pub mod summarize;

// Reference catalog browsing
pub mod specimens;

// API key setup
pub mod auth;

/// Render a filtered citation list under a "Grounding Sources" header
///
/// Prints nothing when the list is empty.
pub(crate) fn print_citations(citations: &[Citation]) {
    if citations.is_empty() {
        return;
    }
    println!();
    println!("{}", "Grounding Sources".bold().underline());
    for citation in citations {
        println!(
            "  [{}] {} <{}>",
            citation.origin.to_string().cyan(),
            citation.title.bold(),
            citation.uri.dimmed()
        );
    }
}
