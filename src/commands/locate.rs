//! Maps-grounded field location handler

use crate::commands::print_citations;
use crate::config::Config;
use crate::error::Result;
use crate::gateway::{Coordinates, ModelGateway};
use colored::Colorize;

/// Resolve the coordinates for a locate call, best-effort
///
/// CLI flags win over config defaults; both absent means no bias, which
/// never blocks the query.
pub fn resolve_coordinates(
    config: &Config,
    lat: Option<f64>,
    lng: Option<f64>,
) -> Option<Coordinates> {
    match (lat, lng) {
        (Some(latitude), Some(longitude)) => Some(Coordinates {
            latitude,
            longitude,
        }),
        _ => match (config.location.latitude, config.location.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        },
    }
}

/// Run one location query and render the answer with its sources
pub async fn run_locate(
    config: Config,
    query: &str,
    lat: Option<f64>,
    lng: Option<f64>,
) -> Result<()> {
    let coordinates = resolve_coordinates(&config, lat, lng);
    if coordinates.is_none() {
        tracing::debug!("No coordinates available; proceeding without location bias");
    }

    let gateway = ModelGateway::new(config.gateway)?;

    match gateway.locate_formations(query, coordinates).await {
        Ok(result) => {
            println!("{}", "Geological Insights".bold().underline());
            if let Some(c) = result.coordinates {
                println!(
                    "{}",
                    format!("(biased toward {:.4}, {:.4})", c.latitude, c.longitude).dimmed()
                );
            }
            println!("{}", result.answer);
            print_citations(&result.citations);
            Ok(())
        }
        Err(e) => {
            tracing::error!("locate_formations failed: {}", e);
            println!("{}", "Error finding locations.".red());
            Ok(())
        }
    }
}
