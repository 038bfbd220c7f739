//! Reference catalog browsing handler

use crate::error::{PetrosphereError, Result};
use crate::specimens;
use prettytable::{cell, row, Table};

/// List the catalog specimens as a table
pub fn list_specimens() -> Result<()> {
    let mut table = Table::new();
    table.add_row(row!["ID", "NAME", "CLASS", "DESCRIPTION"]);

    for specimen in specimens::catalog() {
        table.add_row(row![
            specimen.id,
            specimen.name,
            specimen.class.to_string(),
            specimen.description
        ]);
    }

    table.printstd();
    Ok(())
}

/// Show one specimen's views and mineral facts
pub fn show_specimen(id: &str) -> Result<()> {
    let specimen = specimens::find(id)
        .ok_or_else(|| PetrosphereError::InvalidInput(format!("unknown specimen id: {}", id)))?;

    println!("{} ({})", specimen.name, specimen.class);
    println!("{}", specimen.description);
    println!("PPL view: {}", specimen.ppl_image);
    println!("XPL view: {}", specimen.xpl_image);
    println!();

    let mut table = Table::new();
    table.add_row(row!["MINERAL", "OPTICAL PROPERTIES", "SIGNIFICANCE"]);
    for mineral in &specimen.minerals {
        table.add_row(row![mineral.name, mineral.properties, mineral.significance]);
    }
    table.printstd();
    Ok(())
}
