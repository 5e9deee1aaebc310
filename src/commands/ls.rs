use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::CommandOutput;
use crate::cache::UnitCache;
use crate::error::Result;
use crate::filter::FilterSet;
use crate::types::{UnitStatus, UnitType};
use crate::utils::{capitalize, format_last_updated};

/// A row in the unit list table
#[derive(Tabled)]
struct UnitRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    unit_type: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Last Updated")]
    last_updated: String,
}

/// List units, optionally filtered by name/type/status
pub async fn cmd_ls(
    cache: &UnitCache,
    name: Option<&str>,
    unit_type: Option<UnitType>,
    status: Option<UnitStatus>,
    output_json: bool,
) -> Result<()> {
    let filter = FilterSet::from_raw(name.unwrap_or(""), unit_type, status);
    let units = cache.fetch(&filter).await?;

    if output_json {
        return CommandOutput::new(json!({ "units": units })).print(true);
    }

    if units.is_empty() {
        println!("No units found ({filter}).");
        return Ok(());
    }

    let rows: Vec<UnitRow> = units
        .iter()
        .map(|unit| UnitRow {
            id: unit.id,
            name: unit.name.clone(),
            unit_type: capitalize(&unit.unit_type.to_string()),
            status: unit.status.to_string(),
            last_updated: format_last_updated(&unit.last_updated),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));
    Ok(())
}
