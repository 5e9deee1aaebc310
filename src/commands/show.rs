use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, format_status_colored};
use crate::error::Result;
use crate::remote::UnitService;
use crate::utils::{capitalize, format_last_updated};

/// Show details for a single unit
pub async fn cmd_show(service: &dyn UnitService, id: u64, output_json: bool) -> Result<()> {
    let unit = service.get_unit(id).await?;

    let text = format!(
        "{} {}\n  Type:         {}\n  Status:       {}\n  Last updated: {}",
        format!("#{}", unit.id).cyan(),
        unit.name.bold(),
        capitalize(&unit.unit_type.to_string()),
        format_status_colored(unit.status),
        format_last_updated(&unit.last_updated),
    );

    CommandOutput::new(json!({ "unit": unit }))
        .with_text(text)
        .print(output_json)
}
