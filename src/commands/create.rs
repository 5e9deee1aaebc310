use serde_json::json;

use super::CommandOutput;
use crate::error::Result;
use crate::mutation::StatusMutator;
use crate::types::UnitType;
use crate::utils::capitalize;

/// Create a new unit
pub async fn cmd_create(
    mutator: &StatusMutator,
    name: &str,
    unit_type: UnitType,
    output_json: bool,
) -> Result<()> {
    let unit = mutator.create_unit(name, unit_type).await?;

    CommandOutput::new(json!({
        "action": "created",
        "unit": unit,
    }))
    .with_text(format!(
        "Created {} '{}' (unit {})",
        capitalize(&unit.unit_type.to_string()),
        unit.name,
        unit.id
    ))
    .print(output_json)
}
