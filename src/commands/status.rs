use serde_json::json;

use super::{CommandOutput, format_status_colored};
use crate::error::Result;
use crate::mutation::StatusMutator;
use crate::types::UnitStatus;

/// Change a unit's status
pub async fn cmd_status(
    mutator: &StatusMutator,
    id: u64,
    status: UnitStatus,
    output_json: bool,
) -> Result<()> {
    let unit = mutator.change_status(id, status).await?;

    CommandOutput::new(json!({
        "action": "status_changed",
        "id": unit.id,
        "new_status": unit.status.to_string(),
        "last_updated": unit.last_updated,
    }))
    .with_text(format!(
        "Updated unit {} -> {}",
        unit.id,
        format_status_colored(unit.status)
    ))
    .print(output_json)
}
