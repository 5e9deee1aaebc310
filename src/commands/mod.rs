mod create;
mod ls;
mod show;
mod status;

pub use create::cmd_create;
pub use ls::cmd_ls;
pub use show::cmd_show;
pub use status::cmd_status;

use owo_colors::OwoColorize;
use serde_json::Value;

use crate::error::Result;
use crate::types::UnitStatus;

/// Dual-format command output: a JSON value for scripts and a text
/// rendering for humans, printed according to the `--json` flag.
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, output_json: bool) -> Result<()> {
        if output_json {
            println!("{}", serde_json::to_string_pretty(&self.json)?);
        } else if let Some(text) = self.text {
            println!("{text}");
        }
        Ok(())
    }
}

/// Colored status badge for terminal output.
pub fn format_status_colored(status: UnitStatus) -> String {
    let label = format!("[{status}]");
    match status {
        UnitStatus::Available => label.green().to_string(),
        UnitStatus::Occupied => label.yellow().to_string(),
        UnitStatus::CleaningInProgress => label.cyan().to_string(),
        UnitStatus::MaintenanceNeeded => label.red().to_string(),
    }
}
