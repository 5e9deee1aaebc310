use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Capsule,
    Cabin,
    Room,
    Tent,
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitType::Capsule => write!(f, "capsule"),
            UnitType::Cabin => write!(f, "cabin"),
            UnitType::Room => write!(f, "room"),
            UnitType::Tent => write!(f, "tent"),
        }
    }
}

impl FromStr for UnitType {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "capsule" => Ok(UnitType::Capsule),
            "cabin" => Ok(UnitType::Cabin),
            "room" => Ok(UnitType::Room),
            "tent" => Ok(UnitType::Tent),
            _ => Err(DashboardError::InvalidUnitType(s.to_string())),
        }
    }
}

pub const VALID_TYPES: &[&str] = &["capsule", "cabin", "room", "tent"];

/// Operational state of a unit. The wire format uses the human-readable
/// labels the unit service exposes, so serde renames match them exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitStatus {
    Available,
    Occupied,
    #[serde(rename = "Cleaning In Progress")]
    CleaningInProgress,
    #[serde(rename = "Maintenance Needed")]
    MaintenanceNeeded,
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitStatus::Available => write!(f, "Available"),
            UnitStatus::Occupied => write!(f, "Occupied"),
            UnitStatus::CleaningInProgress => write!(f, "Cleaning In Progress"),
            UnitStatus::MaintenanceNeeded => write!(f, "Maintenance Needed"),
        }
    }
}

impl FromStr for UnitStatus {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "available" => Ok(UnitStatus::Available),
            "occupied" => Ok(UnitStatus::Occupied),
            "cleaning" | "cleaning in progress" => Ok(UnitStatus::CleaningInProgress),
            "maintenance" | "maintenance needed" => Ok(UnitStatus::MaintenanceNeeded),
            _ => Err(DashboardError::InvalidStatus(s.to_string())),
        }
    }
}

pub const VALID_STATUSES: &[&str] = &["available", "occupied", "cleaning", "maintenance"];

/// A manageable unit as the remote service represents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: u64,

    pub name: String,

    #[serde(rename = "type")]
    pub unit_type: UnitType,

    pub status: UnitStatus,

    /// ISO 8601 timestamp of the most recent mutation.
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
}
