//! Active list filters, used both as the cache key and for wire encoding.

use std::fmt;

use crate::types::{UnitStatus, UnitType};

/// The set of filters currently applied to the unit list.
///
/// Absent fields mean "no constraint". Value equality decides cache-key
/// identity and whether a committed filter change requires a re-fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterSet {
    pub name: Option<String>,
    pub unit_type: Option<UnitType>,
    pub status: Option<UnitStatus>,
}

impl FilterSet {
    /// Build a filter set from raw UI field values.
    ///
    /// Whitespace-only search text is treated as absent, never as an
    /// empty-string constraint.
    pub fn from_raw(
        search: &str,
        unit_type: Option<UnitType>,
        status: Option<UnitStatus>,
    ) -> Self {
        let name = search.trim();
        FilterSet {
            name: (!name.is_empty()).then(|| name.to_string()),
            unit_type,
            status,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.unit_type.is_none() && self.status.is_none()
    }

    /// Query parameters for the list endpoint. Absent fields are not
    /// serialized at all; the server must never see `name=` for an unset
    /// filter.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        if let Some(unit_type) = self.unit_type {
            pairs.push(("type", unit_type.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        pairs
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "unfiltered");
        }
        let mut sep = "";
        if let Some(name) = &self.name {
            write!(f, "name={}", name)?;
            sep = " ";
        }
        if let Some(unit_type) = self.unit_type {
            write!(f, "{}type={}", sep, unit_type)?;
            sep = " ";
        }
        if let Some(status) = self.status {
            write!(f, "{}status={}", sep, status)?;
        }
        Ok(())
    }
}
