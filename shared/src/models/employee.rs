//! Employee Model

use serde::{Deserialize, Serialize};

/// Employee search hit
///
/// Every field is always present on the wire. Missing values are defaulted
/// at the boundary: `COALESCE` in SQL, `#[serde(default)]` when decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Internal numeric code
    #[serde(default)]
    pub internal_code: i64,
    /// Employee code
    #[serde(default)]
    pub employee_code: i64,
    #[serde(default)]
    pub name: String,
}

impl Employee {
    pub fn new(internal_code: i64, employee_code: i64, name: impl Into<String>) -> Self {
        Self {
            internal_code,
            employee_code,
            name: name.into(),
        }
    }
}
