use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::department::Department;

/// A JSON scalar the backend may send either quoted or bare.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
        }
    }
}

/// Server-assigned identifier. Opaque to the client: it is only ever echoed
/// back into resource paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Scalar")]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Scalar> for EmployeeId {
    fn from(scalar: Scalar) -> Self {
        EmployeeId(scalar.into())
    }
}

impl From<u64> for EmployeeId {
    fn from(id: u64) -> Self {
        EmployeeId(id.to_string())
    }
}

impl From<&str> for EmployeeId {
    fn from(id: &str) -> Self {
        EmployeeId(id.trim().to_string())
    }
}

impl FromStr for EmployeeId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(EmployeeId::from(s))
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Salary exactly as the server sent it (`"50000.00"` or `50000`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Scalar")]
pub struct Salary(String);

impl Salary {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value for display; `None` when the text is not a number.
    pub fn amount(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok()
    }
}

impl From<Scalar> for Salary {
    fn from(scalar: Scalar) -> Self {
        Salary(scalar.into())
    }
}

impl From<&str> for Salary {
    fn from(raw: &str) -> Self {
        Salary(raw.to_string())
    }
}

/// A persisted employee record, as returned by list/search/create/update.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: Department,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone: Option<String>,
    pub date_joined: NaiveDate,
    pub salary: Salary,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let phone = Option::<String>::deserialize(deserializer)?;
    Ok(phone.filter(|p| !p.trim().is_empty()))
}
