use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumMessage;
use strum_macros::EnumString;

/// Department codes as the backend stores them.
///
/// Codes the client does not know about are kept verbatim in `Other` so a
/// newer server can add departments without breaking older clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, EnumString, EnumMessage, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Department {
    #[default]
    #[strum(serialize = "HR", message = "Human Resources")]
    Hr,
    #[strum(serialize = "IT", message = "Information Technology")]
    It,
    #[strum(serialize = "FINANCE", message = "Finance")]
    Finance,
    #[strum(serialize = "MARKETING", message = "Marketing")]
    Marketing,
    #[strum(serialize = "SALES", message = "Sales")]
    Sales,
    #[strum(serialize = "OPERATIONS", message = "Operations")]
    Operations,
    #[strum(default)]
    Other(String),
}

impl Department {
    /// Known departments in the order the form offers them.
    pub const KNOWN: [Department; 6] = [
        Department::Hr,
        Department::It,
        Department::Finance,
        Department::Marketing,
        Department::Sales,
        Department::Operations,
    ];

    /// Wire code, e.g. `"FINANCE"`.
    pub fn code(&self) -> &str {
        match self {
            Department::Hr => "HR",
            Department::It => "IT",
            Department::Finance => "FINANCE",
            Department::Marketing => "MARKETING",
            Department::Sales => "SALES",
            Department::Operations => "OPERATIONS",
            Department::Other(code) => code.as_str(),
        }
    }

    /// Human readable label, falling back to the raw code for unknown departments.
    pub fn label(&self) -> &str {
        match self.get_message() {
            Some(label) => label,
            None => self.code(),
        }
    }

    /// Parse a wire code; unknown codes become `Other`.
    pub fn from_code(code: &str) -> Self {
        Department::from(code.to_string())
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Department::Other(_))
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<String> for Department {
    fn from(code: String) -> Self {
        Department::from_str(&code).unwrap_or(Department::Other(code))
    }
}

impl From<Department> for String {
    fn from(department: Department) -> Self {
        department.code().to_string()
    }
}
