use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::model::department::Department;
use crate::model::employee::Employee;

/// Form fields a draft binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum DraftField {
    Name,
    Email,
    Position,
    Department,
    Phone,
    DateJoined,
    Salary,
}

impl DraftField {
    pub fn label(self) -> &'static str {
        match self {
            DraftField::Name => "Name",
            DraftField::Email => "Email",
            DraftField::Position => "Position",
            DraftField::Department => "Department",
            DraftField::Phone => "Phone",
            DraftField::DateJoined => "Date Joined",
            DraftField::Salary => "Salary",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, DraftField::Phone)
    }
}

/// The not-yet-persisted field buffer behind the modal form.
///
/// Everything is kept as the user typed it; the body sent to the server on
/// create/update is this struct serialized as-is, without an `id`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: Department,
    pub phone: String,
    pub date_joined: String,
    pub salary: String,
}

impl EmployeeDraft {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Email => &self.email,
            DraftField::Position => &self.position,
            DraftField::Department => self.department.code(),
            DraftField::Phone => &self.phone,
            DraftField::DateJoined => &self.date_joined,
            DraftField::Salary => &self.salary,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Name => self.name = value,
            DraftField::Email => self.email = value,
            DraftField::Position => self.position = value,
            DraftField::Department => self.department = Department::from(value),
            DraftField::Phone => self.phone = value,
            DraftField::DateJoined => self.date_joined = value,
            DraftField::Salary => self.salary = value,
        }
    }
}

/// Field-wise copy of a persisted record, used to seed an edit.
impl From<&Employee> for EmployeeDraft {
    fn from(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            email: employee.email.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
            phone: employee.phone.clone().unwrap_or_default(),
            date_joined: employee.date_joined.format("%Y-%m-%d").to_string(),
            salary: employee.salary.as_str().to_string(),
        }
    }
}
