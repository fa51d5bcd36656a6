//! Modal form state and client-side draft checks.

use chrono::NaiveDate;

use crate::api::FailureKind;
use crate::model::{DraftField, Employee, EmployeeDraft};

/// What a submit of the open form will do.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    /// Holds the record the draft was copied from; its id targets the update.
    Edit(Employee),
}

/// Failure shown inline in the modal after a rejected submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub kind: FailureKind,
    pub message: String,
}

impl FormError {
    pub fn save_failed(kind: FailureKind) -> Self {
        Self {
            kind,
            message: "Error saving employee. Please check all fields.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: DraftField,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenForm {
    pub mode: FormMode,
    pub draft: EmployeeDraft,
    pub field_errors: Vec<FieldError>,
    pub error: Option<FormError>,
}

impl OpenForm {
    fn new(mode: FormMode, draft: EmployeeDraft) -> Self {
        Self {
            mode,
            draft,
            field_errors: Vec::new(),
            error: None,
        }
    }

    pub fn editing(&self) -> Option<&Employee> {
        match &self.mode {
            FormMode::Edit(record) => Some(record),
            FormMode::Create => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormState {
    #[default]
    Closed,
    Open(OpenForm),
}

impl FormState {
    pub fn open_create() -> Self {
        FormState::Open(OpenForm::new(FormMode::Create, EmployeeDraft::default()))
    }

    pub fn open_edit(record: &Employee) -> Self {
        FormState::Open(OpenForm::new(
            FormMode::Edit(record.clone()),
            EmployeeDraft::from(record),
        ))
    }

    pub fn is_open(&self) -> bool {
        matches!(self, FormState::Open(_))
    }

    pub fn as_open(&self) -> Option<&OpenForm> {
        match self {
            FormState::Open(form) => Some(form),
            FormState::Closed => None,
        }
    }

    pub fn as_open_mut(&mut self) -> Option<&mut OpenForm> {
        match self {
            FormState::Open(form) => Some(form),
            FormState::Closed => None,
        }
    }

    pub fn editing(&self) -> Option<&Employee> {
        self.as_open().and_then(OpenForm::editing)
    }
}

/// Check the constraints the input fields declare: required fields, an
/// email shape, an ISO calendar date and a numeric salary.
pub fn validate(draft: &EmployeeDraft) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    for field in [
        DraftField::Name,
        DraftField::Email,
        DraftField::Position,
        DraftField::DateJoined,
        DraftField::Salary,
    ] {
        if draft.get(field).trim().is_empty() {
            errors.push(FieldError {
                field,
                message: "This field is required.",
            });
        }
    }

    let email = draft.email.trim();
    if !email.is_empty() && !looks_like_email(email) {
        errors.push(FieldError {
            field: DraftField::Email,
            message: "Enter a valid email address.",
        });
    }

    let date = draft.date_joined.trim();
    if !date.is_empty() && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        errors.push(FieldError {
            field: DraftField::DateJoined,
            message: "Enter a valid date (YYYY-MM-DD).",
        });
    }

    let salary = draft.salary.trim();
    if !salary.is_empty() && salary.parse::<f64>().map_or(true, |s| !s.is_finite()) {
        errors.push(FieldError {
            field: DraftField::Salary,
            message: "Enter a number.",
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}
