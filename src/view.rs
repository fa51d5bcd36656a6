//! Presentation: a pure mapping from view state to what the screen shows.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumString};

use crate::form::{FormMode, OpenForm};
use crate::model::{Department, DraftField, Employee, EmployeeId, Salary};
use crate::state::ViewState;

/// Badge colours keyed by department code.
static DEPARTMENT_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("HR", "#e74c3c"),
        ("IT", "#3498db"),
        ("FINANCE", "#f39c12"),
        ("MARKETING", "#9b59b6"),
        ("SALES", "#2ecc71"),
        ("OPERATIONS", "#34495e"),
    ])
});

pub fn badge_color(department: &Department) -> Option<&'static str> {
    DEPARTMENT_COLORS.get(department.code()).copied()
}

/// Display conventions for dates and amounts, named by BCP 47 tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
pub enum Locale {
    #[default]
    #[strum(serialize = "en-US")]
    EnUs,
    #[strum(serialize = "en-GB")]
    EnGb,
    #[strum(serialize = "de-DE")]
    DeDe,
}

impl Locale {
    fn date_format(self) -> &'static str {
        match self {
            Locale::EnUs => "%-m/%-d/%Y",
            Locale::EnGb => "%d/%m/%Y",
            Locale::DeDe => "%-d.%-m.%Y",
        }
    }

    /// (group separator, decimal separator)
    fn separators(self) -> (char, char) {
        match self {
            Locale::EnUs | Locale::EnGb => (',', '.'),
            Locale::DeDe => ('.', ','),
        }
    }
}

/// `$50,000`, `$1,234.5` in en-US; text that is not a number is shown as sent.
pub fn format_salary(salary: &Salary, locale: Locale) -> String {
    match salary.amount() {
        Some(amount) if amount.is_finite() => format!("${}", group_thousands(amount, locale)),
        _ => salary.as_str().to_string(),
    }
}

/// Up to three fraction digits, trailing zeros dropped, a group separator
/// every three integer digits.
fn group_thousands(amount: f64, locale: Locale) -> String {
    let (group, decimal) = locale.separators();
    let fixed = format!("{:.3}", amount.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let digits: Vec<char> = integer.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(group);
        }
        grouped.push(*digit);
    }

    let sign = if amount < 0.0 && (grouped != "0" || !fraction.is_empty()) {
        "-"
    } else {
        ""
    };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}{decimal}{fraction}")
    }
}

/// Short date, e.g. `1/1/2020` in en-US or `1.1.2020` in de-DE.
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    date.format(locale.date_format()).to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading,
    Directory(DirectoryView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryView {
    pub search_term: String,
    pub body: Body,
    pub modal: Option<FormModal>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Grid(Vec<EmployeeCard>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeCard {
    pub id: EmployeeId,
    pub avatar: String,
    pub name: String,
    pub position: String,
    pub department: String,
    pub badge_color: Option<&'static str>,
    pub email: String,
    pub phone: Option<String>,
    pub joined: String,
    pub salary: String,
}

impl EmployeeCard {
    pub fn new(employee: &Employee, locale: Locale) -> Self {
        Self {
            id: employee.id.clone(),
            avatar: employee
                .name
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default(),
            name: employee.name.clone(),
            position: employee.position.clone(),
            department: employee.department.code().to_string(),
            badge_color: badge_color(&employee.department),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            joined: format_date(employee.date_joined, locale),
            salary: format_salary(&employee.salary, locale),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormModal {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub fields: Vec<FieldView>,
    pub department_options: Vec<(String, String)>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub field: DraftField,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    pub error: Option<&'static str>,
}

impl From<&OpenForm> for FormModal {
    fn from(form: &OpenForm) -> Self {
        let (title, submit_label) = match form.mode {
            FormMode::Edit(_) => ("Edit Employee", "Update Employee"),
            FormMode::Create => ("Add New Employee", "Add Employee"),
        };

        let fields = DraftField::iter()
            .map(|field| FieldView {
                field,
                label: field.label(),
                value: form.draft.get(field).to_string(),
                required: field.is_required(),
                error: form
                    .field_errors
                    .iter()
                    .find(|e| e.field == field)
                    .map(|e| e.message),
            })
            .collect();

        let department_options = Department::KNOWN
            .iter()
            .map(|d| (d.code().to_string(), d.label().to_string()))
            .collect();

        Self {
            title,
            submit_label,
            fields,
            department_options,
            error: form.error.as_ref().map(|e| e.message.clone()),
        }
    }
}

pub fn render(state: &ViewState, locale: Locale) -> Screen {
    if state.is_loading() {
        return Screen::Loading;
    }

    let body = if state.records.is_empty() {
        Body::Empty
    } else {
        Body::Grid(
            state
                .records
                .iter()
                .map(|employee| EmployeeCard::new(employee, locale))
                .collect(),
        )
    };

    Screen::Directory(DirectoryView {
        search_term: state.search_term.clone(),
        body,
        modal: state.form.as_open().map(FormModal::from),
    })
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Loading => writeln!(f, "Loading employees..."),
            Screen::Directory(view) => write!(f, "{view}"),
        }
    }
}

impl fmt::Display for DirectoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== HR Management System ===")?;
        if !self.search_term.is_empty() {
            writeln!(f, "Search: {}", self.search_term)?;
        }
        match &self.body {
            Body::Empty => {
                writeln!(f, "No employees found")?;
                writeln!(f, "Start by adding your first employee to the system.")?;
            }
            Body::Grid(cards) => {
                for card in cards {
                    write!(f, "{card}")?;
                }
            }
        }
        if let Some(modal) = &self.modal {
            write!(f, "{modal}")?;
        }
        Ok(())
    }
}

impl fmt::Display for EmployeeCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let badge = match self.badge_color {
            Some(color) => format!("[{} {}]", self.department, color),
            None => format!("[{}]", self.department),
        };
        writeln!(f, "---")?;
        writeln!(f, "({}) {} #{} {}", self.avatar, self.name, self.id, badge)?;
        writeln!(f, "    {}", self.position)?;
        writeln!(f, "    Email:  {}", self.email)?;
        if let Some(phone) = &self.phone {
            writeln!(f, "    Phone:  {phone}")?;
        }
        writeln!(f, "    Joined: {}", self.joined)?;
        writeln!(f, "    Salary: {}", self.salary)
    }
}

impl fmt::Display for FormModal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+++ {} +++", self.title)?;
        for field in &self.fields {
            let marker = if field.required { "*" } else { " " };
            write!(f, "  {}{:<12} {:<12} = {}", marker, field.label, field.field, field.value)?;
            if let Some(error) = field.error {
                write!(f, "   <- {error}")?;
            }
            writeln!(f)?;
        }
        let options: Vec<&str> = self.department_options.iter().map(|(code, _)| code.as_str()).collect();
        writeln!(f, "  departments: {}", options.join(", "))?;
        if let Some(error) = &self.error {
            writeln!(f, "  ! {error}")?;
        }
        writeln!(f, "  [save] {}   [cancel]", self.submit_label)
    }
}
