//! Client for the HR employee directory: a REST client for the employee
//! resource, a snapshot-based view state store kept in sync by full refetches,
//! the add/edit form controller and a text presentation of the result.

pub mod api;
pub mod config;
pub mod console;
pub mod directory;
pub mod form;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;

pub use api::{ApiError, EmployeeApi, FailureKind, HttpEmployeeApi};
pub use config::Config;
pub use directory::{Confirm, DeleteOutcome, EmployeeDirectory, SubmitOutcome};
pub use state::{Store, ViewState};
