pub mod employee;
pub mod error;

pub use employee::{EmployeeApi, HttpEmployeeApi};
pub use error::{ApiError, ApiResult, FailureKind};
