pub mod department;
pub mod draft;
pub mod employee;

pub use department::Department;
pub use draft::{DraftField, EmployeeDraft};
pub use employee::{Employee, EmployeeId, Salary};
