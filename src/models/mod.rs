pub mod department;
pub mod employee;
pub mod log_entry;

pub use department::{Department, DepartmentDraft, DepartmentForm};
pub use employee::{Employee, EmployeeDraft, EmployeeForm, EmployeeStatus};
pub use log_entry::{LogDraft, LogEntry, LogForm, LogLevel};
