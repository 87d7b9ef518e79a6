pub mod activity;
pub use activity::{ActivityDispatcher, ActivityError, ActivityLogSink, ActivitySink, SmsNotifier};

pub mod employee_service;
pub mod employee_service_impl;
pub use employee_service::EmployeeService;
pub use employee_service_impl::RemoteEmployeeService;

pub mod department_service;
pub mod department_service_impl;
pub use department_service::DepartmentService;
pub use department_service_impl::RemoteDepartmentService;

pub mod log_service;
pub mod log_service_impl;
pub use log_service::LogService;
pub use log_service_impl::RemoteLogService;

use thiserror::Error;

use crate::gateway::GatewayError;
use crate::validation::FieldErrors;

/// Errors surfaced to views and the command line.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Validation failed: {}", describe(.0))]
    Validation(FieldErrors),

    #[error("{0}")]
    Rejected(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

fn describe(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<GatewayError> for ServiceError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotFound { entity, id } => Self::NotFound { entity, id },
            GatewayError::Rejected(message) => Self::Rejected(message),
            GatewayError::EmptyResult => Self::Rejected(err.to_string()),
            GatewayError::Transport(_) | GatewayError::Decode { .. } => {
                Self::Transport(err.to_string())
            }
        }
    }
}

impl From<FieldErrors> for ServiceError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("salary", "Please enter a valid salary amount".to_string());
        errors.insert("email", "Email is required".to_string());
        assert_eq!(
            ServiceError::from(errors).to_string(),
            "Validation failed: email: Email is required; salary: Please enter a valid salary amount"
        );
    }

    #[test]
    fn gateway_errors_map_onto_taxonomy() {
        let err = ServiceError::from(GatewayError::NotFound {
            entity: "Employee",
            id: 3,
        });
        assert_eq!(err.to_string(), "Employee with ID 3 not found");

        let err = ServiceError::from(GatewayError::Decode {
            entity: "Employee",
            message: "bad".to_string(),
        });
        assert!(matches!(err, ServiceError::Transport(_)));
    }
}
