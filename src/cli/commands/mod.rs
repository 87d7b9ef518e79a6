mod dashboard;
mod departments;
mod employees;
mod init;
mod logs;
mod reports;

pub use dashboard::cmd_dashboard;
pub use departments::{
    cmd_department_add, cmd_department_edit, cmd_department_list, cmd_department_remove,
};
pub use employees::{
    cmd_employee_add, cmd_employee_edit, cmd_employee_list, cmd_employee_remove,
    cmd_employee_show,
};
pub use init::cmd_init;
pub use logs::{cmd_log_add, cmd_log_edit, cmd_log_list, cmd_log_remove, cmd_log_show};
pub use reports::cmd_reports;

use std::fmt::Display;
use std::str::FromStr;

use crate::services::ServiceError;

fn parse_id<T>(raw: &str, what: &str) -> anyhow::Result<T>
where
    T: FromStr,
{
    raw.parse::<T>()
        .map_err(|_| anyhow::anyhow!("Invalid {what} ID: {raw}"))
}

fn parse_choice<T>(raw: Option<&str>) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    raw.map(|r| r.parse::<T>().map_err(|e| anyhow::anyhow!("{e}")))
        .transpose()
}

/// Prints field errors one per line before handing the error back.
fn report(err: ServiceError) -> anyhow::Error {
    if let ServiceError::Validation(errors) = &err {
        println!("Please fix the following:");
        for (field, message) in errors {
            println!("  {field}: {message}");
        }
    }
    err.into()
}

/// `1234567` → `$1,234,567`.
pub(crate) fn money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("${out}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmployeeId;
    use crate::models::LogLevel;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(0), "$0");
        assert_eq!(money(999), "$999");
        assert_eq!(money(1000), "$1,000");
        assert_eq!(money(1_234_567), "$1,234,567");
    }

    #[test]
    fn id_and_choice_parsing() {
        assert_eq!(parse_id::<EmployeeId>("12", "employee").unwrap(), EmployeeId::new(12));
        assert_eq!(
            parse_id::<EmployeeId>("x", "employee").unwrap_err().to_string(),
            "Invalid employee ID: x"
        );
        assert_eq!(
            parse_choice::<LogLevel>(Some("warn")).unwrap(),
            Some(LogLevel::Warning)
        );
        assert!(parse_choice::<LogLevel>(Some("loud")).is_err());
        assert_eq!(parse_choice::<LogLevel>(None).unwrap(), None);
    }
}
