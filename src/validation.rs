//! Form validation.
//!
//! Each validator takes the raw form and either produces the typed draft the
//! gateway writes, or a map of field key to user-facing message. Nothing
//! here touches the network.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::domain::{DepartmentId, EmployeeId};
use crate::models::department::{Department, DepartmentDraft, DepartmentForm};
use crate::models::employee::{EmployeeDraft, EmployeeForm, EmployeeStatus};
use crate::models::log_entry::{LogDraft, LogForm, LogLevel, default_log_name};
use crate::schema::{parse_timestamp, whole_amount};

pub type FieldErrors = BTreeMap<&'static str, String>;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"))
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

fn required<'a>(
    errors: &mut FieldErrors,
    key: &'static str,
    value: &'a str,
    message: &str,
) -> Option<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.insert(key, message.to_string());
        None
    } else {
        Some(trimmed)
    }
}

/// Whole units of a non-negative amount no larger than [`crate::schema::MAX_AMOUNT`].
fn parse_amount(raw: &str) -> Option<u64> {
    raw.trim().parse::<f64>().ok().and_then(whole_amount)
}

/// Field errors only, for live form feedback.
#[must_use]
pub fn employee_errors(form: &EmployeeForm) -> FieldErrors {
    match validate_employee(form) {
        Ok(_) => FieldErrors::new(),
        Err(errors) => errors,
    }
}

pub fn validate_employee(form: &EmployeeForm) -> Result<EmployeeDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let first_name = required(
        &mut errors,
        "first_name",
        &form.first_name,
        "First name is required",
    );
    let last_name = required(
        &mut errors,
        "last_name",
        &form.last_name,
        "Last name is required",
    );

    let email = required(&mut errors, "email", &form.email, "Email is required");
    if email.is_some_and(|e| !is_valid_email(e)) {
        errors.insert("email", "Please enter a valid email address".to_string());
    }

    let phone = required(&mut errors, "phone", &form.phone, "Phone number is required");
    let position = required(
        &mut errors,
        "position",
        &form.position,
        "Position is required",
    );

    let department_id = required(
        &mut errors,
        "department",
        &form.department,
        "Department is required",
    )
    .and_then(|raw| match raw.parse::<DepartmentId>() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.insert("department", "Please select a valid department".to_string());
            None
        }
    });

    let start_date = required(
        &mut errors,
        "start_date",
        &form.start_date,
        "Start date is required",
    )
    .and_then(|raw| {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_or_else(
            |_| {
                errors.insert("start_date", "Please enter a valid start date".to_string());
                None
            },
            Some,
        )
    });

    let salary = required(&mut errors, "salary", &form.salary, "Salary is required")
        .and_then(|raw| match parse_amount(raw) {
            Some(n) if n > 0 => Some(n),
            _ => {
                errors.insert("salary", "Please enter a valid salary amount".to_string());
                None
            }
        });

    let status = if form.status.trim().is_empty() {
        Some(EmployeeStatus::Active)
    } else if let Ok(status) = form.status.parse::<EmployeeStatus>() {
        Some(status)
    } else {
        errors.insert("status", "Please select a valid status".to_string());
        None
    };

    match (
        first_name,
        last_name,
        email,
        phone,
        position,
        department_id,
        start_date,
        salary,
        status,
    ) {
        (
            Some(first_name),
            Some(last_name),
            Some(email),
            Some(phone),
            Some(position),
            Some(department_id),
            Some(start_date),
            Some(salary),
            Some(status),
        ) if errors.is_empty() => Ok(EmployeeDraft {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            position: position.to_string(),
            department_id: Some(department_id),
            start_date: Some(start_date),
            status,
            salary,
            manager: Some(form.manager.trim().to_string()).filter(|m| !m.is_empty()),
        }),
        _ => Err(errors),
    }
}

/// `existing` is the loaded department set; `editing` is excluded from the
/// uniqueness check.
pub fn validate_department(
    form: &DepartmentForm,
    existing: &[Department],
    editing: Option<DepartmentId>,
) -> Result<DepartmentDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = required(
        &mut errors,
        "name",
        &form.name,
        "Department name is required",
    );
    if let Some(name) = name {
        let taken = existing
            .iter()
            .filter(|d| Some(d.id) != editing)
            .any(|d| d.name.trim().eq_ignore_ascii_case(name));
        if taken {
            errors.insert("name", "A department with this name already exists".to_string());
        }
    }

    let budget = required(&mut errors, "budget", &form.budget, "Budget is required").and_then(
        |raw| {
            parse_amount(raw).or_else(|| {
                errors.insert("budget", "Please enter a valid budget amount".to_string());
                None
            })
        },
    );

    match (name, budget) {
        (Some(name), Some(budget)) if errors.is_empty() => Ok(DepartmentDraft {
            name: name.to_string(),
            description: form.description.trim().to_string(),
            head: Some(form.head.trim().to_string()).filter(|h| !h.is_empty()),
            budget,
        }),
        _ => Err(errors),
    }
}

/// Blank timestamp means `now`; blank name becomes `level - time`.
pub fn validate_log(form: &LogForm, now: DateTime<Utc>) -> Result<LogDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let message = required(&mut errors, "message", &form.message, "Message is required");

    let level = if form.level.trim().is_empty() {
        Some(LogLevel::Info)
    } else if let Ok(level) = form.level.parse::<LogLevel>() {
        Some(level)
    } else {
        errors.insert("level", "Please select a valid log level".to_string());
        None
    };

    let employee_id = match form.employee.trim() {
        "" => Some(None),
        raw => raw.parse::<EmployeeId>().map(Some).map_or_else(
            |_| {
                errors.insert("employee", "Please select a valid employee".to_string());
                None
            },
            Some,
        ),
    };

    let timestamp = if form.timestamp.trim().is_empty() {
        Some(now)
    } else {
        parse_timestamp(Some(&form.timestamp)).or_else(|| {
            errors.insert("timestamp", "Please enter a valid timestamp".to_string());
            None
        })
    };

    match (message, level, employee_id, timestamp) {
        (Some(message), Some(level), Some(employee_id), Some(timestamp)) if errors.is_empty() => {
            let name = match form.name.trim() {
                "" => default_log_name(level, timestamp),
                name => name.to_string(),
            };
            Ok(LogDraft {
                name,
                timestamp,
                level,
                message: message.to_string(),
                employee_id,
                tags: form.tags.trim().to_string(),
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn valid_form() -> EmployeeForm {
        EmployeeForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@co.com".to_string(),
            phone: "555-0100".to_string(),
            position: "Engineer".to_string(),
            department: "2".to_string(),
            start_date: "2024-01-01".to_string(),
            status: "active".to_string(),
            salary: "90000".to_string(),
            manager: String::new(),
        }
    }

    #[test]
    fn valid_employee_form_produces_draft() {
        let draft = validate_employee(&valid_form()).unwrap();
        assert_eq!(draft.department_id, Some(DepartmentId::new(2)));
        assert_eq!(draft.salary, 90000);
        assert_eq!(draft.manager, None);
        assert_eq!(draft.status, EmployeeStatus::Active);
    }

    #[test]
    fn whitespace_names_are_required() {
        let form = EmployeeForm {
            first_name: "   ".to_string(),
            ..valid_form()
        };
        let errors = validate_employee(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["first_name"], "First name is required");
    }

    #[test]
    fn email_without_at_is_invalid() {
        let form = EmployeeForm {
            email: "a.b.com".to_string(),
            ..valid_form()
        };
        let errors = employee_errors(&form);
        assert_eq!(errors["email"], "Please enter a valid email address");

        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@bcom"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn salary_must_be_positive_number() {
        for bad in ["0", "-1", "abc", "NaN", "inf"] {
            let form = EmployeeForm {
                salary: bad.to_string(),
                ..valid_form()
            };
            let errors = employee_errors(&form);
            assert_eq!(
                errors["salary"], "Please enter a valid salary amount",
                "salary {bad}"
            );
        }

        let form = EmployeeForm {
            salary: "1234.99".to_string(),
            ..valid_form()
        };
        assert_eq!(validate_employee(&form).unwrap().salary, 1234);
    }

    #[test]
    fn oversized_salary_is_rejected() {
        for huge in ["1e30", "99999999999999999999", "1000000000001"] {
            let form = EmployeeForm {
                salary: huge.to_string(),
                ..valid_form()
            };
            assert_eq!(
                employee_errors(&form)["salary"],
                "Please enter a valid salary amount",
                "salary {huge}"
            );
        }

        let form = EmployeeForm {
            salary: crate::schema::MAX_AMOUNT.to_string(),
            ..valid_form()
        };
        assert_eq!(
            validate_employee(&form).unwrap().salary,
            crate::schema::MAX_AMOUNT
        );
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let errors = employee_errors(&EmployeeForm::default());
        for key in [
            "first_name",
            "last_name",
            "email",
            "phone",
            "position",
            "department",
            "start_date",
            "salary",
        ] {
            assert!(errors.contains_key(key), "missing {key}");
        }
        assert!(!errors.contains_key("status"));
    }

    #[test]
    fn department_and_date_shapes() {
        let form = EmployeeForm {
            department: "Engineering".to_string(),
            start_date: "01/02/2024".to_string(),
            status: "retired".to_string(),
            ..valid_form()
        };
        let errors = employee_errors(&form);
        assert_eq!(errors["department"], "Please select a valid department");
        assert_eq!(errors["start_date"], "Please enter a valid start date");
        assert_eq!(errors["status"], "Please select a valid status");

        let negative = EmployeeForm {
            department: "-3".to_string(),
            ..valid_form()
        };
        assert_eq!(
            employee_errors(&negative)["department"],
            "Please select a valid department"
        );
    }

    fn department(id: i64, name: &str) -> Department {
        Department {
            id: DepartmentId::new(id),
            name: name.to_string(),
            description: String::new(),
            head: None,
            budget: 0,
        }
    }

    #[test]
    fn department_name_unique_except_self() {
        let existing = vec![department(1, "Engineering"), department(2, "Finance")];
        let form = DepartmentForm {
            name: " engineering ".to_string(),
            budget: "1000".to_string(),
            ..DepartmentForm::default()
        };

        let errors = validate_department(&form, &existing, None).unwrap_err();
        assert_eq!(errors["name"], "A department with this name already exists");

        let draft = validate_department(&form, &existing, Some(DepartmentId::new(1))).unwrap();
        assert_eq!(draft.name, "engineering");
        assert_eq!(draft.budget, 1000);
        assert_eq!(draft.head, None);
    }

    #[test]
    fn department_budget_rules() {
        let missing = DepartmentForm {
            name: "Ops".to_string(),
            ..DepartmentForm::default()
        };
        assert_eq!(
            validate_department(&missing, &[], None).unwrap_err()["budget"],
            "Budget is required"
        );

        let negative = DepartmentForm {
            budget: "-5".to_string(),
            ..missing.clone()
        };
        assert_eq!(
            validate_department(&negative, &[], None).unwrap_err()["budget"],
            "Please enter a valid budget amount"
        );

        let zero = DepartmentForm {
            budget: "0".to_string(),
            ..missing
        };
        assert_eq!(validate_department(&zero, &[], None).unwrap().budget, 0);

        let huge = DepartmentForm {
            name: "Ops".to_string(),
            budget: "1e30".to_string(),
            ..DepartmentForm::default()
        };
        assert_eq!(
            validate_department(&huge, &[], None).unwrap_err()["budget"],
            "Please enter a valid budget amount"
        );
    }

    #[test]
    fn log_form_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let form = LogForm {
            message: "Payroll exported".to_string(),
            ..LogForm::default()
        };
        let draft = validate_log(&form, now).unwrap();
        assert_eq!(draft.level, LogLevel::Info);
        assert_eq!(draft.timestamp, now);
        assert_eq!(draft.name, "info - 2024-06-01 12:00:00");
        assert_eq!(draft.employee_id, None);
    }

    #[test]
    fn log_form_errors() {
        let now = Utc::now();
        let form = LogForm {
            level: "fatal".to_string(),
            employee: "jane".to_string(),
            timestamp: "tomorrow".to_string(),
            ..LogForm::default()
        };
        let errors = validate_log(&form, now).unwrap_err();
        assert_eq!(errors["message"], "Message is required");
        assert_eq!(errors["level"], "Please select a valid log level");
        assert_eq!(errors["employee"], "Please select a valid employee");
        assert_eq!(errors["timestamp"], "Please enter a valid timestamp");
    }

    #[test]
    fn log_form_accepts_local_datetime_input() {
        let form = LogForm {
            message: "x".to_string(),
            timestamp: "2024-02-03T04:05".to_string(),
            employee: "7".to_string(),
            level: "warning".to_string(),
            ..LogForm::default()
        };
        let draft = validate_log(&form, Utc::now()).unwrap();
        assert_eq!(
            draft.timestamp,
            Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 0).unwrap()
        );
        assert_eq!(draft.employee_id, Some(EmployeeId::new(7)));
    }
}
