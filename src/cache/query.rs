//! Client-side filtering and sorting.

use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Reverse;

use crate::domain::{EmployeeId, SortOrder};
use crate::models::{Employee, EmployeeStatus, LogEntry, LogLevel};

/// A comparable projection of one column.
///
/// `Missing` is declared first so it orders before every present value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Missing,
    Int(i64),
    Date(NaiveDate),
    Time(DateTime<Utc>),
    /// Lowercased, so text compares case-insensitively.
    Text(String),
}

impl SortValue {
    fn text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Self::Missing
        } else {
            Self::Text(trimmed.to_lowercase())
        }
    }

    fn optional_text(value: Option<&str>) -> Self {
        value.map_or(Self::Missing, Self::text)
    }
}

pub trait SortKey<T>: Copy {
    fn value(&self, item: &T) -> SortValue;
}

pub trait Predicate<T> {
    fn matches(&self, item: &T) -> bool;
}

impl<T, F> Predicate<T> for F
where
    F: Fn(&T) -> bool,
{
    fn matches(&self, item: &T) -> bool {
        self(item)
    }
}

/// Stable sort. Descending reverses the comparison, not the result, so equal
/// keys keep their relative order in both directions.
pub fn sort_by<T, K: SortKey<T>>(items: &mut [&T], key: K, order: SortOrder) {
    if order.is_ascending() {
        items.sort_by_cached_key(|item| key.value(item));
    } else {
        items.sort_by_cached_key(|item| Reverse(key.value(item)));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmployeeSortKey {
    #[default]
    Name,
    Email,
    Position,
    Department,
    Status,
    Salary,
    StartDate,
}

impl EmployeeSortKey {
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Email,
        Self::Position,
        Self::Department,
        Self::Status,
        Self::Salary,
        Self::StartDate,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Position => "position",
            Self::Department => "department",
            Self::Status => "status",
            Self::Salary => "salary",
            Self::StartDate => "start-date",
        }
    }
}

impl std::str::FromStr for EmployeeSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| format!("unknown sort key: {s}"))
    }
}

impl SortKey<Employee> for EmployeeSortKey {
    fn value(&self, e: &Employee) -> SortValue {
        match self {
            Self::Name => SortValue::text(&e.full_name()),
            Self::Email => SortValue::text(&e.email),
            Self::Position => SortValue::text(&e.position),
            Self::Department => SortValue::optional_text(e.department_name.as_deref()),
            Self::Status => SortValue::text(e.status.as_str()),
            Self::Salary => SortValue::Int(i64::try_from(e.salary).unwrap_or(i64::MAX)),
            Self::StartDate => e.start_date.map_or(SortValue::Missing, SortValue::Date),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogSortKey {
    #[default]
    Timestamp,
    Level,
    Message,
    Employee,
}

impl SortKey<LogEntry> for LogSortKey {
    fn value(&self, entry: &LogEntry) -> SortValue {
        match self {
            Self::Timestamp => SortValue::Time(entry.timestamp),
            Self::Level => SortValue::text(entry.level.as_str()),
            Self::Message => SortValue::text(&entry.message),
            Self::Employee => SortValue::optional_text(entry.employee_name.as_deref()),
        }
    }
}

/// Employees page filters. All set criteria must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    /// Case-insensitive substring over name, email, position and department.
    pub search: String,
    /// Exact department label.
    pub department: Option<String>,
    pub status: Option<EmployeeStatus>,
}

impl EmployeeFilter {
    fn search_matches(&self, e: &Employee) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            Some(e.full_name()),
            Some(e.email.clone()),
            Some(e.position.clone()),
            e.department_name.clone(),
        ]
        .into_iter()
        .flatten()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
    }
}

impl Predicate<Employee> for EmployeeFilter {
    fn matches(&self, e: &Employee) -> bool {
        let department_ok = self
            .department
            .as_deref()
            .is_none_or(|wanted| e.department_name.as_deref() == Some(wanted));
        let status_ok = self.status.is_none_or(|wanted| e.status == wanted);
        department_ok && status_ok && self.search_matches(e)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub level: Option<LogLevel>,
    pub employee_id: Option<EmployeeId>,
}

impl Predicate<LogEntry> for LogFilter {
    fn matches(&self, entry: &LogEntry) -> bool {
        self.level.is_none_or(|l| entry.level == l)
            && self
                .employee_id
                .is_none_or(|id| entry.employee_id == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DepartmentId, LogEntryId};
    use chrono::TimeZone;

    fn employee(id: i64, first: &str, last: &str, dept: Option<&str>) -> Employee {
        Employee {
            id: EmployeeId::new(id),
            display_name: format!("{first} {last}"),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}.{}@co.com", first.to_lowercase(), last.to_lowercase()),
            phone: String::new(),
            position: "Analyst".to_string(),
            department_id: dept.map(|_| DepartmentId::new(1)),
            department_name: dept.map(str::to_string),
            start_date: None,
            status: EmployeeStatus::Active,
            salary: 50_000,
            manager: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn names<'a>(list: &[&'a Employee]) -> Vec<&'a str> {
        list.iter().map(|e| e.last_name.as_str()).collect()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let e = employee(1, "John", "Smith", Some("Engineering"));
        let filter = EmployeeFilter {
            search: "smi".to_string(),
            ..EmployeeFilter::default()
        };
        assert!(filter.matches(&e));

        let by_dept = EmployeeFilter {
            search: "ENGIN".to_string(),
            ..EmployeeFilter::default()
        };
        assert!(by_dept.matches(&e));

        let miss = EmployeeFilter {
            search: "xyz".to_string(),
            ..EmployeeFilter::default()
        };
        assert!(!miss.matches(&e));
    }

    #[test]
    fn filters_combine_with_and() {
        let mut e = employee(1, "John", "Smith", Some("Engineering"));
        e.status = EmployeeStatus::OnLeave;

        let filter = EmployeeFilter {
            search: "john".to_string(),
            department: Some("Engineering".to_string()),
            status: Some(EmployeeStatus::Active),
        };
        assert!(!filter.matches(&e));

        let filter = EmployeeFilter {
            status: Some(EmployeeStatus::OnLeave),
            ..filter
        };
        assert!(filter.matches(&e));

        let other_dept = EmployeeFilter {
            department: Some("Eng".to_string()),
            ..filter
        };
        assert!(!other_dept.matches(&e));
    }

    #[test]
    fn descending_reverses_ascending_for_distinct_keys() {
        let a = employee(1, "Amy", "Adams", None);
        let b = employee(2, "Bob", "Brown", None);
        let c = employee(3, "cat", "Cole", None);

        let mut asc = vec![&c, &a, &b];
        sort_by(&mut asc, EmployeeSortKey::Name, SortOrder::Ascending);
        let mut desc = vec![&c, &a, &b];
        sort_by(&mut desc, EmployeeSortKey::Name, SortOrder::Descending);

        let mut reversed = names(&asc);
        reversed.reverse();
        assert_eq!(names(&desc), reversed);
        assert_eq!(names(&asc), vec!["Adams", "Brown", "Cole"]);
    }

    #[test]
    fn ties_keep_original_order_both_ways() {
        let a = employee(1, "A", "First", None);
        let b = employee(2, "B", "Second", None);
        let c = employee(3, "C", "Third", None);

        let mut asc = vec![&a, &b, &c];
        sort_by(&mut asc, EmployeeSortKey::Salary, SortOrder::Ascending);
        assert_eq!(names(&asc), vec!["First", "Second", "Third"]);

        let mut desc = vec![&a, &b, &c];
        sort_by(&mut desc, EmployeeSortKey::Salary, SortOrder::Descending);
        assert_eq!(names(&desc), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn missing_values_sort_first_ascending_last_descending() {
        let none = employee(1, "No", "Dept", None);
        let eng = employee(2, "Has", "Eng", Some("Engineering"));
        let fin = employee(3, "Has", "Fin", Some("finance"));

        let mut asc = vec![&fin, &eng, &none];
        sort_by(&mut asc, EmployeeSortKey::Department, SortOrder::Ascending);
        assert_eq!(names(&asc), vec!["Dept", "Eng", "Fin"]);

        let mut desc = vec![&none, &eng, &fin];
        sort_by(&mut desc, EmployeeSortKey::Department, SortOrder::Descending);
        assert_eq!(names(&desc), vec!["Fin", "Eng", "Dept"]);
    }

    #[test]
    fn log_filter_by_level_and_employee() {
        let entry = LogEntry {
            id: LogEntryId::new(1),
            name: String::new(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            level: LogLevel::Warning,
            message: "Employee deleted: Jane Doe".to_string(),
            employee_id: Some(EmployeeId::new(7)),
            employee_name: None,
            tags: String::new(),
        };

        assert!(LogFilter::default().matches(&entry));
        assert!(
            LogFilter {
                level: Some(LogLevel::Warning),
                employee_id: Some(EmployeeId::new(7)),
            }
            .matches(&entry)
        );
        assert!(
            !LogFilter {
                level: Some(LogLevel::Info),
                employee_id: None,
            }
            .matches(&entry)
        );
        assert!(
            !LogFilter {
                level: None,
                employee_id: Some(EmployeeId::new(8)),
            }
            .matches(&entry)
        );
    }

    #[test]
    fn sort_key_parsing() {
        assert_eq!("Salary".parse::<EmployeeSortKey>().unwrap(), EmployeeSortKey::Salary);
        assert_eq!(
            "start-date".parse::<EmployeeSortKey>().unwrap(),
            EmployeeSortKey::StartDate
        );
        assert!("age".parse::<EmployeeSortKey>().is_err());
    }
}
