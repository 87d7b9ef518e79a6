//! Employee command handlers

use anyhow::Context;

use super::{money, parse_choice, parse_id, report};
use crate::cache::{EmployeeFilter, EmployeeSortKey};
use crate::cli::EmployeeFields;
use crate::domain::{EmployeeId, SortOrder};
use crate::models::{Employee, EmployeeForm, EmployeeStatus};
use crate::state::AppContext;

impl EmployeeFields {
    /// Overwrites the form fields that were given on the command line.
    fn apply_to(self, form: &mut EmployeeForm) {
        let pairs = [
            (self.first_name, &mut form.first_name),
            (self.last_name, &mut form.last_name),
            (self.email, &mut form.email),
            (self.phone, &mut form.phone),
            (self.position, &mut form.position),
            (self.department, &mut form.department),
            (self.start_date, &mut form.start_date),
            (self.status, &mut form.status),
            (self.salary, &mut form.salary),
            (self.manager, &mut form.manager),
        ];
        for (value, slot) in pairs {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

const fn status_indicator(status: EmployeeStatus) -> &'static str {
    match status {
        EmployeeStatus::Active => "🟢",
        EmployeeStatus::OnLeave => "🟡",
        EmployeeStatus::Inactive => "⚪",
    }
}

fn print_row(e: &Employee) {
    println!("{} {} <{}>", status_indicator(e.status), e.full_name(), e.email);
    println!(
        "  ID: {} | {} | {} | {}",
        e.id,
        e.position,
        e.department_name.as_deref().unwrap_or("-"),
        money(e.salary)
    );
}

pub async fn cmd_employee_list(
    ctx: &AppContext,
    search: Option<String>,
    department: Option<String>,
    status: Option<String>,
    sort: &str,
    desc: bool,
) -> anyhow::Result<()> {
    let mut view = ctx.employees_view();
    view.load().await.context("Failed to load employees")?;

    view.filter = EmployeeFilter {
        search: search.unwrap_or_default(),
        department,
        status: parse_choice(status.as_deref())?,
    };
    view.sort_key = sort.parse::<EmployeeSortKey>().map_err(anyhow::Error::msg)?;
    view.sort_order = if desc {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };

    let rows = view.visible();
    if rows.is_empty() {
        println!("No employees found.");
        if view.cache().is_empty() {
            println!();
            println!("Add one with: staffdesk employees add --first-name ...");
        }
        return Ok(());
    }

    println!("Employees ({} of {})", rows.len(), view.cache().len());
    println!("{:-<70}", "");
    for employee in rows {
        print_row(employee);
    }

    println!();
    println!("Legend: 🟢 Active | 🟡 On Leave | ⚪ Inactive");
    Ok(())
}

pub async fn cmd_employee_show(ctx: &AppContext, id: &str) -> anyhow::Result<()> {
    let id: EmployeeId = parse_id(id, "employee")?;
    let e = ctx.employees.get(id).await?;

    println!("{}", e.full_name());
    println!("{:-<70}", "");
    println!("ID:          {}", e.id);
    println!("Email:       {}", e.email);
    println!("Phone:       {}", e.phone);
    println!("Position:    {}", e.position);
    println!(
        "Department:  {}",
        e.department_name
            .clone()
            .or_else(|| e.department_id.map(|d| format!("#{d}")))
            .unwrap_or_else(|| "-".to_string())
    );
    println!("Status:      {}", e.status.label());
    println!("Salary:      {}", money(e.salary));
    if let Some(date) = e.start_date {
        println!("Start date:  {}", date.format("%Y-%m-%d"));
    }
    if let Some(manager) = &e.manager {
        println!("Manager:     {manager}");
    }
    if let Some(created) = e.created_at {
        println!("Created:     {}", created.format("%Y-%m-%d %H:%M"));
    }
    Ok(())
}

pub async fn cmd_employee_add(ctx: &AppContext, fields: EmployeeFields) -> anyhow::Result<()> {
    let mut view = ctx.employees_view();
    view.load().await.context("Failed to load employees")?;

    let mut form = EmployeeForm::default();
    fields.apply_to(&mut form);

    let employee = view.save(None, &form).await.map_err(report)?;
    println!("✓ Added employee: {} (ID: {})", employee.full_name(), employee.id);
    Ok(())
}

pub async fn cmd_employee_edit(
    ctx: &AppContext,
    id: &str,
    fields: EmployeeFields,
) -> anyhow::Result<()> {
    let id: EmployeeId = parse_id(id, "employee")?;
    let mut view = ctx.employees_view();
    view.load().await.context("Failed to load employees")?;

    let mut form = match view.get(id) {
        Some(existing) => EmployeeForm::from_employee(existing),
        None => EmployeeForm::from_employee(&ctx.employees.get(id).await?),
    };
    fields.apply_to(&mut form);

    let employee = view.save(Some(id), &form).await.map_err(report)?;
    println!("✓ Updated employee: {} (ID: {})", employee.full_name(), employee.id);
    Ok(())
}

pub async fn cmd_employee_remove(ctx: &AppContext, id: &str) -> anyhow::Result<()> {
    let id: EmployeeId = parse_id(id, "employee")?;
    let mut view = ctx.employees_view();
    view.load().await.context("Failed to load employees")?;

    let name = view.get(id).map(Employee::full_name);
    if view.delete(id).await? {
        println!(
            "✓ Removed employee: {}",
            name.unwrap_or_else(|| format!("ID {id}"))
        );
    } else {
        println!("Employee {id} was not removed.");
    }
    Ok(())
}
