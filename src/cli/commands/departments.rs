//! Department command handlers

use anyhow::Context;

use super::{money, parse_id, report};
use crate::cli::DepartmentFields;
use crate::domain::DepartmentId;
use crate::models::DepartmentForm;
use crate::state::AppContext;

impl DepartmentFields {
    fn apply_to(self, form: &mut DepartmentForm) {
        let pairs = [
            (self.name, &mut form.name),
            (self.description, &mut form.description),
            (self.head, &mut form.head),
            (self.budget, &mut form.budget),
        ];
        for (value, slot) in pairs {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

pub async fn cmd_department_list(ctx: &AppContext) -> anyhow::Result<()> {
    let mut view = ctx.departments_view();
    view.load().await.context("Failed to load departments")?;

    let stats = view.stats();
    if stats.is_empty() {
        println!("No departments found.");
        println!();
        println!("Add one with: staffdesk departments add --name \"Engineering\" --budget 100000");
        return Ok(());
    }

    println!("Departments ({} total)", stats.len());
    println!("{:-<70}", "");
    for s in &stats {
        let d = &s.department;
        println!("{} (ID: {})", d.name, d.id);
        if !d.description.is_empty() {
            println!("  {}", d.description);
        }
        if let Some(head) = &d.head {
            println!("  Head: {head}");
        }
        println!(
            "  Employees: {} | Active: {} | On Leave: {} | Inactive: {} | Budget: {}",
            s.total,
            s.active,
            s.on_leave,
            s.inactive,
            money(d.budget)
        );
    }

    println!("{:-<70}", "");
    println!(
        "Total departments: {} | Total employees: {} | Total budget: {}",
        stats.len(),
        view.total_employees(),
        money(view.total_budget())
    );
    Ok(())
}

pub async fn cmd_department_add(ctx: &AppContext, fields: DepartmentFields) -> anyhow::Result<()> {
    let mut view = ctx.departments_view();
    view.load().await.context("Failed to load departments")?;

    let mut form = DepartmentForm::default();
    fields.apply_to(&mut form);

    let department = view.save(None, &form).await.map_err(report)?;
    println!("✓ Added department: {} (ID: {})", department.name, department.id);
    Ok(())
}

pub async fn cmd_department_edit(
    ctx: &AppContext,
    id: &str,
    fields: DepartmentFields,
) -> anyhow::Result<()> {
    let id: DepartmentId = parse_id(id, "department")?;
    let mut view = ctx.departments_view();
    view.load().await.context("Failed to load departments")?;

    let existing = match view.departments().iter().find(|d| d.id == id) {
        Some(d) => d.clone(),
        None => ctx.departments.get(id).await?,
    };
    let mut form = DepartmentForm::from_department(&existing);
    fields.apply_to(&mut form);

    let department = view.save(Some(id), &form).await.map_err(report)?;
    println!("✓ Updated department: {} (ID: {})", department.name, department.id);
    Ok(())
}

pub async fn cmd_department_remove(ctx: &AppContext, id: &str) -> anyhow::Result<()> {
    let id: DepartmentId = parse_id(id, "department")?;
    let mut view = ctx.departments_view();
    view.load().await.context("Failed to load departments")?;

    let assigned = view
        .stats()
        .into_iter()
        .find(|s| s.department.id == id)
        .map_or(0, |s| s.total);

    if view.delete(id).await? {
        println!("✓ Removed department {id}");
        if assigned > 0 {
            println!("  {assigned} employee(s) still reference this department.");
        }
    } else {
        println!("Department {id} was not removed.");
    }
    Ok(())
}
