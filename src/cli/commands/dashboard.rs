//! Dashboard command handler

use anyhow::Context;

use super::money;
use crate::state::AppContext;
use crate::views::DashboardSummary;

pub async fn cmd_dashboard(ctx: &AppContext) -> anyhow::Result<()> {
    let summary = DashboardSummary::load(&ctx.employees, &ctx.departments)
        .await
        .context("Failed to load dashboard")?;

    println!("Dashboard");
    println!("{:-<70}", "");
    println!(
        "Employees: {} | Active: {} | On Leave: {} | Departments: {}",
        summary.total_employees,
        summary.active_employees,
        summary.on_leave_employees,
        summary.total_departments
    );

    println!();
    println!("Recent employees");
    if summary.recent_employees.is_empty() {
        println!("  No employees yet");
    }
    for e in &summary.recent_employees {
        println!(
            "  {} - {} ({})",
            e.full_name(),
            e.position,
            e.department_name.as_deref().unwrap_or("-")
        );
    }

    println!();
    println!("Departments");
    if summary.departments.is_empty() {
        println!("  No departments configured");
    }
    for d in &summary.departments {
        println!(
            "  {:<24} {:>4} employees  {:>14}",
            d.name,
            d.headcount,
            money(d.budget)
        );
    }
    Ok(())
}
