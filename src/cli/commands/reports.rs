//! Reports command handler

use anyhow::Context;

use super::money;
use crate::models::EmployeeStatus;
use crate::state::AppContext;
use crate::views::ReportSummary;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole(amount: f64) -> u64 {
    amount.round() as u64
}

pub async fn cmd_reports(ctx: &AppContext) -> anyhow::Result<()> {
    let report = ReportSummary::load(&ctx.employees, &ctx.departments)
        .await
        .context("Failed to load reports")?;

    println!("Reports");
    println!("{:-<70}", "");
    println!(
        "Employees: {} ({}% active)",
        report.total_employees,
        report.active_percent()
    );
    println!("Total salary: {}", money(report.total_salary));
    println!("Average salary: {}", money(whole(report.average_salary)));

    println!();
    println!(
        "{:<20} {:>5} {:>14} {:>12} {:>14} {:>8}",
        "Department", "Staff", "Salary", "Average", "Budget", "Used"
    );
    for d in &report.departments {
        println!(
            "{:<20} {:>5} {:>14} {:>12} {:>14} {:>7.1}%",
            d.name,
            d.headcount,
            money(d.total_salary),
            money(whole(d.average_salary)),
            money(d.budget),
            d.utilization
        );
    }

    println!();
    println!("Status distribution");
    for status in EmployeeStatus::ALL {
        let count = match status {
            EmployeeStatus::Active => report.status.active,
            EmployeeStatus::Inactive => report.status.inactive,
            EmployeeStatus::OnLeave => report.status.on_leave,
        };
        println!(
            "  {:<10} {:>4} ({}% of total)",
            status.label(),
            count,
            report.status_percent(status)
        );
    }
    Ok(())
}
