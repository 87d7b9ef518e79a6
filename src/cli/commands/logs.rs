//! Log command handlers

use anyhow::Context;

use super::{parse_choice, parse_id, report};
use crate::cache::LogFilter;
use crate::cli::LogFields;
use crate::domain::{EmployeeId, LogEntryId};
use crate::models::{LogEntry, LogForm, LogLevel};
use crate::state::AppContext;

impl LogFields {
    fn apply_to(self, form: &mut LogForm) {
        let pairs = [
            (self.message, &mut form.message),
            (self.level, &mut form.level),
            (self.employee, &mut form.employee),
            (self.tags, &mut form.tags),
            (self.name, &mut form.name),
            (self.timestamp, &mut form.timestamp),
        ];
        for (value, slot) in pairs {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

const fn level_indicator(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Info => "ℹ",
        LogLevel::Warning => "⚠",
        LogLevel::Error => "✗",
        LogLevel::Debug => "•",
    }
}

fn print_entry(entry: &LogEntry) {
    println!(
        "{} [{}] {} {}",
        level_indicator(entry.level),
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.level,
        entry.message
    );
    let employee = entry
        .employee_name
        .clone()
        .or_else(|| entry.employee_id.map(|id| format!("#{id}")));
    let mut details = vec![format!("ID: {}", entry.id)];
    if let Some(employee) = employee {
        details.push(format!("Employee: {employee}"));
    }
    if !entry.tags.is_empty() {
        details.push(format!("Tags: {}", entry.tag_list().join(", ")));
    }
    println!("  {}", details.join(" | "));
}

pub async fn cmd_log_list(
    ctx: &AppContext,
    level: Option<String>,
    employee: Option<String>,
) -> anyhow::Result<()> {
    let mut view = ctx.logger_view();
    view.load().await.context("Failed to load logs")?;

    view.filter = LogFilter {
        level: parse_choice(level.as_deref())?,
        employee_id: employee
            .as_deref()
            .map(|raw| parse_id::<EmployeeId>(raw, "employee"))
            .transpose()?,
    };

    let entries = view.visible();
    if entries.is_empty() {
        println!("No log entries found.");
        return Ok(());
    }

    println!("Log entries ({} shown)", entries.len());
    println!("{:-<70}", "");
    for entry in entries {
        print_entry(entry);
    }
    Ok(())
}

pub async fn cmd_log_show(ctx: &AppContext, id: &str) -> anyhow::Result<()> {
    let id: LogEntryId = parse_id(id, "log entry")?;
    let entry = ctx.logs.get(id).await?;

    println!("{}", entry.name);
    println!("{:-<70}", "");
    print_entry(&entry);
    Ok(())
}

pub async fn cmd_log_add(ctx: &AppContext, fields: LogFields) -> anyhow::Result<()> {
    let mut view = ctx.logger_view();
    let mut form = LogForm::default();
    fields.apply_to(&mut form);

    let entry = view.create(&form).await.map_err(report)?;
    println!("✓ Added log entry {} ({})", entry.id, entry.name);
    Ok(())
}

pub async fn cmd_log_edit(ctx: &AppContext, id: &str, fields: LogFields) -> anyhow::Result<()> {
    let id: LogEntryId = parse_id(id, "log entry")?;
    let mut view = ctx.logger_view();

    let existing = ctx.logs.get(id).await?;
    let mut form = LogForm::from_entry(&existing);
    fields.apply_to(&mut form);

    let entry = view.update(id, &form).await.map_err(report)?;
    println!("✓ Updated log entry {} ({})", entry.id, entry.name);
    Ok(())
}

pub async fn cmd_log_remove(ctx: &AppContext, id: &str) -> anyhow::Result<()> {
    let id: LogEntryId = parse_id(id, "log entry")?;
    let mut view = ctx.logger_view();

    if view.delete(id).await? {
        println!("✓ Removed log entry {id}");
    } else {
        println!("Log entry {id} was not removed.");
    }
    Ok(())
}
