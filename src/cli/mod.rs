//! CLI module - Command-line interface for staffdesk
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Args, Parser, Subcommand};

/// staffdesk - Employee management dashboard
#[derive(Parser)]
#[command(name = "staffdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Headcount overview and most recent hires
    #[command(alias = "d")]
    Dashboard,

    /// Manage employees
    #[command(alias = "e", alias = "emp")]
    Employees {
        #[command(subcommand)]
        command: EmployeeCommands,
    },

    /// Manage departments
    #[command(alias = "dept")]
    Departments {
        #[command(subcommand)]
        command: DepartmentCommands,
    },

    /// Browse and edit the activity log
    #[command(alias = "log")]
    Logs {
        #[command(subcommand)]
        command: LogCommands,
    },

    /// Salary and department analytics
    Reports,

    /// Create default config file
    Init,
}

#[derive(Subcommand)]
pub enum EmployeeCommands {
    /// List employees
    #[command(alias = "ls")]
    List {
        /// Case-insensitive search over name, email, position and department
        #[arg(short, long)]
        search: Option<String>,
        /// Exact department name
        #[arg(short, long)]
        department: Option<String>,
        /// active, inactive or on-leave
        #[arg(long)]
        status: Option<String>,
        /// name, email, position, department, status, salary or start-date
        #[arg(long, default_value = "name")]
        sort: String,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// Show one employee
    Show {
        /// Employee ID
        id: String,
    },
    /// Add an employee
    Add(EmployeeFields),
    /// Edit an employee; omitted fields keep their value
    Edit {
        /// Employee ID
        id: String,
        #[command(flatten)]
        fields: EmployeeFields,
    },
    /// Remove an employee
    #[command(alias = "rm")]
    Remove {
        /// Employee ID
        id: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct EmployeeFields {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    /// Department ID
    #[arg(long)]
    pub department: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub start_date: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub salary: Option<String>,
    #[arg(long)]
    pub manager: Option<String>,
}

#[derive(Subcommand)]
pub enum DepartmentCommands {
    /// List departments with headcount
    #[command(alias = "ls")]
    List,
    /// Add a department
    Add(DepartmentFields),
    /// Edit a department; omitted fields keep their value
    Edit {
        /// Department ID
        id: String,
        #[command(flatten)]
        fields: DepartmentFields,
    },
    /// Remove a department
    #[command(alias = "rm")]
    Remove {
        /// Department ID
        id: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct DepartmentFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Head of department
    #[arg(long)]
    pub head: Option<String>,
    #[arg(long)]
    pub budget: Option<String>,
}

#[derive(Subcommand)]
pub enum LogCommands {
    /// List log entries, newest first
    #[command(alias = "ls")]
    List {
        /// info, warning, error or debug
        #[arg(short, long)]
        level: Option<String>,
        /// Employee ID
        #[arg(short, long)]
        employee: Option<String>,
    },
    /// Show one log entry
    Show {
        /// Log entry ID
        id: String,
    },
    /// Add a log entry
    Add(LogFields),
    /// Edit a log entry; omitted fields keep their value
    Edit {
        /// Log entry ID
        id: String,
        #[command(flatten)]
        fields: LogFields,
    },
    /// Remove a log entry
    #[command(alias = "rm")]
    Remove {
        /// Log entry ID
        id: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct LogFields {
    #[arg(long)]
    pub message: Option<String>,
    #[arg(long)]
    pub level: Option<String>,
    /// Employee ID
    #[arg(long)]
    pub employee: Option<String>,
    /// Comma separated
    #[arg(long)]
    pub tags: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    /// YYYY-MM-DDTHH:MM or RFC 3339; defaults to now
    #[arg(long)]
    pub timestamp: Option<String>,
}

pub use commands::*;
