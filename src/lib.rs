pub mod cache;
pub mod cli;
pub mod clients;
pub mod config;
pub mod domain;
pub mod gateway;
pub mod models;
pub mod schema;
pub mod services;
pub mod state;
pub mod validation;
pub mod views;

use clap::{CommandFactory, Parser};
pub use config::Config;
use config::LogFormat;
use state::AppContext;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, DepartmentCommands, EmployeeCommands, LogCommands};

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.general.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    if matches!(command, Commands::Init) {
        return cli::cmd_init();
    }

    debug!(mode = ?config.remote.mode, "Building application context");
    let ctx = AppContext::from_config(config)?;

    match command {
        Commands::Dashboard => cli::cmd_dashboard(&ctx).await,
        Commands::Reports => cli::cmd_reports(&ctx).await,
        Commands::Init => cli::cmd_init(),

        Commands::Employees { command } => match command {
            EmployeeCommands::List {
                search,
                department,
                status,
                sort,
                desc,
            } => cli::cmd_employee_list(&ctx, search, department, status, &sort, desc).await,
            EmployeeCommands::Show { id } => cli::cmd_employee_show(&ctx, &id).await,
            EmployeeCommands::Add(fields) => cli::cmd_employee_add(&ctx, fields).await,
            EmployeeCommands::Edit { id, fields } => {
                cli::cmd_employee_edit(&ctx, &id, fields).await
            }
            EmployeeCommands::Remove { id } => cli::cmd_employee_remove(&ctx, &id).await,
        },

        Commands::Departments { command } => match command {
            DepartmentCommands::List => cli::cmd_department_list(&ctx).await,
            DepartmentCommands::Add(fields) => cli::cmd_department_add(&ctx, fields).await,
            DepartmentCommands::Edit { id, fields } => {
                cli::cmd_department_edit(&ctx, &id, fields).await
            }
            DepartmentCommands::Remove { id } => cli::cmd_department_remove(&ctx, &id).await,
        },

        Commands::Logs { command } => match command {
            LogCommands::List { level, employee } => cli::cmd_log_list(&ctx, level, employee).await,
            LogCommands::Show { id } => cli::cmd_log_show(&ctx, &id).await,
            LogCommands::Add(fields) => cli::cmd_log_add(&ctx, fields).await,
            LogCommands::Edit { id, fields } => cli::cmd_log_edit(&ctx, &id, fields).await,
            LogCommands::Remove { id } => cli::cmd_log_remove(&ctx, &id).await,
        },
    }
}
