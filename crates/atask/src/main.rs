use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod logging;
mod output;

use cli::{Cli, Commands, ConfigCommands, RecurCommands};
use commands::config::{load_config, Config, ConfigSetOptions};
use commands::done::DoneOptions;
use commands::new::NewOptions;
use commands::query::QueryOptions;
use commands::recur::RecurNextOptions;
use commands::update::UpdateOptions;
use commands::{CommandContext, CommandError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{error_json:#}");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(error_exit_status(&e))
        }
    }
}

fn run(cli: &Cli) -> commands::Result<()> {
    if let Commands::Completions { shell } = &cli.command {
        return Ok(commands::completions::execute(shell)?);
    }

    // `config path` must work even when the config file does not parse.
    let loaded = load_config();
    if let Commands::Config {
        command: Some(ConfigCommands::Path),
    } = &cli.command
    {
        let fallback = Config::default();
        let ctx = CommandContext::from_cli(cli, loaded.as_ref().unwrap_or(&fallback));
        return commands::config::execute_path(&ctx);
    }

    let config = loaded?;
    let ctx = CommandContext::from_cli(cli, &config);

    match &cli.command {
        Commands::Query {
            expr,
            sort,
            reverse,
            limit,
            all,
        } => commands::query::execute(
            &ctx,
            &config,
            &QueryOptions {
                expr: expr.clone(),
                sort: *sort,
                reverse: *reverse,
                limit: *limit,
                all: *all,
            },
        ),
        Commands::New {
            title,
            priority,
            due,
            area,
            estimate,
            tags,
            recur,
        } => commands::new::execute(
            &ctx,
            &config,
            &NewOptions {
                title: title.clone(),
                priority: priority.clone(),
                due: *due,
                area: area.clone(),
                estimate: *estimate,
                tags: tags.clone(),
                recur: recur.clone(),
            },
        ),
        Commands::Update {
            ids,
            priority,
            due,
            start,
            area,
            estimate,
            status,
            recur,
        } => commands::update::execute(
            &ctx,
            &config,
            &UpdateOptions {
                ids: ids.clone(),
                priority: priority.clone(),
                due: *due,
                start: *start,
                area: area.clone(),
                estimate: *estimate,
                status: status.clone(),
                recur: recur.clone(),
            },
        ),
        Commands::Done { ids } => {
            commands::done::execute(&ctx, &config, &DoneOptions { ids: ids.clone() })
        }
        Commands::Recur { command } => match command {
            RecurCommands::Check { pattern } => commands::recur::execute_check(&ctx, pattern),
            RecurCommands::Next {
                pattern,
                due,
                today,
            } => commands::recur::execute_next(
                &ctx,
                &RecurNextOptions {
                    pattern: pattern.clone(),
                    due: *due,
                    today: *today,
                },
            ),
        },
        Commands::Config { command } => match command {
            None | Some(ConfigCommands::Show) => commands::config::execute_show(&ctx, &config),
            Some(ConfigCommands::Set { key, value }) => commands::config::execute_set(
                &ctx,
                config,
                &ConfigSetOptions {
                    key: key.clone(),
                    value: value.clone(),
                },
            ),
            Some(ConfigCommands::Path) => commands::config::execute_path(&ctx),
        },
        Commands::Completions { .. } => Ok(()),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Query(_) => "QUERY_ERROR",
        CommandError::Pattern(_) => "PATTERN_ERROR",
        CommandError::Schedule(_) => "SCHEDULE_ERROR",
        CommandError::Store(_) => "TASK_FILE_ERROR",
        CommandError::InvalidArgument(_) => "INVALID_ARGUMENT",
        CommandError::TaskNotFound(_) => "NOT_FOUND",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the process exit status for an error.
fn error_exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Query(_)
        | CommandError::Pattern(_)
        | CommandError::InvalidArgument(_)
        | CommandError::Json(_) => 1,
        CommandError::Schedule(_) | CommandError::TaskNotFound(_) => 2,
        CommandError::Io(_) => 3,
        CommandError::Config(_) | CommandError::Store(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atask_core_rs::query::QueryParser;
    use atask_core_rs::recurrence::PatternError;

    #[test]
    fn test_error_codes() {
        let query_err = CommandError::from(QueryParser::parse("status").unwrap_err());
        assert_eq!(error_code(&query_err), "QUERY_ERROR");
        assert_eq!(error_exit_status(&query_err), 1);

        let pattern_err = CommandError::from(PatternError::Empty);
        assert_eq!(error_code(&pattern_err), "PATTERN_ERROR");

        let missing = CommandError::TaskNotFound(3);
        assert_eq!(error_code(&missing), "NOT_FOUND");
        assert_eq!(error_exit_status(&missing), 2);

        let invalid = CommandError::InvalidArgument("estimate must not be negative".to_string());
        assert_eq!(error_code(&invalid), "INVALID_ARGUMENT");
        assert_eq!(error_exit_status(&invalid), 1);

        let config_err = CommandError::Config("bad".to_string());
        assert_eq!(error_exit_status(&config_err), 5);
    }
}
