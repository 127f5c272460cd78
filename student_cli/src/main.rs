//! # Student CLI
//!
//! Command-line client for the student-crud REST service. Without a
//! subcommand it runs the interactive numbered menu.

use clap::Parser;
use std::process::ExitCode;
use student_cli::{
    execute, ClientConfig, ClientResult, CommandOutcome, Commands, Menu, OutputFormat,
    StudentClient, DEFAULT_BASE_URL,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "student-cli")]
#[command(about = "Command-line client for the student records service")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Server root URL
    #[arg(long, env = "STUDENT_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 30000)]
    timeout_ms: u64,

    /// Output format, for subcommands and the menu alike
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(cli).await {
        Ok(CommandOutcome::Success) => ExitCode::SUCCESS,
        Ok(CommandOutcome::Failure) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<CommandOutcome> {
    let client = StudentClient::new(ClientConfig {
        base_url: cli.base_url,
        timeout_ms: cli.timeout_ms,
    })?;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            Menu::new(&client, stdin.lock(), stdout.lock())
                .with_format(cli.format)
                .run()
                .await?;
            Ok(CommandOutcome::Success)
        }
        command => {
            let stdout = std::io::stdout();
            execute(&client, command, cli.format, &mut stdout.lock()).await
        }
    }
}
