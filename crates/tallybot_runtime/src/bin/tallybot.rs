//! Tallybot CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tallybot_api::{HttpApiClient, MemoryApiClient, SharedApiClient};
use tallybot_commands::CommandRegistry;
use tallybot_runtime::{Config, ConsoleSession, Dispatcher, logging};

/// Handle the console session sends messages as.
const OPERATOR: &str = "@operator:console";

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    config_path: Option<PathBuf>,
    offline: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--offline" => config.offline = true,
            "-c" | "--config" => {
                i += 1;
                if i >= args.len() {
                    return Err("--config requires a path".into());
                }
                config.config_path = Some(PathBuf::from(&args[i]));
            }
            arg => {
                return Err(format!("unknown option: {arg}").into());
            }
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(());
    }
    if cli.show_version {
        println!("tallybot {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = match &cli.config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    logging::init(&config.log_filter);

    let runtime = tokio::runtime::Runtime::new()?;

    let api: SharedApiClient = if cli.offline || !config.has_api_endpoint() {
        tracing::info!("no ledger endpoint configured, using the in-memory ledger");
        Arc::new(demo_ledger())
    } else {
        let client = runtime.block_on(HttpApiClient::connect(
            &config.api.base_url,
            &config.api.app_name,
            &config.api.app_password,
        ))?;
        Arc::new(client)
    };

    let registry = Arc::new(CommandRegistry::with_defaults());
    let dispatcher = Dispatcher::new(api, Arc::clone(&registry), &config.command_prefix);

    let mut session = ConsoleSession::new(dispatcher, &registry, OPERATOR)?;
    session.run(runtime.handle())?;
    Ok(())
}

/// Seeds a small ledger so the offline console has something to play with.
fn demo_ledger() -> MemoryApiClient {
    let client = MemoryApiClient::new();
    client.seed_user(OPERATOR, Some("operator"), 0);
    client.seed_user("@alice:console", Some("alice"), 1250);
    client.seed_user("@bob:console", Some("bob"), -300);
    client.seed_consumable("mate", 150, "🍾", 20, &["Cheers!", "Enjoy!", "Hydrate!"]);
    client.seed_consumable("coffee", 80, "☕", 50, &["Stay awake!"]);
    client
}

fn print_help() {
    println!(
        "Tallybot - chat bot for shared drinks and money

USAGE:
    tallybot [OPTIONS]

OPTIONS:
    -h, --help           Print help information
    -V, --version        Print version information
    -c, --config PATH    Load configuration from a JSON file
        --offline        Use the in-memory demo ledger even when a
                         ledger endpoint is configured

Without a configured ledger endpoint the console runs against an
in-memory demo ledger. Inside the console, type commands the way a
chat user would, e.g. `!balance` or `!send 2.50 @alice:console thanks`."
    );
}
