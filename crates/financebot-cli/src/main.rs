//! `financebot` CLI: terminal host and scripting entry points for the chat widget

use clap::{Parser, Subcommand};
use financebot_engine::{ChatConfig, Message, Session, SystemClock, Topic};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Financial assistant chat widget for the terminal
#[derive(Parser)]
#[command(name = "financebot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file while the chat widget owns the terminal
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat widget (default when no command specified)
    Chat,

    /// Print the canned reply for a message and exit
    Ask {
        /// The message to classify
        text: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Chat line by line on stdin/stdout
    Repl,

    /// Write a default config to .financebot/config.json
    Init,
}

const FINANCEBOT_DIR: &str = ".financebot";
const CONFIG_FILE: &str = "config.json";

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Chat);

    if let Err(e) = init_logging(cli.verbose, &command, cli.log_file.as_deref()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(command, cli.config.as_deref()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Commands, config_path: Option<&Path>) -> CliResult {
    match command {
        Commands::Ask { text, json } => cmd_ask(&text, json),
        Commands::Init => cmd_init(config_path),
        Commands::Chat => {
            let config = load_config(config_path)?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(financebot_tui::run_tui(config))?;
            Ok(())
        }
        Commands::Repl => {
            let config = load_config(config_path)?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(cmd_repl(config))
        }
    }
}

/// Install the tracing subscriber; `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: u8, command: &Commands, log_file: Option<&Path>) -> CliResult {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match (command, log_file) {
        // The chat widget owns the terminal, so logs go to a file or nowhere.
        (Commands::Chat, Some(path)) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (Commands::Chat, None) => builder.with_writer(std::io::sink).init(),
        _ => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn default_config_path() -> PathBuf {
    Path::new(FINANCEBOT_DIR).join(CONFIG_FILE)
}

/// Load the explicit config path, or the default one if it exists.
fn load_config(path: Option<&Path>) -> Result<ChatConfig, financebot_engine::ConfigError> {
    let config = match path {
        Some(path) => ChatConfig::load(path)?,
        None => ChatConfig::load_or_default(&default_config_path())?,
    };
    debug!(?config, "Loaded configuration");
    Ok(config)
}

fn cmd_ask(text: &str, json: bool) -> CliResult {
    let topic = Topic::detect(text);
    debug!(?topic, "Classified message");

    if json {
        let output = serde_json::json!({ "topic": topic, "reply": topic.reply() });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", topic.reply());
    }
    Ok(())
}

fn cmd_init(path: Option<&Path>) -> CliResult {
    let config_path = path.map_or_else(default_config_path, Path::to_path_buf);

    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    ChatConfig::default().save(&config_path)?;
    println!("Created {}", config_path.display());
    Ok(())
}

async fn cmd_repl(config: ChatConfig) -> CliResult {
    let mut session = Session::new(config, Arc::new(SystemClock));
    for message in session.messages() {
        print_message(&session, message);
    }
    for question in session.suggested_questions() {
        println!("  > {question}");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    while stdin_open || session.pending_replies() > 0 {
        let wait = session.next_reply_in();
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                if let Some(text) = line? {
                    session.update_draft(text.as_str());
                    session.submit(&text);
                } else {
                    debug!("Input closed, draining pending replies");
                    stdin_open = false;
                }
            }
            () = tokio::time::sleep(wait.unwrap_or_default()), if wait.is_some() => {
                let delivered = session.deliver_due().to_vec();
                for message in &delivered {
                    print_message(&session, message);
                }
            }
        }
    }

    info!(messages = session.messages().len(), "Repl finished");
    Ok(())
}

fn print_message(session: &Session, message: &Message) {
    if message.is_user() {
        return;
    }
    println!(
        "[{}] {}: {}",
        message.format_time(),
        session.config().assistant_name,
        message.text()
    );
}
