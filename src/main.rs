mod config;
mod logging;
mod tui;
mod users;

use anyhow::Result;
use clap::{Command, CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::{Generator, Shell, generate};
use config::{Config, ConfigError, KEYS};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tui::{app::App, ui};
use users::fetch::HttpUserSource;

#[derive(Parser)]
#[command(name = "userlist")]
#[command(about = "A searchable, multi-select terminal view of a remote user list")]
struct Cli {
    #[arg(long, help = "Fetch users from this URL instead of the configured endpoint", value_hint = ValueHint::Url)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Configuration management")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    #[command(about = "Generate shell completion scripts")]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    #[command(about = "Set a configuration value")]
    Set {
        #[arg(help = "Configuration key (endpoint, debounce_ms or filter_mode)")]
        key: String,
        #[arg(help = "Configuration value")]
        value: String,
    },
    #[command(about = "Get a configuration value")]
    Get {
        #[arg(help = "Configuration key")]
        key: String,
    },
    #[command(about = "List all configuration values")]
    List,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { action }) => {
            if let Err(e) = handle_config_command(action) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            print_completions(shell, &mut cmd);
        }
        None => {
            let logging = logging::init();
            if let Err(e) = run_main_app(cli.endpoint) {
                tracing::error!(error = %e, "exiting with error");
                eprintln!("Error: {}", e);
                if let Some(guard) = &logging {
                    eprintln!("Logs: {}", guard.log_dir().display());
                }
                std::process::exit(1);
            }
        }
    }
}

fn handle_config_command(action: ConfigAction) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("Configuration saved successfully.");
        }
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            println!("{}", config.get(&key)?);
        }
        ConfigAction::List => {
            let config = Config::load()?;
            for key in KEYS {
                println!("{} = {}", key, config.get(key)?);
            }
        }
    }
    Ok(())
}

fn run_main_app(endpoint: Option<String>) -> Result<()> {
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
    let endpoint = endpoint.unwrap_or_else(|| config.endpoint.clone());

    let source = HttpUserSource::new(endpoint)?;
    let mut app = App::new(config.filter_mode, config.debounce());
    app.mount(Arc::new(source));

    let result = run_tui(&mut app);
    app.unmount();

    result
}

fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Block until input arrives or the next timer/fetch check is due.
        if event::poll(app.next_wakeup(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key_event(key)?;
                }
            }
        }

        app.tick(Instant::now());
        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn print_completions<G: Generator>(generator: G, cmd: &mut Command) {
    generate(generator, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
