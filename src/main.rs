use std::io::{self, stdout, IsTerminal, Stdout};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;

use memorycat::app::LogicThread;
use memorycat::config::Config;
use memorycat::generate::DescriptionGenerator;
use memorycat::headless;
use memorycat::render::RenderState;
use memorycat::store::CommandStore;
use memorycat::{mlog, ui, Result};

const FRAME_DURATION: Duration = Duration::from_micros(16_666); // 60fps

/// memorycat - a palette of shell commands with generated descriptions
#[derive(Parser, Debug)]
#[command(name = "memorycat")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    \
    MEMORYCAT_DEBUG=1     Enable debug logging (alternative to --debug)\n    \
    ANTHROPIC_API_KEY     Key used to generate descriptions\n\n\
    Piping a command on stdin adds it without opening the interface:\n    \
    echo 'docker ps -a' | memorycat")]
pub struct Cli {
    /// Enable debug logging (writes to ~/.config/memorycat/memorycat.log)
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Use this config file instead of ~/.config/memorycat/config.toml
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a command without opening the interface
    Add {
        /// The command to save (joined with spaces)
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Print saved commands and their descriptions
    List,

    /// Print the location of the commands file
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    memorycat::log::init_with_debug(&Config::config_dir()?, cli.debug);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Command::Add { command }) => {
            return run_add(&config, &command.join(" "));
        }
        Some(Command::List) => {
            return run_list(&config);
        }
        Some(Command::Path) => {
            println!("{}", config.storage_path()?.display());
            return Ok(());
        }
        None => {}
    }

    if !io::stdin().is_terminal() {
        let command = match headless::read_command(io::stdin().lock()) {
            Ok(command) => command,
            Err(e) => exit_with_error(e),
        };
        return run_add(&config, &command);
    }

    if memorycat::log::is_debug() {
        mlog!("memorycat starting (debug mode enabled)");
    } else {
        mlog!("memorycat starting");
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let (state_tx, state_rx) = crossbeam_channel::bounded::<RenderState>(1);

    let shutdown_clone = shutdown.clone();
    let state_drain = state_rx.clone();
    let logic_handle =
        thread::spawn(move || LogicThread::run(config, state_tx, state_drain, shutdown_clone));

    let mut terminal = setup_terminal()?;
    let result = render_loop(&mut terminal, state_rx, &shutdown);

    shutdown.store(true, Ordering::SeqCst);
    let logic_result = logic_handle.join();
    restore_terminal(&mut terminal)?;
    mlog!("memorycat exiting");

    if let Ok(Err(e)) = logic_result {
        exit_with_error(e);
    }
    result
}

/// Non-interactive add. Any failure exits with status 1.
fn run_add(config: &Config, command: &str) -> Result<()> {
    let store = CommandStore::new(config.storage_path()?);
    let generator = DescriptionGenerator::from_config(config);

    println!("Generating description for: {}", command.trim());
    let result = Runtime::new()?.block_on(headless::add_command(command, &store, |cmd| {
        let generator = &generator;
        async move { generator.generate(&cmd).await }
    }));

    match result {
        Ok(record) => {
            println!("Saved: {}", record.description);
            Ok(())
        }
        Err(e) => exit_with_error(e),
    }
}

fn run_list(config: &Config) -> Result<()> {
    let storage = CommandStore::new(config.storage_path()?).load()?;
    if storage.is_empty() {
        println!("No commands saved yet.");
        return Ok(());
    }
    for record in &storage.commands {
        println!("{}", record.command);
        println!("  {}", record.description);
    }
    Ok(())
}

fn exit_with_error(e: memorycat::Error) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}

fn render_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state_rx: Receiver<RenderState>,
    shutdown: &AtomicBool,
) -> Result<()> {
    let mut state = RenderState::default();
    let mut last_version: u64 = 0;
    let mut last_frame = Instant::now();
    let mut dirty = true;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match state_rx.try_recv() {
            Ok(s) => {
                dirty = dirty || s.version != last_version;
                state = s;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        if last_frame.elapsed() < FRAME_DURATION {
            thread::sleep(Duration::from_micros(500));
            continue;
        }
        last_frame = Instant::now();

        if dirty {
            terminal.draw(|f| ui::draw(f, &state))?;
            last_version = state.version;
            dirty = false;
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor()?;
    execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen)?;
    Ok(disable_raw_mode()?)
}
