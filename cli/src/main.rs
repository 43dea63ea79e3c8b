mod logging;

use std::{path::PathBuf, process};

use anyhow::{bail, Context, Result};
use clap::Parser;
use hexe_editor::{Config, Editor};
use hexe_terminal_client::{Input, TerminalClient};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long)]
    debug: bool,

    /// Configuration file to use instead of the default one
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bytes shown on each row
    #[arg(short, long, value_name = "N")]
    bytes_per_row: Option<usize>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::setup(cli.debug) {
        eprintln!("Failed to setup logging: {e}");
    }

    if let Err(e) = run(cli) {
        log::error!("{e:?}");
        eprintln!("hexe: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match cli.config.or_else(Config::default_path) {
        Some(path) => Config::load(&path).with_context(|| format!("{:?}", path))?,
        None => Config::default(),
    };

    if let Some(n) = cli.bytes_per_row {
        if n == 0 {
            bail!("bytes per row must be at least 1");
        }
        config.window.bytes_per_row = n;
    }

    let mut editor = match cli.file {
        Some(path) => Editor::open(&path, &config)?,
        None => Editor::new(&config),
    };

    log::info!("Logging to {:?}", logging::log_file());
    let mut client = TerminalClient::new()?;

    while editor.is_running() {
        let grid = editor.draw(client.size());
        client.draw(&grid)?;

        match client.next_input()? {
            Input::Key(key) => editor.handle_key(key),
            Input::Resize(_) => {}
        }
    }

    Ok(())
}
