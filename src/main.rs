// SPDX-License-Identifier: MIT
//
// stylemark — design-token pipeline on the command line.
//
// This is the main binary that wires together the crates:
//
//   sm-color  → CSS color parsing, Lab lightness moves, WCAG luminance
//   sm-tokens → token store, palette deriver, exporters, theme preference
//
// Every invocation follows the same path:
//
//   args → config (stylemark.toml) → logging → Session → command → stdout
//
// Errors end the process with status 1 and a single line on stderr.

mod commands;
mod config;
mod logging;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sm_tokens::{Category, ExportFormat, ThemeMode};

use crate::commands::{Options, Session, ThemeAction};
use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "stylemark")]
#[command(about = "Derive palettes, check contrast and export design tokens", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/stylemark/stylemark.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Token stylesheet to read and update (default: the builtin design system)
    #[arg(long, global = true)]
    stylesheet: Option<PathBuf>,

    /// View tokens under this theme without saving the choice
    #[arg(long, global = true)]
    theme: Option<ThemeMode>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Derive a 50…900 ramp from one base color
    Palette {
        /// Base color (hex, named, rgb(), hsl())
        base: String,
        /// Color family the ramp is named after
        #[arg(long)]
        family: Option<String>,
        /// Print the ramp in an export format instead of a table
        #[arg(long)]
        format: Option<ExportFormat>,
        /// Replace the family's tokens with the ramp
        #[arg(long)]
        apply: bool,
    },
    /// Export the current tokens
    Export {
        /// css, scss, json or tailwind
        #[arg(long)]
        format: Option<ExportFormat>,
        /// Restrict to these categories
        #[arg(long, num_args = 1.., value_parser = parse_category)]
        only: Vec<Category>,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Merge a JSON token document over the current tokens
    Import {
        file: PathBuf,
    },
    /// Check the WCAG contrast of a foreground on a background
    Contrast {
        fg: String,
        bg: String,
    },
    /// Set a single token
    Set {
        name: String,
        value: String,
    },
    /// Show or change the saved light/dark choice
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::from_key(s).ok_or_else(|| {
        let keys: Vec<_> = Category::ALL.iter().map(|c| c.key()).collect();
        format!("unknown category {s:?} (expected one of {})", keys.join(", "))
    })
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    logging::init(&config.log_level)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let options = Options { stylesheet: cli.stylesheet, theme: cli.theme };
    let open = || Session::open(config, options);

    match cli.command {
        Command::Contrast { fg, bg } => commands::check_contrast(&fg, &bg, &mut out)?,
        Command::Palette { base, family, format, apply } => {
            open()?.palette(&base, family.as_deref(), format, apply, &mut out)?;
        }
        Command::Export { format, only, output } => {
            open()?.export(format, &only, output.as_deref(), &mut out)?;
        }
        Command::Import { file } => open()?.import(&file, &mut out)?,
        Command::Set { name, value } => open()?.set(&name, &value, &mut out)?,
        Command::Theme { action } => open()?.theme(action, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("stylemark: {e:#}");
        process::exit(1);
    }
}
