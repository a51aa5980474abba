// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

use gi::{actions::Action, config::Startup, router, runner::Git};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use is_terminal::IsTerminal;
use std::{env, io::stdout, process::exit};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "gi",
    about,
    override_usage = "\n  gi [options] <action> [<arguments>...]\n  gi [options]                # run default action",
    subcommand_help_heading = "Categories",
    after_help = "Run `gi -l` to list all actions and aliases.",
    version
)]
struct Cli {
    /// Not execute commands, just print them. Must precede the action
    /// name, since several actions use `-n` for a count.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Quiet mode; suppress command echoback.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Colorize output (value must use '=' form, e.g. '--color=never').
    #[arg(
        long,
        global = true,
        value_name = "mode",
        num_args = 0..=1,
        default_missing_value = "always",
        require_equals = true
    )]
    pub color: Option<ColorMode>,

    /// List all actions and aliases.
    #[arg(short, long)]
    pub list: bool,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

fn main() {
    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    if let Err(error) = run() {
        error!("{error:#}");
        exit(1);
    }

    exit(0)
}

fn run() -> Result<()> {
    let startup = Startup::load()?;
    let argv: Vec<String> = env::args().collect();
    let argv = match router::expand_argv(argv, &startup.aliases, &startup.settings.default_action) {
        Ok(argv) => argv,
        // Help and version requests carry no action token that resolves,
        // so hand the raw argv to clap and let it answer.
        Err(error) if wants_help(&error) => env::args().collect(),
        Err(error) => return Err(error.into()),
    };
    let cli = Cli::parse_from(argv);

    match cli.color.unwrap_or(ColorMode::Auto) {
        ColorMode::Auto => {
            if !stdout().is_terminal() {
                colored::control::set_override(false);
            }
        }
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
    }

    if cli.list {
        for name in router::action_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let git = Git::new(&startup.settings.prompt, cli.dry_run, cli.quiet);
    cli.action.run(&git, &startup.settings)
}

// `gi help` reads naturally but is not an action name.
fn wants_help(error: &router::RouterError) -> bool {
    matches!(error, router::RouterError::ActionNotFound(name) if name == "help")
}
