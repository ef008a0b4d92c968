use anyhow::{Context as _, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use habitual::cli::args::{Cli, Commands};
use habitual::cli::commands::{self, Context};
use habitual::config::{ColorSetting, Config};
use habitual::features::completions::generate_completions;
use habitual::storage::Database;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Completions { shell } = cli.command {
        print!("{}", generate_completions(shell)?);
        return Ok(());
    }

    let config = Config::load().context("failed to load configuration")?;
    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    let clock = Local::now().naive_local();
    let now = cli
        .today
        .map_or(clock, |today| today.and_time(clock.time()));

    let ctx = Context {
        db: Database::open()?,
        format: cli.output.unwrap_or(config.general.default_output),
        config,
        now,
    };
    tracing::debug!(%now, format = ?ctx.format, "starting");

    let output = match cli.command {
        Commands::Add { name, description } => commands::add(&ctx, &name, description)?,
        Commands::List { all } => commands::list(&ctx, all)?,
        Commands::Done(args) => commands::done(&ctx, &args)?,
        Commands::Undo(args) => commands::undo(&ctx, &args)?,
        Commands::Stats { habit, window } => commands::stats(&ctx, habit.as_deref(), window)?,
        Commands::Heatmap { habit, weeks } => commands::heatmap(&ctx, &habit, weeks)?,
        Commands::Archive { habit } => commands::archive(&ctx, &habit)?,
        Commands::Remove { habit, force } => commands::remove(&ctx, &habit, force)?,
        Commands::Notifications(args) => commands::notifications(&ctx, args.command)?,
        Commands::Remind => commands::remind(&ctx)?,
        Commands::Completions { .. } => String::new(),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
