use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use modrepo::api::RepoApi;
use modrepo::assets::fs::DirAssets;
use modrepo::config::{locate_config_dir, RepoConfig};
use modrepo::error::Result;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands, LogLevel};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level);

    let api = init_api(&cli)?;

    match cli.command {
        Commands::Render { out } => handle_render(&api, out),
        Commands::ClientConfig => handle_client_config(&api),
        Commands::Json => handle_json(&api),
        Commands::Check => handle_check(&api),
        Commands::Sheets { name } => handle_sheets(&api, &name),
    }
}

/// Logs go to stderr so rendered output on stdout stays clean.
fn initialize_tracing(level: Option<LogLevel>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level.to_filter_directive()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn init_api(cli: &Cli) -> Result<RepoApi<DirAssets>> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let proj_dirs = ProjectDirs::from("com", "modrepo", "modrepo");
    let platform_dir = proj_dirs.as_ref().map(|d| d.config_dir());

    let config_dir = locate_config_dir(cli.config_dir.as_deref(), &cwd, platform_dir);
    let config = RepoConfig::load(&config_dir)?;
    info!(config_dir = %config_dir.display(), "using config");

    RepoApi::open(&config_dir, &config)
}

fn handle_render(api: &RepoApi<DirAssets>, out: Option<PathBuf>) -> Result<()> {
    let html = api.render_page()?;
    match out {
        Some(path) => {
            fs::write(&path, &html)?;
            eprintln!(
                "{} {} ({} modules)",
                "Wrote".green(),
                path.display(),
                api.modules().len()
            );
        }
        None => print!("{}", html),
    }
    Ok(())
}

fn handle_client_config(api: &RepoApi<DirAssets>) -> Result<()> {
    println!("{}", api.client_config()?.to_json_pretty()?);
    Ok(())
}

fn handle_json(api: &RepoApi<DirAssets>) -> Result<()> {
    println!("{}", api.catalog_json()?);
    Ok(())
}

fn handle_check(api: &RepoApi<DirAssets>) -> Result<()> {
    let report = api.check()?;
    println!(
        "{} {} modules, {} filters, {} selectables, {} access keys",
        "OK".green().bold(),
        report.modules,
        report.filters,
        report.selectables,
        report.access_keys
    );
    let without_manual = report.modules - report.with_manual;
    if without_manual > 0 {
        println!("{}", format!("{} modules have no manual", without_manual).yellow());
    }
    if report.unrated > 0 {
        println!("{}", format!("{} modules are not fully rated", report.unrated).yellow());
    }
    Ok(())
}

fn handle_sheets(api: &RepoApi<DirAssets>, name: &str) -> Result<()> {
    let sheets = api.manual_sheets(name)?;
    if sheets.is_empty() {
        println!("{}", format!("No manual sheets for {}", name).dimmed());
        return Ok(());
    }
    for (ix, sheet) in sheets.iter().enumerate() {
        let marker = if ix == 0 { "*".green() } else { " ".normal() };
        println!("{} {}  {}", marker, sheet.url, sheet.icon.dimmed());
    }
    Ok(())
}
