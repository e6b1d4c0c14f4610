mod logging;

use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock};
use ui::{App, UiApp, build_app_context};

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Without --db the portal runs on in-memory demo data.");
    eprintln!("Seed a database with: cargo run -p storage --bin seed -- --db <sqlite_url>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PORTAL_DB_URL   same as --db");
    eprintln!("  PORTAL_LOG      log filter, e.g. debug or services=trace (default: info)");
}

#[derive(Debug, PartialEq, Eq)]
enum Backend {
    Demo,
    Sqlite(String),
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Run(Backend),
    Help,
}

fn parse_args(
    args: &mut impl Iterator<Item = String>,
    env_db_url: Option<String>,
) -> Result<Parsed, ArgsError> {
    let mut backend = env_db_url
        .filter(|value| !value.trim().is_empty())
        .map_or(Backend::Demo, |value| Backend::Sqlite(normalize_sqlite_url(value)));

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                let value = require_value(args, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value });
                }
                backend = Backend::Sqlite(normalize_sqlite_url(value));
            }
            "--help" | "-h" => return Ok(Parsed::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    Ok(Parsed::Run(backend))
}

fn normalize_sqlite_url(raw: String) -> String {
    let trimmed = raw.trim().to_string();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed;
    }

    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn build_services(backend: &Backend, clock: Clock) -> Result<AppServices, Box<dyn std::error::Error>> {
    match backend {
        Backend::Demo => {
            tracing::info!("using in-memory demo data");
            Ok(AppServices::in_memory_seeded(clock)?)
        }
        Backend::Sqlite(db_url) => {
            prepare_sqlite_file(db_url)?;
            let services = AppServices::sqlite(db_url, clock).await?;
            let clients = services.clients().list_clients("").await?;
            if clients.is_empty() {
                tracing::warn!(%db_url, "database has no clients; run the storage seed binary");
            }
            tracing::info!(%db_url, clients = clients.len(), "opened portal database");
            Ok(services)
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = parse_args(&mut argv, std::env::var("PORTAL_DB_URL").ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let backend = match parsed {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(backend) => backend,
    };

    let services = build_services(&backend, Clock::default_clock()).await?;
    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // Some tao setups default to an always-on-top window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Aegis Shield")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    logging::init_logging();
    if let Err(err) = run().await {
        tracing::error!(%err, "portal failed to start");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
