use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use academy_dashboard::auth::SessionAuth;
use academy_dashboard::dashboard_data;
use academy_dashboard::models::Config;
use academy_dashboard::ui::{run_app, DashboardApp};

/// Terminal dashboard for an academy: charts, navigation and account menu
#[derive(Parser)]
#[command(name = "academy-dashboard")]
#[command(version)]
#[command(about = "Browse academy charts in the terminal")]
struct Args {
    /// Dashboard content as JSON; the built-in sample is used without one
    #[arg(long, short = 'd')]
    data: Option<PathBuf>,

    /// Session file holding the signed-in user
    #[arg(long, short = 's')]
    session: Option<PathBuf>,

    /// Route to open first
    #[arg(long, short = 'r', default_value = "/")]
    route: String,

    /// Start with the sidebar collapsed
    #[arg(long, short = 'c')]
    collapsed: bool,

    /// Milliseconds between animation ticks
    #[arg(long)]
    tick_rate: Option<u64>,

    /// Where log output goes; the terminal is busy drawing
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn apply(self, mut config: Config) -> (Config, String) {
        if let Some(data) = self.data {
            config.data_path = Some(data);
        }
        if let Some(session) = self.session {
            config.session_path = session;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate_ms = tick_rate.max(1);
        }
        if let Some(log_file) = self.log_file {
            config.log_file = log_file;
        }
        config.start_collapsed |= self.collapsed;
        (config, self.route)
    }
}

fn init_logging(config: &Config) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("academy_dashboard=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let (config, route) = args.apply(config);

    init_logging(&config)?;
    info!("Starting academy dashboard");

    let auth = SessionAuth::load(&config.session_path).await?;
    let data = dashboard_data::load_or_sample(config.data_path.as_deref())?;

    let mut app = DashboardApp::new(Box::new(auth), data, config.start_collapsed);
    app.navigate(&route)
        .with_context(|| format!("Cannot open route {}", route))?;

    if let Err(e) = run_app(app, Duration::from_millis(config.tick_rate_ms)).await {
        error!("Dashboard failed: {:#}", e);
        eprintln!("❌ Dashboard error: {:#}", e);
        std::process::exit(1);
    }

    info!("Dashboard closed");
    Ok(())
}
