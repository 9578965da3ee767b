use clap::{Parser, ValueEnum};
use iam_reporter::config::Config;
use iam_reporter::gcp::auth::GcpCredentials;
use iam_reporter::gcp::client::GcpClient;
use iam_reporter::gcp::http::format_gcp_error;
use iam_reporter::lookup::api::ApiLookup;
use iam_reporter::lookup::gcloud::GcloudLookup;
use iam_reporter::lookup::Backend;
use iam_reporter::{generate_report, policy, ReportError, RunStats};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Flatten a Cloud Asset Inventory IAM policy export into a CSV report
#[derive(Parser, Debug)]
#[command(name = "iam-reporter", version, about, long_about = None)]
struct Args {
    /// JSON file exported with `gcloud asset search-all-iam-policies`
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// CSV report to write (overwritten)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Where display names are looked up
    #[arg(short, long, value_enum)]
    backend: Option<Backend>,

    /// gcloud executable used by the gcloud backend
    #[arg(long)]
    gcloud_bin: Option<String>,

    /// Resource Manager endpoint used by the api backend
    #[arg(long)]
    endpoint: Option<String>,

    /// Access token for the api backend instead of Application Default Credentials
    #[arg(long, env = "GOOGLE_OAUTH_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Do not print a line per processed resource
    #[arg(short, long)]
    quiet: bool,

    /// Store the effective input, output and backend settings as defaults
    #[arg(long)]
    save_config: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: could not open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("iam-reporter started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("iam-reporter").join("iam-reporter.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".iam-reporter").join("iam-reporter.log");
    }
    PathBuf::from("iam-reporter.log")
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    match run(args).await {
        Ok((output, stats)) => {
            println!("{}", "-".repeat(60));
            println!("Success! The final, comprehensive report is ready: {}", output.display());
            println!(
                "{} rows from {} projects and {} folders ({} documents skipped)",
                stats.rows, stats.projects, stats.folders, stats.skipped
            );
            println!("{}", "-".repeat(60));
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{}", err);
            eprintln!("FATAL ERROR: {}", err);
            if let Some(source) = std::error::Error::source(&err) {
                eprintln!("Details: {}", source);
            }
            if let Some(hint) = err.hint() {
                eprintln!("{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(PathBuf, RunStats), ReportError> {
    let config = Config::load();
    let input = config.effective_input(args.input);
    let output = config.effective_output(args.output);
    let backend = config.effective_backend(args.backend);

    // Input is validated before any backend, config or output file is touched
    let documents = policy::load_documents(&input)?;

    if args.save_config {
        save_defaults(&config, &input, &output, backend);
    }

    println!(
        "--> Processing {} to create final comprehensive report...",
        input.display()
    );
    tracing::info!("Loaded {} policy documents from {:?}", documents.len(), input);

    let stats = match backend {
        Backend::Gcloud => {
            let lookup = GcloudLookup::new(&config.effective_gcloud_bin(args.gcloud_bin));
            generate_report(lookup, &documents, &output, args.quiet).await?
        }
        Backend::Api => {
            let endpoint = config.effective_endpoint(args.endpoint);
            let client = match args.access_token.as_deref() {
                Some(token) => {
                    GcpClient::with_credentials(GcpCredentials::from_access_token(token), &endpoint)
                }
                None => GcpClient::new(&endpoint).await,
            }
            .map_err(|e| ReportError::Backend(format_gcp_error(&e)))?;
            tracing::info!("Using Resource Manager endpoint {}", endpoint);
            generate_report(ApiLookup::new(client), &documents, &output, args.quiet).await?
        }
    };

    Ok((output, stats))
}

fn save_defaults(config: &Config, input: &Path, output: &Path, backend: Backend) {
    let Some(path) = Config::config_path() else {
        return;
    };
    let updated = Config {
        input: Some(input.to_path_buf()),
        output: Some(output.to_path_buf()),
        backend: Some(backend),
        ..config.clone()
    };
    match updated.save_to(&path) {
        Ok(()) => tracing::info!("Saved defaults to {:?}", path),
        Err(e) => eprintln!("Warning: could not save config {:?}: {}", path, e),
    }
}
