use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mentor_train::credentials::DEFAULT_CREDENTIALS_FILE;
use mentor_train::{report, Client, TrainOutcome, DEFAULT_BASE_URL};

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser, Debug)]
#[command(name = "mentor-train", version)]
#[command(about = "Upload a document to train an AI mentor pathway")]
#[command(after_help = "Examples:\n  \
    mentor-train -u jasidel -m 25223e76-fc94-4cc2-aec1-f9fb51f0c2bf -f document.pdf\n  \
    mentor-train -o myorg -u jsmith -m <pathway> -f report.pdf -c my_api_key.txt")]
struct Args {
    /// Organization ID
    #[arg(short, long, env = "MENTOR_ORG_ID", default_value = "syracuse")]
    org_id: String,

    /// User ID (NetID) that owns the pathway
    #[arg(short, long, env = "MENTOR_USER_ID")]
    user_id: String,

    /// Pathway (mentor) ID that should index the document
    #[arg(short = 'm', long, visible_alias = "mentor-id", env = "MENTOR_PATHWAY")]
    pathway: String,

    /// Document file to upload
    #[arg(short, long)]
    file: PathBuf,

    /// File holding the API key on its first line
    #[arg(short, long, env = "MENTOR_API_TOKEN_FILE", default_value = DEFAULT_CREDENTIALS_FILE)]
    credentials: PathBuf,

    /// Base URL of the API
    #[arg(short, long, env = "MENTOR_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds (HTTP client default when unset)
    #[arg(short, long, env = "MENTOR_TIMEOUT", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Also append logs to this file (e.g. document_upload.log)
    #[arg(long, env = "MENTOR_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.verbose, args.log_file.as_deref());

    tracing::info!(
        org_id = %args.org_id,
        user_id = %args.user_id,
        pathway = %args.pathway,
        file = %args.file.display(),
        base_url = %args.base_url,
        timeout_secs = ?args.timeout,
        "document upload started"
    );

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let code = tokio::select! {
        code = run(&args, &mut stdout, &mut stderr) => code,
        Ok(()) = tokio::signal::ctrl_c() => {
            tracing::warn!("interrupted by user");
            EXIT_INTERRUPTED
        }
    };
    ExitCode::from(code)
}

fn init_tracing(verbose: bool, log_file: Option<&Path>) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("mentor_train=debug,reqwest=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "mentor_train=info".into())
    };
    let file_layer = log_file.and_then(|path| match open_log_file(path) {
        Ok(file) => Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        ),
        Err(err) => {
            eprintln!("cannot open log file {}: {err}", path.display());
            None
        }
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .init();
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Uploads the document, renders the outcome to `out` and local errors to `err`.
async fn run<O: Write, E: Write>(args: &Args, out: &mut O, err: &mut E) -> u8 {
    let outcome = match upload(args).await {
        Ok(outcome) => outcome,
        Err(error) => {
            tracing::error!("{error}");
            // Reaches stderr regardless of the log filter.
            let _ = writeln!(err, "Error: {error}");
            let _ = writeln!(err, "Please check your settings and try again.");
            return EXIT_FAILURE;
        }
    };

    if let Err(error) = report::write_outcome(out, &outcome) {
        tracing::error!(error = %error, "failed to write report");
        return EXIT_FAILURE;
    }

    match &outcome {
        TrainOutcome::Success(_) => tracing::info!("document upload completed"),
        TrainOutcome::Failure { status, .. } => {
            tracing::error!(?status, "document upload failed");
        }
    }
    exit_code(&outcome)
}

const fn exit_code(outcome: &TrainOutcome) -> u8 {
    if outcome.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}

async fn upload(args: &Args) -> mentor_train::Result<TrainOutcome> {
    let mut builder = Client::builder()
        .api_token_file(&args.credentials)
        .base_url(&args.base_url);
    if let Some(timeout) = args.timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build()?;

    let result = client
        .documents()
        .train_from_path(&args.org_id, &args.user_id, &args.pathway, &args.file)
        .await;
    TrainOutcome::from_result(result)
}
