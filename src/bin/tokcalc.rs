//! tokcalc CLI binary.
//!
//! Token calculator for OpenAI models.
//!
//! # Commands
//!
//! - `count` - Count the tokens of a document under a model's encoding
//! - `encoding` - Show which encoding a model uses
//! - `models` - List models with a known encoding (local or remote)
//! - `serve` - Start the HTTP API server

use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokcalc::{
    models::{fetch_remote_models, ModelCatalog, ModelEntry},
    server::{create_router, AppState, ServerConfig},
    Config, Document, Encoding, SpecialTokens, TokCalcError, VERSION,
};

#[derive(Parser)]
#[command(name = "tokcalc")]
#[command(version = VERSION)]
#[command(about = "Token calculator - count the tokens a document uses under a model's encoding", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: <config dir>/tokcalc/config.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Count tokens in a document
    Count {
        /// Text input (or - for stdin)
        input: Option<String>,

        /// Input file path (.pdf/.docx are not extracted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Model name (default from config)
        #[arg(short, long)]
        model: Option<String>,

        /// Number of leading token IDs to show
        #[arg(short = 'n', long)]
        tokens: Option<usize>,

        /// Special-token literals: reject, ordinary, allow
        #[arg(long)]
        special: Option<String>,

        /// Also print the start of the document
        #[arg(long)]
        preview: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the encoding a model uses
    Encoding {
        /// Model name
        model: String,
    },

    /// List models with a known encoding
    Models {
        /// Ask the provider API which models are available (needs an API key)
        #[arg(short, long)]
        remote: bool,

        /// Only models using this encoding
        #[arg(short, long)]
        encoding: Option<String>,

        /// Only models whose name contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP API server
    Serve {
        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,

        /// Listen host
        #[arg(long)]
        host: Option<String>,

        /// Bind to all interfaces
        #[arg(long)]
        bind_all: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = match cli.command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    };
    init_logging(cli.verbose, cli.log_json, default_level);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Count {
            input,
            file,
            model,
            tokens,
            special,
            preview,
            json,
        } => cmd_count(config, input, file, model, tokens, special, preview, json),

        Commands::Encoding { model } => cmd_encoding(&config, &model),

        Commands::Models {
            remote,
            encoding,
            search,
            json,
        } => cmd_models(&config, remote, encoding, search, json),

        Commands::Serve {
            port,
            host,
            bind_all,
        } => cmd_serve(&config, port, host, bind_all),
    }
}

fn init_logging(verbose: bool, json: bool, default_level: &str) {
    let log_level = if verbose { "debug" } else { default_level };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_count(
    mut config: Config,
    input: Option<String>,
    file: Option<PathBuf>,
    model: Option<String>,
    tokens: Option<usize>,
    special: Option<String>,
    preview: bool,
    json: bool,
) -> anyhow::Result<()> {
    if let Some(policy) = special {
        config.counter.special_tokens = policy.parse::<SpecialTokens>()?;
    }

    let counter = config.token_counter()?;
    let document = read_document(input, file)?;
    let model = model.unwrap_or_else(|| config.counter.default_model.clone());
    let preview_tokens = tokens.unwrap_or(config.counter.preview_tokens);

    let report = match counter.report(&model, document.text(), preview_tokens) {
        Ok(report) => report,
        Err(TokCalcError::UnresolvedModel { model }) => {
            eprintln!("No encoding known for model: {model}");
            eprintln!("Try 'tokcalc models --search {model}' to find a supported model");
            std::process::exit(2);
        },
        Err(e) => return Err(e.into()),
    };

    if json {
        let mut value = serde_json::to_value(&report)?;
        if let Some(path) = document.source() {
            value["file"] = serde_json::json!(path.display().to_string());
        }
        if preview {
            value["preview"] = serde_json::json!(document.preview(config.counter.preview_chars));
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if let Some(path) = document.source() {
        println!("File:       {}", path.display());
    }
    println!("{report}");

    if preview {
        let max_chars = config.counter.preview_chars;
        println!();
        if document.is_truncated_at(max_chars) {
            println!("Document (first {max_chars} characters):");
        } else {
            println!("Document:");
        }
        println!("{}", document.preview(max_chars));
    }

    Ok(())
}

fn cmd_encoding(config: &Config, model: &str) -> anyhow::Result<()> {
    let counter = config.token_counter()?;

    match counter.resolve_encoding(model) {
        Ok(encoding) => {
            println!("The {model} model uses {encoding} for encoding.");
            Ok(())
        },
        Err(TokCalcError::UnresolvedModel { .. }) => {
            eprintln!("No encoding known for model: {model}");
            eprintln!("Try 'tokcalc models' to list supported models");
            std::process::exit(2);
        },
        Err(e) => Err(e.into()),
    }
}

fn cmd_models(
    config: &Config,
    remote: bool,
    encoding: Option<String>,
    search: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = ModelCatalog::new(config.model_table()?);
    let encoding = encoding.map(|e| e.parse::<Encoding>()).transpose()?;

    let mut models = if remote {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(fetch_remote_models(&config.remote, &catalog))?
    } else {
        catalog.known()
    };

    if let Some(encoding) = encoding {
        models.retain(|m| m.encoding == encoding);
    }
    if let Some(query) = search {
        let query_lower = query.to_lowercase();
        models.retain(|m| m.id.to_lowercase().contains(&query_lower));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&models)?);
    } else {
        print_models(&models, remote);
    }

    Ok(())
}

fn print_models(models: &[ModelEntry], remote: bool) {
    let source = if remote { "Remote" } else { "Known" };
    println!("{source} Models ({}):", models.len());
    println!();
    println!("{:<36} {:<12}", "ID", "Encoding");
    println!("{}", "-".repeat(49));

    for entry in models {
        println!("{:<36} {:<12}", entry.id, entry.encoding);
    }
}

fn cmd_serve(
    config: &Config,
    port: Option<u16>,
    host: Option<String>,
    bind_all: bool,
) -> anyhow::Result<()> {
    let mut section = config.server.clone();
    if let Some(host) = host {
        section.host = host;
    }
    if let Some(port) = port {
        section.port = port;
    }

    let mut server_config = ServerConfig::from_section(&section)?
        .with_default_model(config.counter.default_model.clone())
        .with_preview_tokens(config.counter.preview_tokens);

    if bind_all {
        server_config = server_config.bind_all();
    }

    let counter = config.token_counter()?;
    let state = Arc::new(AppState::with_counter(server_config.clone(), counter));
    let app = create_router(state);

    tracing::info!("Starting tokcalc server on {}", server_config.addr);
    tracing::info!(
        "Default model: {}, special tokens: {}",
        server_config.default_model,
        config.counter.special_tokens
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(server_config.addr).await?;
        axum::serve(listener, app).await?;
        Ok::<_, anyhow::Error>(())
    })
}

// Helper functions

fn read_document(input: Option<String>, file: Option<PathBuf>) -> anyhow::Result<Document> {
    if let Some(path) = file {
        Ok(Document::load(path)?)
    } else if let Some(s) = input {
        if s == "-" {
            read_stdin()
        } else {
            Ok(Document::from_text(s))
        }
    } else {
        read_stdin()
    }
}

fn read_stdin() -> anyhow::Result<Document> {
    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;
    Ok(Document::from_bytes(buffer, None))
}
