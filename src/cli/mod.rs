use crate::{server, services::ModelClient, GeminiClient, GuideConfig};
use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const CHECK_PROMPT: &str = "Say \"test\" only";

fn command() -> Command {
    Command::new("uganda-guide")
        .version("0.1.0")
        .about("Uganda tourism recommendations backed by a Gemini model")
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .global(true)
                .help("Gemini model identifier (or set GEMINI_MODEL)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .global(true)
                .help("Gemini API key (or set GEMINI_API_KEY)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .global(true)
                .help("Gemini API base URL (or set GEMINI_BASE_URL)"),
        )
        .arg(
            Arg::new("catalog")
                .short('c')
                .long("catalog")
                .value_name("PATH")
                .global(true)
                .help("Destinations JSON file (or set CATALOG_PATH); defaults to the bundled catalog"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .global(true)
                .help("Per-attempt model timeout in seconds (or set REQUEST_TIMEOUT_SECS)"),
        )
        .subcommand(
            Command::new("serve")
                .about("Run the HTTP API (default)")
                .arg(
                    Arg::new("host")
                        .long("host")
                        .value_name("HOST")
                        .help("Address to bind (or set HOST)"),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .help("Port to listen on (or set PORT)"),
                ),
        )
        .subcommand(
            Command::new("recommend")
                .about("Answer one query and print the JSON result")
                .arg(
                    Arg::new("query")
                        .help("Free-text travel query")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Test the API key against one or more models")
                .arg(
                    Arg::new("models")
                        .long("models")
                        .value_name("LIST")
                        .value_delimiter(',')
                        .num_args(1..)
                        .help("Models to try in order; stops at the first that answers"),
                ),
        )
        .subcommand(Command::new("catalog").about("List the loaded destinations"))
}

/// Apply command-line overrides on top of the environment configuration.
fn apply_overrides(config: &mut GuideConfig, matches: &ArgMatches) -> anyhow::Result<()> {
    if let Some(model) = matches.get_one::<String>("model") {
        config.model = model.clone();
    }
    if let Some(api_key) = matches.get_one::<String>("api-key") {
        config.api_key = Some(api_key.clone());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.base_url = base_url.clone();
    }
    if let Some(path) = matches.get_one::<String>("catalog") {
        config.catalog_path = Some(PathBuf::from(path));
    }
    if let Some(timeout) = matches.get_one::<String>("timeout") {
        let seconds: u64 = timeout.parse().context("--timeout must be a number of seconds")?;
        anyhow::ensure!(seconds > 0, "--timeout must be at least 1 second");
        config.request_timeout = Duration::from_secs(seconds);
    }
    Ok(())
}

/// CLI entry point
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = command().get_matches();
    let mut config = GuideConfig::from_env();
    apply_overrides(&mut config, &matches)?;

    match matches.subcommand() {
        Some(("recommend", sub)) => {
            let query = sub
                .get_one::<String>("query")
                .context("query argument is required")?;
            recommend(&config, query).await
        }
        Some(("check", sub)) => {
            let models: Vec<String> = sub
                .get_many::<String>("models")
                .map(|values| values.cloned().collect())
                .unwrap_or_else(|| vec![config.model.clone()]);
            check(&config, &models).await
        }
        Some(("catalog", _)) => list_catalog(&config),
        Some(("serve", sub)) => {
            if let Some(host) = sub.get_one::<String>("host") {
                config.host = host.clone();
            }
            if let Some(port) = sub.get_one::<String>("port") {
                config.port = port.parse().context("--port must be a port number")?;
            }
            serve(&config).await
        }
        _ => serve(&config).await,
    }
}

async fn serve(config: &GuideConfig) -> anyhow::Result<()> {
    let client = Arc::new(config.gemini_client()?);
    let service = config.build_service(client)?;
    server::run_server(&config.bind_addr(), service)
        .await
        .map_err(|err| anyhow::anyhow!(err))
}

async fn recommend(config: &GuideConfig, query: &str) -> anyhow::Result<()> {
    let client = Arc::new(config.gemini_client()?);
    let service = config.build_service(client)?;

    info!("Running query: {}", query);
    info!("Using model: {}", service.model());

    match service.recommend(query).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => {
            error!("Recommendation failed: {}", e);
            Err(e.into())
        }
    }
}

async fn check(config: &GuideConfig, models: &[String]) -> anyhow::Result<()> {
    let client: GeminiClient = config.gemini_client()?;
    info!("Base URL: {}", client.base_url());

    for model in models {
        println!("Trying: {}", model);
        match client.generate_content(model, CHECK_PROMPT).await {
            Ok(text) => {
                println!("SUCCESS with {}", model);
                println!("Response: {}", text.trim());
                return Ok(());
            }
            Err(err) => println!("Failed ({}): {}", err.kind.as_str(), err.message),
        }
    }

    anyhow::bail!("all {} model(s) failed; check the API key", models.len())
}

fn list_catalog(config: &GuideConfig) -> anyhow::Result<()> {
    let catalog = config.load_catalog()?;
    for destination in catalog.destinations() {
        println!(
            "{} [{}] - {} - {}",
            destination.name, destination.kind, destination.region, destination.budget_range
        );
    }
    println!("{} destinations", catalog.len());
    Ok(())
}
