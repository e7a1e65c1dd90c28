use av_launcher::Launcher;
use av_types::LaunchConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Config file path from the first argument or AVARUN_CONFIG; the
    // built-in defaults reproduce the original launch script.
    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("AVARUN_CONFIG").ok())
    {
        Some(path) => {
            info!("Loading launch config from {path}");
            LaunchConfig::from_json_file(&path)?
        }
        None => LaunchConfig::default(),
    };

    let record = Launcher::new().launch(&config).await?;
    std::process::exit(record.exit_code);
}
