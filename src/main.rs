use clap::{Parser, Subcommand};

use retort_bot::application::errors::BotError;
use retort_bot::application::messaging::{MessageClassifier, ReplyGenerator, ReplyResolver};
use retort_bot::application::services::{resolve_identity, Session};
use retort_bot::domain::entities::{Reply, RuleStore};
use retort_bot::domain::traits::Transport;
use retort_bot::infrastructure::adapters::console::ConsoleAdapter;
use retort_bot::infrastructure::adapters::slack::SlackAdapter;
use retort_bot::infrastructure::config::Config;
use retort_bot::infrastructure::rules;

#[derive(Parser)]
#[command(name = "retort-bot")]
#[command(about = "A rule-driven reply bot for real-time messaging", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run_bot(cli.config, cli.token),
        Commands::Version => println!("retort-bot v{}", env!("CARGO_PKG_VERSION")),
        Commands::InitConfig => init_config(),
    }
}

fn run_bot(config_path: String, token_override: Option<String>) {
    // Load config
    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    };

    tracing::info!("Starting retort-bot: {}", config.bot.name);

    // Load the reply rules before touching the network.
    let mut store = RuleStore::new();
    if let Err(e) = rules::load_rules(&config.rules.path, &mut store) {
        tracing::error!("Failed to load rules from {:?}: {}", config.rules.path, e);
        std::process::exit(1);
    }
    tracing::info!("Loaded {} reply rules", store.len());

    let mut generator = ReplyGenerator::new();
    register_capabilities(&mut generator);

    let rt = tokio::runtime::Runtime::new().unwrap();

    let token = token_override.or_else(|| config.bot.token.clone());
    let result = if let Some(token) = token {
        rt.block_on(run_session(SlackAdapter::new(token), &config, store, generator))
    } else {
        tracing::warn!("No bot token configured, using console transport");
        rt.block_on(run_session(
            ConsoleAdapter::new(config.bot.name.clone()),
            &config,
            store,
            generator,
        ))
    };

    if let Err(e) = result {
        tracing::error!("Session ended: {}", e);
        std::process::exit(1);
    }
}

async fn run_session<T: Transport>(
    transport: T,
    config: &Config,
    store: RuleStore,
    generator: ReplyGenerator,
) -> Result<(), BotError> {
    let identity = resolve_identity(
        &transport,
        config.bot.id.as_deref(),
        Some(config.bot.name.as_str()),
    )
    .await?;
    tracing::info!("Resolved bot identity: {}", identity.id);

    let classifier = MessageClassifier::new(identity);
    let resolver = ReplyResolver::new(store, generator);
    let mut session = Session::new(transport, classifier, resolver, config.poll_delay());
    session.start().await
}

/// Capabilities available to `function` rules
fn register_capabilities(generator: &mut ReplyGenerator) {
    // Echo back whatever matched the rule.
    generator.register("echo", |text| Some(Reply::plain(text)));

    // Same, but louder.
    generator.register("shout", |text| Some(Reply::plain(text.to_uppercase())));
}

fn init_config() {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
}
