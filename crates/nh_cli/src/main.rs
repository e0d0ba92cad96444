use anyhow::Context;
use clap::Parser;
use nh_core::logging::init_logging;
use nh_core::{Category, Language, SummaryStatus};
use nh_inference::models::AVAILABLE_MODELS;
use nh_inference::Summarizer;
use nh_sources::{create_provider, FetchConfig, ManagerConfig, NewsManager};
use nh_web::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarized news headlines in your language", long_about = None)]
pub struct Cli {
    /// NewsAPI key
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true)]
    newsapi_key: Option<String>,
    /// Override the NewsAPI base URL
    #[arg(long, env = "NEWSAPI_URL")]
    news_url: Option<String>,
    /// Headlines fetched per request
    #[arg(long, default_value_t = nh_sources::providers::DEFAULT_PAGE_SIZE)]
    page_size: usize,
    #[arg(long, env = "NH_MODEL", default_value = "openai", help = "Model to use for summaries. Available models: openai (default), deepseek, dummy")]
    model: String,
    /// API key for the summarization model
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Override the model API base URL
    #[arg(long, env = "NH_MODEL_URL")]
    model_url: Option<String>,
    /// Override the chat model name (e.g. gpt-4o)
    #[arg(long)]
    model_name: Option<String>,
    /// Keep at most this many summaries in memory (unbounded when unset)
    #[arg(long)]
    cache_capacity: Option<usize>,
    /// Articles summarized at the same time within one request
    #[arg(long, default_value_t = 10)]
    concurrency: usize,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "NH_LOG_LEVEL", default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the news page
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 7860)]
        port: u16,
        /// Skip the start-up request that opens the model connection
        #[arg(long)]
        no_warm_up: bool,
    },
    /// Print summarized headlines for one category
    Digest {
        category: Category,
        #[arg(long, short, default_value = "en")]
        language: Language,
    },
    /// List categories, languages and models
    List,
}

fn build_manager(cli: &Cli) -> anyhow::Result<NewsManager> {
    let provider = create_provider(&FetchConfig {
        api_key: cli.newsapi_key.clone(),
        base_url: cli.news_url.clone(),
    })
    .context("Failed to create the news provider (is NEWSAPI_KEY set?)")?;
    info!("📰 News provider initialized successfully (using {})", provider.name());

    let inference_config = nh_inference::Config {
        provider: cli.model.clone(),
        api_key: cli.api_key.clone(),
        model_name: cli.model_name.clone(),
        model_url: cli.model_url.clone(),
    };
    let model = nh_inference::create_model(&inference_config)
        .context("Failed to create the summarization model (is OPENAI_API_KEY set?)")?;
    info!("🧠 Inference model initialized successfully (using {})", model.name());

    let cache = nh_storage::create_cache("memory", cli.cache_capacity)?;
    info!("🏦 Summary cache initialized successfully");

    Ok(NewsManager::new(
        provider,
        Summarizer::new(model),
        cache,
        ManagerConfig {
            page_size: cli.page_size,
            concurrency: cli.concurrency,
        },
    ))
}

fn print_lists() {
    println!("Categories:");
    for category in Category::ALL {
        println!("  {}", category);
    }
    println!("Languages:");
    for language in Language::ALL {
        println!("  {} ({})", language.code(), language.name());
    }
    println!("Models:");
    for model in AVAILABLE_MODELS {
        println!("  {}", model);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match &cli.command {
        Commands::List => print_lists(),
        Commands::Digest { category, language } => {
            let manager = build_manager(&cli)?;
            let digest = manager.aggregate(*category, *language).await?;
            if digest.articles.is_empty() {
                println!("{}", nh_web::presenter::NO_ARTICLES);
            }
            for item in &digest.articles {
                let marker = match item.status {
                    SummaryStatus::Fresh => "🆕",
                    SummaryStatus::Cached => "⏭️",
                    SummaryStatus::InsufficientContent | SummaryStatus::Unavailable => "📭",
                    SummaryStatus::Failed => "⚠️",
                };
                println!("{} {} ({})", marker, item.title, item.article.source);
                println!("   {}", item.summary);
                println!("   {}\n", item.article.url);
            }
        }
        Commands::Serve { host, port, no_warm_up } => {
            let manager = Arc::new(build_manager(&cli)?);
            if !*no_warm_up {
                manager.warm_up().await;
            }
            let addr: SocketAddr = format!("{}:{}", host, port)
                .parse()
                .with_context(|| format!("Invalid listen address {}:{}", host, port))?;
            nh_web::serve(AppState::new(manager), addr).await?;
        }
    }

    Ok(())
}
