mod lookup;
mod recommend;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use localguide_core::AppConfig;
use localguide_kakao::KakaoClient;
use localguide_llm::ChatClient;
use localguide_pipeline::RecommendationPipeline;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "localguide")]
#[command(about = "Local place recommendations from natural-language requests")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Recommend nearby places for a free-text request
    Recommend {
        /// What the user is looking for, e.g. "비 오는 날 따뜻한 국물"
        text: String,

        /// Neighborhood or landmark to search around
        #[arg(long, default_value = "")]
        location: String,

        /// Snap the anchor onto the nearest subway station
        #[arg(long, conflicts_with = "lon")]
        station: bool,

        /// Device longitude; bypasses location resolution
        #[arg(long, requires = "lat")]
        lon: Option<f64>,

        /// Device latitude; bypasses location resolution
        #[arg(long, requires = "lon")]
        lat: Option<f64>,

        /// Category hint (맛집, 카페, 관광지, 기타)
        #[arg(long)]
        category: Option<String>,

        /// Ask the model for a branch-qualified place name instead of a keyword
        #[arg(long)]
        qualified: bool,

        /// Skip the commercial-character summary
        #[arg(long)]
        no_summary: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve location text to an anchor coordinate
    Anchor {
        /// Location text; empty means the region default
        #[arg(default_value = "")]
        location: String,

        #[arg(long)]
        json: bool,
    },
    /// Resolve location text and snap it onto the nearest station
    Station {
        #[arg(default_value = "")]
        location: String,

        #[arg(long)]
        json: bool,
    },
    /// Search places for a keyword without the language model
    Places {
        keyword: String,

        /// Neighborhood or landmark to search around; omitted means region-wide
        #[arg(long, default_value = "")]
        location: String,

        #[arg(long)]
        category: Option<String>,

        /// Search radius in meters; defaults to the configured radius
        #[arg(long)]
        radius: Option<u32>,

        /// Maximum places to return; defaults to the configured limit
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },
}

type Pipeline = RecommendationPipeline<Arc<KakaoClient>, ChatClient>;

fn build_pipeline(config: &AppConfig) -> anyhow::Result<Pipeline> {
    let kakao = KakaoClient::with_base_url(
        &config.kakao_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.kakao_base_url,
    )?
    .with_retry(config.max_retries, config.retry_backoff_base_ms);
    let chat = ChatClient::with_base_url(
        &config.llm_api_key,
        &config.llm_model,
        config.request_timeout_secs,
        &config.user_agent,
        &config.llm_base_url,
    )?;
    Ok(RecommendationPipeline::new(
        Arc::new(kakao),
        chat,
        config.region.clone(),
    ))
}

fn log_startup(config: &AppConfig) {
    tracing::info!(
        region = %config.region.name,
        model = %config.llm_model,
        result_limit = config.region.result_limit,
        max_retries = config.max_retries,
        "configuration loaded"
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = localguide_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    log_startup(&config);

    let pipeline = build_pipeline(&config)?;
    tracing::debug!(kakao_base_url = %config.kakao_base_url, "recommendation pipeline ready");

    match cli.command {
        Commands::Recommend {
            text,
            location,
            station,
            lon,
            lat,
            category,
            qualified,
            no_summary,
            json,
        } => {
            let request = recommend::build_request(recommend::RecommendArgs {
                text,
                location,
                station,
                device: lon.zip(lat),
                category,
                qualified,
                summarize: !no_summary,
            })?;
            recommend::run_recommend(&pipeline, &request, json).await?;
        }
        Commands::Anchor { location, json } => {
            lookup::run_anchor(&pipeline, &location, false, json).await?;
        }
        Commands::Station { location, json } => {
            lookup::run_anchor(&pipeline, &location, true, json).await?;
        }
        Commands::Places {
            keyword,
            location,
            category,
            radius,
            limit,
            json,
        } => {
            let options = lookup::PlacesOptions {
                location,
                category,
                radius_m: radius,
                limit,
            };
            lookup::run_places(&pipeline, &keyword, &options, json).await?;
        }
    }

    Ok(())
}
