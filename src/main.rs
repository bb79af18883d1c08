use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use video_curator::synthetic::generate_synthetic_candidates;
use video_curator::validation::validate_candidates;
use video_curator::{
    format_float, format_number, parse_duration, CandidateSet, EngineConfig, FilterResult,
    FilteringEngine, TieredQualityCriteria, UserPreferences,
};

#[derive(Parser)]
#[command(name = "video-curator", about = "Tiered quality filtering for video candidates")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filter and rank candidates read from a JSON file.
    Curate(CurateArgs),
    /// Print the tier table derived from preferences.
    Tiers(TiersArgs),
    /// Run the engine on synthetic candidates.
    Demo(DemoArgs),
    /// Write the effective engine config to a TOML file.
    Init(InitArgs),
}

#[derive(Args, Debug, Clone)]
struct CurateArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    preferences: Option<PathBuf>,
    #[arg(long)]
    query: Option<String>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct TiersArgs {
    #[arg(long)]
    preferences: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct DemoArgs {
    #[arg(long, default_value_t = 60)]
    count: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long)]
    query: Option<String>,
    #[arg(long)]
    preferences: Option<PathBuf>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct InitArgs {
    /// Defaults to the config path in use (CURATOR_CONFIG_PATH or config/curator.toml).
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, config_path) = EngineConfig::load(cli.config)?;

    match cli.command {
        Command::Curate(args) => run_curate(config, args).await,
        Command::Tiers(args) => run_tiers(config, args),
        Command::Demo(args) => run_demo(config, args).await,
        Command::Init(args) => run_init(config, config_path, args),
    }
}

async fn run_curate(config: EngineConfig, args: CurateArgs) -> Result<(), String> {
    let preferences = load_preferences(args.preferences.as_deref())?;
    let contents = std::fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read candidates: {}", err))?;
    let candidates: CandidateSet = serde_json::from_str(&contents)
        .map_err(|err| format!("failed to parse candidates: {}", err))?;

    let problems = validate_candidates(&candidates);
    for problem in &problems {
        warn!("{}", problem);
    }
    if !problems.is_empty() {
        eprintln!(
            "{} problems found in {} (see log)",
            problems.len(),
            args.input.display()
        );
    }

    let engine = FilteringEngine::new(config);
    let result = engine
        .filter_and_rank_content(
            &candidates.videos,
            &candidates.channels_by_id(),
            &preferences,
            args.query.as_deref(),
        )
        .await;

    print_result(&result, args.json)
}

fn run_tiers(config: EngineConfig, args: TiersArgs) -> Result<(), String> {
    let preferences = load_preferences(args.preferences.as_deref())?;
    let engine = FilteringEngine::new(config);
    print_tiers(&engine.criteria_for(&preferences));
    Ok(())
}

async fn run_demo(config: EngineConfig, args: DemoArgs) -> Result<(), String> {
    let preferences = load_preferences(args.preferences.as_deref())?;
    let now = Utc::now();
    let candidates = generate_synthetic_candidates(args.count, args.seed, now);

    let engine = FilteringEngine::new(config);
    let result = engine
        .filter_and_rank_content_at(
            &candidates.videos,
            &candidates.channels_by_id(),
            &preferences,
            args.query.as_deref(),
            now,
        )
        .await;

    print_result(&result, args.json)
}

fn run_init(
    config: EngineConfig,
    config_path: Option<PathBuf>,
    args: InitArgs,
) -> Result<(), String> {
    let path = args
        .output
        .or(config_path)
        .ok_or_else(|| "no config path given".to_string())?;
    if path.exists() && !args.force {
        return Err(format!(
            "{} already exists, pass --force to overwrite",
            path.display()
        ));
    }
    config.write(&path)?;
    println!("Wrote config to {}", path.display());
    Ok(())
}

fn print_result(result: &FilterResult, json: bool) -> Result<(), String> {
    if json {
        let payload = serde_json::to_string_pretty(result)
            .map_err(|err| format!("failed to serialize result: {}", err))?;
        println!("{}", payload);
        return Ok(());
    }

    if result.videos.is_empty() {
        println!(
            "No videos qualified ({} scored). Try different keywords.",
            result.metrics.len()
        );
        return Ok(());
    }

    println!(
        "{} videos from tier {} ({} scored)",
        result.videos.len(),
        result.used_tier,
        result.metrics.len()
    );
    for (rank, video) in result.videos.iter().enumerate() {
        println!(
            "{:>2}. {} [{}] {} views, {}s",
            rank + 1,
            video.title,
            video.id,
            format_number(video.view_count as f64),
            parse_duration(&video.duration)
        );
        if let Some(metrics) = result.metrics.get(&video.id) {
            println!(
                "    overall {} | engagement {} | authority {} | quality {} | freshness {} | relevancy {}",
                format_float(metrics.overall_score, 2),
                format_float(metrics.engagement_score, 2),
                format_float(metrics.authority_score, 2),
                format_float(metrics.content_quality_score, 2),
                format_float(metrics.freshness_score, 2),
                format_float(metrics.relevancy_score, 2)
            );
        }
    }
    Ok(())
}

fn print_tiers(criteria: &TieredQualityCriteria) {
    for tier in criteria.tiers() {
        println!("Tier {} ({}):", tier.tier, tier.name);
        println!(
            "  scores: authority {} | quality {} | engagement {} | relevancy {}",
            format_float(tier.min_authority_score, 2),
            format_float(tier.min_quality_score, 2),
            format_float(tier.min_engagement_score, 2),
            format_float(tier.min_relevancy_score, 2)
        );
        println!(
            "  views >= {} | duration {}-{}s | age <= {}d | completeness {}",
            format_number(tier.min_view_count as f64),
            tier.min_duration,
            tier.max_duration,
            tier.max_age_in_days,
            if tier.requires_completeness { "required" } else { "optional" }
        );
    }
    println!(
        "Relaxes down to tier {} ({} transition)",
        criteria.last_tier(),
        if criteria.strict_transition { "cumulative" } else { "replacing" }
    );
}

fn load_preferences(path: Option<&Path>) -> Result<UserPreferences, String> {
    let Some(path) = path else {
        return Ok(UserPreferences::default());
    };
    let contents = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read preferences: {}", err))?;
    toml::from_str(&contents).map_err(|err| format!("failed to parse preferences: {}", err))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "video_curator=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
