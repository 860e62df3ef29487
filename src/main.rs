mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use competitor_metrics::config::AnalyzerConfig;
use competitor_metrics::report::{ReportFormat, ReportWriter};
use competitor_metrics::{analyze, format_float, format_number, format_percent, AnalysisResult, Dataset};

#[derive(Parser)]
#[command(
    name = "competitor-metrics",
    about = "Competitor page metrics and report generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a scraped dataset and write reports.
    Analyze(AnalyzeArgs),
    /// Serve the analysis over HTTP.
    Serve(ServeArgs),
    /// Write the default configuration to a TOML file.
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    /// Dataset JSON file, or `-` for stdin.
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Report formats to write: json, markdown, csv.
    #[arg(long = "format", value_delimiter = ',')]
    formats: Vec<String>,
    #[arg(long)]
    no_reports: bool,
    /// Print the full result as JSON instead of the summary table.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/analyzer.toml")]
    path: PathBuf,
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

    match cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Serve(args) => server::serve(args).await,
        Command::InitConfig(args) => {
            AnalyzerConfig::default()
                .write(&args.path)
                .map_err(|err| err.to_string())?;
            println!("Wrote default config to {}", args.path.display());
            Ok(())
        }
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<(), String> {
    let (mut config, config_path) =
        AnalyzerConfig::load(args.config).map_err(|err| err.to_string())?;
    if let Some(path) = config_path.as_ref().filter(|path| path.exists()) {
        tracing::info!(path = %path.display(), "loaded config");
    }

    if let Some(dir) = args.output_dir {
        config.reports.output_dir = dir;
    }
    if !args.formats.is_empty() {
        config.reports.formats = parse_formats(&args.formats)?;
    }

    let dataset = Dataset::load(&args.input).map_err(|err| err.to_string())?;
    let result = analyze(&dataset, &config).map_err(|err| err.to_string())?;

    if args.json {
        let payload = serde_json::to_string_pretty(&result)
            .map_err(|err| format!("failed to serialize result: {}", err))?;
        println!("{}", payload);
    } else {
        print_summary(&result);
    }

    if !args.no_reports {
        let writer = ReportWriter::for_result(config.reports.clone(), &result);
        let paths = writer.write_all(&result).map_err(|err| err.to_string())?;
        if !args.json {
            println!("\nReports:");
            for path in paths.all() {
                println!("- {}", path.display());
            }
        }
    }

    Ok(())
}

fn parse_formats(values: &[String]) -> Result<Vec<ReportFormat>, String> {
    values
        .iter()
        .map(|value| {
            ReportFormat::from_str(value.trim())
                .ok_or_else(|| format!("invalid report format: {}", value))
        })
        .collect()
}

fn print_summary(result: &AnalysisResult) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Competitor",
            "Followers",
            "Engagement",
            "Avg Reel Views",
            "Maturity",
            "Ads",
            "Share",
            "Score",
        ]);

    for competitor in &result.competitors {
        let position = result.position_of(&competitor.page_name);
        table.add_row(vec![
            Cell::new(&competitor.page_name),
            Cell::new(format_number(competitor.engagement.followers as f64)),
            Cell::new(competitor.engagement.engagement_quality.label()),
            Cell::new(format_number(competitor.engagement.reel_views.average_views)),
            Cell::new(competitor.business.maturity.label()),
            Cell::new(competitor.advertising.intensity.label()),
            Cell::new(
                position
                    .map(|p| format_percent(p.estimated_market_share))
                    .unwrap_or_default(),
            ),
            Cell::new(
                position
                    .map(|p| format_float(p.overall_competitiveness, 1))
                    .unwrap_or_default(),
            ),
        ]);
    }

    println!("{}", table);

    let stats = &result.summary_statistics;
    let insights = &result.competitive_insights;
    println!(
        "Competitors: {} | combined followers {} | advertising adoption {}",
        result.metadata.total_competitors,
        format_number(stats.total_combined_followers as f64),
        format_percent(stats.advertising_adoption_rate)
    );
    println!(
        "Market leader: {} ({}) | engagement leader: {} ({})",
        insights.market_leader.name,
        format_percent(insights.market_leader.value),
        insights.engagement_leader.name,
        format_float(insights.engagement_leader.value, 1)
    );
    println!("Risk: {}", result.executive_summary.risk_assessment);

    if !result.metadata.skipped_records.is_empty() {
        println!("\nSkipped records:");
        for skipped in &result.metadata.skipped_records {
            println!("- #{}: {}", skipped.index, skipped.reason);
        }
    }

    if !result.executive_summary.strategic_recommendations.is_empty() {
        println!("\nRecommendations:");
        for recommendation in &result.executive_summary.strategic_recommendations {
            println!("- {}", recommendation);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
