//! typology - regional development typology CLI
//!
//! Usage:
//!   typology summary                          # KPIs and typology counts
//!   typology regions --region "Kota Kendari"  # Per-district labels
//!   typology regions --typology lagging       # Only one typology
//!   typology profile                          # Per-typology means
//!   typology predict --gdp 35 --poverty 12 --hdi 70 --internet 60
//!   typology gender-gap                       # Male vs female HDI
//!   typology heatmap                          # Normalized indicator grid
//!   typology trend --x sanitation_pct         # Trend line against poverty
//!   typology economy                          # GDP vs poverty quadrants

use clap::{Parser, Subcommand};
use log::{warn, LevelFilter};
use regional_typology::config::PipelineConfig;
use regional_typology::data::{Dataset, Indicator, RegionFeatures, MODEL_FEATURES};
use regional_typology::indicators::{
    economy_overview, gender_gap, indicator_heatmap, kpi_summary, trend,
};
use regional_typology::profile::profile;
use regional_typology::{train, LabeledRegion, Typology};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// typology - cluster districts into development typologies
///
/// Trains a three-cluster model on the district table at startup, then
/// reports on it or classifies a hypothetical region.
#[derive(Parser)]
#[command(name = "typology")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// District table (CSV)
    #[arg(long, global = true, env = "TYPOLOGY_DATA", default_value = "data_final_sultra.csv")]
    data: PathBuf,

    /// Restrict reports to these districts (repeatable; default all)
    #[arg(long = "region", global = true, value_name = "DISTRICT")]
    regions: Vec<String>,

    /// Restrict reports to these typologies (repeatable; default all)
    #[arg(long = "typology", global = true, value_name = "TYPOLOGY", value_parser = parse_typology)]
    typologies: Vec<Typology>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline indicators and typology counts
    Summary,

    /// Cluster id and typology of every district
    Regions,

    /// Mean indicators per typology
    Profile {
        /// Include auxiliary indicators, not just the modeling features
        #[arg(long)]
        all: bool,
    },

    /// Classify a hypothetical region
    Predict {
        /// GDP per capita (million Rp)
        #[arg(long, allow_negative_numbers = true)]
        gdp: f64,

        /// Poverty rate (%)
        #[arg(long, allow_negative_numbers = true)]
        poverty: f64,

        /// Total HDI
        #[arg(long, allow_negative_numbers = true)]
        hdi: f64,

        /// Households with internet access (%)
        #[arg(long, allow_negative_numbers = true)]
        internet: f64,
    },

    /// Male vs female HDI, highest male HDI first
    GenderGap,

    /// Min-max normalized indicator grid (higher is better)
    Heatmap,

    /// Least-squares trend between two indicators
    Trend {
        /// Horizontal axis
        #[arg(long, value_parser = parse_indicator, default_value = "internet_pct")]
        x: Indicator,

        /// Vertical axis
        #[arg(long, value_parser = parse_indicator, default_value = "poverty_pct")]
        y: Indicator,
    },

    /// GDP vs poverty against the view means
    Economy,
}

fn parse_indicator(s: &str) -> Result<Indicator, String> {
    Indicator::parse(s).ok_or_else(|| {
        let known: Vec<&str> = Indicator::ALL.iter().map(|i| i.name()).collect();
        format!("unknown indicator '{s}' (expected one of: {})", known.join(", "))
    })
}

fn parse_typology(s: &str) -> Result<Typology, String> {
    Typology::parse(s).ok_or_else(|| {
        let known: Vec<&str> = Typology::ALL.iter().map(|t| t.name()).collect();
        format!("unknown typology '{s}' (expected one of: {})", known.join(", "))
    })
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CliResult {
    let dataset = Dataset::from_path(&cli.data)?;
    let outcome = train(&dataset, &PipelineConfig::default())?;

    for name in &cli.regions {
        if outcome.labeled.get(name).is_none() {
            warn!("district '{name}' is not in the labeled data");
        }
    }
    let mut view = if cli.regions.is_empty() {
        outcome.labeled.view_all()
    } else {
        outcome.labeled.filter_districts(&cli.regions)
    };
    if !cli.typologies.is_empty() {
        view.retain(|r| cli.typologies.contains(&r.typology));
    }

    match &cli.command {
        Commands::Summary => cmd_summary(cli, &view, &outcome.dropped),
        Commands::Regions => cmd_regions(cli, &view),
        Commands::Profile { all } => cmd_profile(cli, &view, *all),
        Commands::Predict {
            gdp,
            poverty,
            hdi,
            internet,
        } => {
            let features = RegionFeatures::new(*gdp, *poverty, *hdi, *internet)?;
            let typology = outcome.model.predict_typology(&features)?;
            cmd_predict(cli, typology)
        }
        Commands::GenderGap => emit(cli, &gender_gap(&view), |rows| {
            println!("{:<28} {:>8} {:>8} {:>6}", "District", "Male", "Female", "Gap");
            for r in rows {
                println!(
                    "{:<28} {:>8.2} {:>8.2} {:>6.2}",
                    r.district, r.hdi_male, r.hdi_female, r.gap
                );
            }
        }),
        Commands::Heatmap => {
            let grid = indicator_heatmap(&view)?;
            emit(cli, &grid, |g| {
                print!("{:<28}", "District");
                for c in &g.columns {
                    print!(" {:>16}", c.name());
                }
                println!();
                for row in &g.rows {
                    print!("{:<28}", row.district);
                    for (s, r) in row.scaled.iter().zip(&row.raw) {
                        print!(" {:>7.2} ({:>6.1})", s, r);
                    }
                    println!();
                }
            })
        }
        Commands::Trend { x, y } => match trend(&view, *x, *y) {
            Some(line) => emit(cli, &line, |l| {
                println!("{} = {:.4} × {} + {:.4}", y.name(), l.slope, x.name(), l.intercept);
                println!("r = {:.4}, r² = {:.4}, n = {}", l.r, l.r_squared(), l.n);
            }),
            None => Err(format!(
                "not enough districts with distinct {} values to fit a trend",
                x.name()
            )
            .into()),
        },
        Commands::Economy => match economy_overview(&view) {
            Some(overview) => emit(cli, &overview, |o| {
                println!(
                    "Mean GDP per capita: {:.1}  Mean poverty: {:.2}%",
                    o.mean_gdp_per_capita, o.mean_poverty_pct
                );
                for p in &o.points {
                    let quadrant = match (p.above_mean_gdp, p.above_mean_poverty) {
                        (true, false) => "rich, low poverty",
                        (true, true) => "rich, high poverty",
                        (false, false) => "poor, low poverty",
                        (false, true) => "poor, high poverty",
                    };
                    println!(
                        "{:<28} {:>8.1} {:>7.2}%  {:<14} {}",
                        p.district, p.gdp_per_capita, p.poverty_pct, p.typology.name(), quadrant
                    );
                }
            }),
            None => Err("no districts selected".into()),
        },
    }
}

/// Prints `value` as pretty JSON, or through `human` otherwise.
fn emit<T: Serialize>(cli: &Cli, value: &T, human: impl FnOnce(&T)) -> CliResult {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human(value);
    }
    Ok(())
}

#[derive(Serialize)]
struct SummaryReport {
    regions: usize,
    mean_poverty_pct: Option<f64>,
    mean_hdi_total: Option<f64>,
    mean_gdp_per_capita: Option<f64>,
    typology_counts: Vec<(Typology, usize)>,
    dropped: Vec<String>,
}

fn cmd_summary(cli: &Cli, view: &[&LabeledRegion], dropped: &[String]) -> CliResult {
    let kpi = kpi_summary(view);
    let report = SummaryReport {
        regions: view.len(),
        mean_poverty_pct: kpi.map(|k| k.mean_poverty_pct),
        mean_hdi_total: kpi.map(|k| k.mean_hdi_total),
        mean_gdp_per_capita: kpi.map(|k| k.mean_gdp_per_capita),
        typology_counts: Typology::ALL
            .iter()
            .map(|&t| (t, view.iter().filter(|r| r.typology == t).count()))
            .collect(),
        dropped: dropped.to_vec(),
    };
    emit(cli, &report, |r| {
        println!("Regions:              {}", r.regions);
        if let (Some(p), Some(h), Some(g)) =
            (r.mean_poverty_pct, r.mean_hdi_total, r.mean_gdp_per_capita)
        {
            println!("Mean poverty:         {p:.2}%");
            println!("Mean HDI:             {h:.2}");
            println!("Mean GDP per capita:  Rp {g:.1} million");
        }
        for (t, n) in &r.typology_counts {
            println!("  {:<14} {n:>3}  {}", t.name(), t.description());
        }
        if !r.dropped.is_empty() {
            println!("Dropped (missing data): {}", r.dropped.join(", "));
        }
    })
}

fn cmd_regions(cli: &Cli, view: &[&LabeledRegion]) -> CliResult {
    emit(cli, &view, |rows| {
        println!("{:<28} {:>7}  {}", "District", "Cluster", "Typology");
        for r in rows.iter() {
            println!("{:<28} {:>7}  {}", r.record.district, r.cluster, r.typology);
        }
    })
}

fn cmd_profile(cli: &Cli, view: &[&LabeledRegion], all: bool) -> CliResult {
    let indicators: &[Indicator] = if all { &Indicator::ALL } else { &MODEL_FEATURES };
    let p = profile(view, indicators);
    emit(cli, &p, |p| {
        print!("{:<14} {:>5}", "Typology", "n");
        for i in indicators {
            print!(" {:>15}", i.name());
        }
        println!();
        for t in p.typologies() {
            print!("{:<14} {:>5}", t.name(), p.count(t));
            for &i in indicators {
                match p.get(t, i) {
                    Some(v) => print!(" {v:>15.2}"),
                    None => print!(" {:>15}", "-"),
                }
            }
            println!();
        }
    })
}

#[derive(Serialize)]
struct PredictionReport {
    typology: Typology,
    guidance: &'static str,
    description: &'static str,
}

fn cmd_predict(cli: &Cli, typology: Typology) -> CliResult {
    let report = PredictionReport {
        typology,
        guidance: typology.guidance(),
        description: typology.description(),
    };
    emit(cli, &report, |r| {
        println!("Typology: {}", r.typology);
        println!("Guidance: {}", r.guidance);
        println!("Profile:  {}", r.description);
    })
}
