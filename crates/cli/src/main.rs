use advisor::{
    AdvisorConfig, CandidatePipeline, CandidatePreview, SneakerAdvisor, WorkflowOutcome, API_KEY_ENV,
    DEFAULT_BASE_URL, DEFAULT_MODEL,
};
use anyhow::{bail, Context, Result};
use catalog::{Brand, BudgetRange, CatalogIndex, Demographic, Preferences};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Sneaker Advisor - brand-aware sneaker recommendations
#[derive(Parser, Debug)]
#[command(name = "sneaker-advisor")]
#[command(about = "Recommend sneakers from brand catalogs with an LLM ranking step", long_about = None)]
struct Cli {
    /// JSON catalog file to use instead of the built-in tables
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get sneaker recommendations
    Recommend(RecommendArgs),

    /// List catalog entries
    Catalog {
        /// Only show this brand (exact name, e.g. "Nike")
        #[arg(long)]
        brand: Option<Brand>,

        /// Only show this group (male, female, kid)
        #[arg(long)]
        group: Option<Demographic>,
    },
}

#[derive(Args, Debug)]
struct RecommendArgs {
    /// Gender/age group: male, female or kid
    #[arg(long)]
    group: Demographic,

    /// Preferred brand; repeat for several. Omit for any brand
    #[arg(long = "brand")]
    brands: Vec<String>,

    /// Lowest acceptable price
    #[arg(long, default_value_t = 0.0)]
    min: f64,

    /// Highest acceptable price
    #[arg(long, default_value_t = 1000.0)]
    max: f64,

    /// Desired style (e.g. casual, retro)
    #[arg(long)]
    style: Option<String>,

    /// Desired color
    #[arg(long)]
    color: Option<String>,

    /// Intended use case (e.g. running, daily wear)
    #[arg(long)]
    use_case: Option<String>,

    /// API key for the generation service
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Model used for ranking
    #[arg(long, env = "SNEAKER_ADVISOR_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the generation API
    #[arg(long, env = "SNEAKER_ADVISOR_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,

    /// Stop before ranking and show the candidates instead
    #[arg(long)]
    dry_run: bool,
}

impl RecommendArgs {
    fn preferences(&self) -> Result<Preferences> {
        let budget = BudgetRange::new(self.min, self.max).context("Invalid budget range")?;

        let mut preferences = Preferences::new(self.group, budget).with_brands(self.brands.iter().cloned());
        preferences.style = self.style.clone();
        preferences.color = self.color.clone();
        preferences.use_case = self.use_case.clone();
        Ok(preferences)
    }

    fn config(&self) -> AdvisorConfig {
        AdvisorConfig::new(self.api_key.clone().unwrap_or_default())
            .with_model(self.model.clone())
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data_index = Arc::new(load_catalog(cli.catalog.as_ref())?);

    match cli.command {
        Commands::Recommend(args) => handle_recommend(data_index, args).await?,
        Commands::Catalog { brand, group } => handle_catalog(&data_index, brand, group),
    }

    Ok(())
}

fn load_catalog(path: Option<&PathBuf>) -> Result<CatalogIndex> {
    let start = Instant::now();
    let index = match path {
        Some(path) => {
            info!("Loading catalog from {}", path.display());
            CatalogIndex::load_from_file(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?
        }
        None => CatalogIndex::builtin(),
    };

    let (brands, products) = index.counts();
    eprintln!(
        "{} Loaded {} products across {} brands in {:?}",
        "✓".green(),
        products,
        brands,
        start.elapsed()
    );
    Ok(index)
}

/// Handle the 'recommend' command
async fn handle_recommend(data_index: Arc<CatalogIndex>, args: RecommendArgs) -> Result<()> {
    let preferences = args.preferences()?;

    if args.dry_run {
        let preview = CandidatePipeline::new(data_index)
            .preview(preferences)
            .await
            .context("Candidate collection failed")?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&preview)?);
        } else {
            print_preview(&preview);
        }
        return Ok(());
    }

    let outcome = match SneakerAdvisor::from_config(data_index, &args.config()) {
        Ok(advisor) => advisor.run(preferences).await,
        Err(e) => WorkflowOutcome::failure(&e),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }

    match outcome.kind {
        Some(kind) if !kind.is_soft() => bail!("Recommendation workflow failed ({:?})", kind),
        _ => Ok(()),
    }
}

/// Handle the 'catalog' command
fn handle_catalog(data_index: &CatalogIndex, brand: Option<Brand>, group: Option<Demographic>) {
    let brands: Vec<Brand> = match brand {
        Some(brand) => vec![brand],
        None => data_index.brands().collect(),
    };

    for brand in brands {
        let products: Vec<_> = data_index
            .products(brand)
            .iter()
            .filter(|p| group.is_none_or(|g| p.demographic == g))
            .collect();
        if products.is_empty() {
            continue;
        }

        println!("{}", brand.to_string().bold().blue());
        for product in products {
            println!(
                "  {} {:<28} {:<7} {}",
                format!("${:>7.2}", product.price).green(),
                product.name,
                product.demographic.as_str(),
                product.url.dimmed()
            );
        }
    }
}

fn print_preview(preview: &CandidatePreview) {
    let brands: Vec<_> = preview.selected_brands.iter().map(Brand::as_str).collect();
    println!("{} {}", "Selected brands:".bold().blue(), brands.join(", "));

    for (brand, products) in preview.results.iter() {
        println!("{}{}: {} matching", "• ".cyan(), brand, products.len());
    }

    if preview.candidates.is_empty() {
        println!("{}", "No candidates would be sent for ranking.".yellow());
        return;
    }
    println!("{}", "Candidates for ranking:".bold().blue());
    for (i, product) in preview.candidates.iter().enumerate() {
        println!(
            "{}. {} ({}) - ${:.2}",
            (i + 1).to_string().green(),
            product.name,
            product.brand,
            product.price
        );
    }
}

/// Helper function to format and print the workflow outcome
fn print_outcome(outcome: &WorkflowOutcome) {
    if let Some(error) = &outcome.error {
        let soft = outcome.kind.is_some_and(|k| k.is_soft());
        if soft {
            println!("{}", error.yellow());
        } else {
            println!("{} {}", "Error:".red().bold(), error);
        }
        return;
    }

    println!("{}", "Sneaker Recommendations:".bold().blue());
    for (i, rec) in outcome.recommendations.iter().enumerate() {
        println!(
            "{}. {} ({}) - ${:.2}",
            (i + 1).to_string().green(),
            rec.name.bold(),
            rec.brand,
            rec.price
        );
        println!("   {}", rec.reason);
        println!("   {}", rec.url.dimmed());
        if let Some(image_url) = &rec.image_url {
            println!("   {}", image_url.dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend() {
        let cli = Cli::try_parse_from([
            "sneaker-advisor",
            "recommend",
            "--group",
            "male",
            "--brand",
            "Nike",
            "--brand",
            "Reebok",
            "--min",
            "10",
            "--max",
            "520",
            "--style",
            "casual",
            "--use-case",
            "daily wear",
            "--dry-run",
        ])
        .unwrap();

        let Commands::Recommend(args) = cli.command else {
            panic!("expected recommend");
        };
        assert!(args.dry_run);
        assert!(!args.json);

        let prefs = args.preferences().unwrap();
        assert_eq!(prefs.demographic, Demographic::Male);
        assert_eq!(prefs.preferred_brands, vec!["Nike".to_string(), "Reebok".to_string()]);
        assert_eq!(prefs.budget, BudgetRange::new(10.0, 520.0).unwrap());
        assert_eq!(prefs.style.as_deref(), Some("casual"));
        assert_eq!(prefs.color, None);
        assert_eq!(prefs.use_case.as_deref(), Some("daily wear"));
    }

    #[test]
    fn test_parse_kids_group_and_global_catalog() {
        let cli = Cli::try_parse_from([
            "sneaker-advisor",
            "recommend",
            "--group",
            "Kids",
            "--catalog",
            "shoes.json",
        ])
        .unwrap();

        assert_eq!(cli.catalog, Some(PathBuf::from("shoes.json")));
        let Commands::Recommend(args) = cli.command else {
            panic!("expected recommend");
        };
        assert_eq!(args.group, Demographic::Kid);
        assert_eq!(args.timeout, 60);
    }

    #[test]
    fn test_inverted_budget_is_rejected() {
        let cli = Cli::try_parse_from(["sneaker-advisor", "recommend", "--group", "female", "--min", "200", "--max", "100"])
            .unwrap();
        let Commands::Recommend(args) = cli.command else {
            panic!("expected recommend");
        };
        assert!(args.preferences().is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert!(Cli::try_parse_from(["sneaker-advisor", "recommend", "--group", "adult"]).is_err());
        assert!(Cli::try_parse_from(["sneaker-advisor", "catalog", "--brand", "nike"]).is_err());
        assert!(Cli::try_parse_from(["sneaker-advisor", "recommend"]).is_err());
    }

    #[test]
    fn test_parse_catalog_filters() {
        let cli = Cli::try_parse_from(["sneaker-advisor", "catalog", "--brand", "Puma", "--group", "kid"]).unwrap();
        match cli.command {
            Commands::Catalog { brand, group } => {
                assert_eq!(brand, Some(Brand::Puma));
                assert_eq!(group, Some(Demographic::Kid));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_config_from_flags() {
        let cli = Cli::try_parse_from([
            "sneaker-advisor",
            "recommend",
            "--group",
            "male",
            "--api-key",
            "abc",
            "--model",
            "gemini-1.5-pro",
            "--base-url",
            "http://localhost:9000",
            "--timeout",
            "5",
        ])
        .unwrap();
        let Commands::Recommend(args) = cli.command else {
            panic!("expected recommend");
        };

        let config = args.config();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }
}
