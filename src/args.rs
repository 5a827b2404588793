//! These structs provide the CLI interface for the uf-quote CLI.

use crate::property::Category;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// uf-quote: quote real-estate sales in UF and simulate the mortgage.
///
/// Browse the property catalog, build a quote from catalog positions and print it together with
/// a fixed-rate mortgage simulation. Amounts are shown in UF with a CLP reference value.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the catalog grouped by category, with the position to use in `quote --add`.
    Catalog(CatalogArgs),
    /// Build a quote from catalog positions and print it with the mortgage simulation.
    ///
    /// Financing values are read the way the form inputs are: the leading number is used,
    /// anything unreadable counts as 0 and percentages are clamped to 0..=100.
    Quote(QuoteArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// Defaults to UF_QUOTE_LOG_LEVEL, or info. RUST_LOG overrides both.
    #[arg(long)]
    log_level: Option<String>,
}

impl Common {
    pub fn new(log_level: Option<String>) -> Self {
        Self { log_level }
    }

    pub fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Economy,
    Exclusive,
}

impl From<CategoryArg> for Category {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Economy => Category::Economy,
            CategoryArg::Exclusive => Category::Exclusive,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Args for the `uf-quote catalog` command.
#[derive(Debug, Parser, Clone)]
pub struct CatalogArgs {
    /// Path to the JSON catalog.
    #[arg(long, env = "UF_QUOTE_CATALOG", default_value = "data/catalog.json")]
    catalog: PathBuf,

    /// Only list this category.
    #[arg(long, value_enum)]
    category: Option<CategoryArg>,

    /// Only list featured properties.
    #[arg(long)]
    featured: bool,
}

impl CatalogArgs {
    pub fn new(catalog: impl Into<PathBuf>, category: Option<CategoryArg>, featured: bool) -> Self {
        Self {
            catalog: catalog.into(),
            category,
            featured,
        }
    }

    pub fn catalog(&self) -> &Path {
        &self.catalog
    }

    pub fn category(&self) -> Option<Category> {
        self.category.map(Category::from)
    }

    pub fn featured(&self) -> bool {
        self.featured
    }
}

/// Args for the `uf-quote quote` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct QuoteArgs {
    /// Path to the JSON catalog.
    #[arg(long, env = "UF_QUOTE_CATALOG", default_value = "data/catalog.json")]
    pub catalog: PathBuf,

    /// Catalog position to add to the quote. Repeat to add more; repeating a position adds
    /// another unit of the same property.
    #[arg(long = "add", required = true)]
    pub add: Vec<usize>,

    /// Down payment percentage. The loan takes the rest.
    #[arg(long, conflicts_with = "loan", allow_hyphen_values = true)]
    pub down_payment: Option<String>,

    /// Loan percentage. The down payment takes the rest.
    #[arg(long, allow_hyphen_values = true)]
    pub loan: Option<String>,

    /// Extra contribution percentage. Recorded on the quote only.
    #[arg(long, allow_hyphen_values = true)]
    pub extra: Option<String>,

    /// Loan term in years.
    #[arg(long, allow_hyphen_values = true)]
    pub term: Option<String>,

    /// Annual interest rate, in percent.
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<String>,

    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    /// Issue date printed on the quote. Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
