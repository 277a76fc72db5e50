use clap::{Parser, Subcommand, ValueEnum};
use financial_score::MissingDataPolicy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "finanalyse", version, about = "Fundamental analysis of listed companies from the terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// How score rules without data are counted.
    #[arg(long, value_enum, global = true, default_value_t = MissingData::Zero, env = "FINANALYSE_MISSING_DATA")]
    pub missing_data: MissingData,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Financial score, key indicators and commentary for one company.
    Analyze {
        ticker: String,

        /// Also write the analysis page as HTML.
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,
    },

    /// Side-by-side comparison of two companies.
    Compare { base: String, other: String },

    /// Filter companies by sector, maximum P/E and minimum dividend yield.
    Screener {
        #[arg(long)]
        sector: Option<String>,

        #[arg(long)]
        pe_max: Option<f64>,

        /// Minimum dividend yield, in percent.
        #[arg(long)]
        dividend_min: Option<f64>,
    },

    /// Look up symbols by company name or ticker.
    Search { query: String },

    /// Interactive symbol suggestions; reads one query per line from stdin.
    Suggest {
        /// Debounce delay in milliseconds.
        #[arg(long, default_value_t = 300)]
        delay_ms: u64,
    },

    /// Companies listed in a country (ISO code).
    Country { code: String },

    /// Today's top gainers and losers.
    Movers,

    /// Financial news, optionally from a single source.
    News {
        #[arg(long)]
        source: Option<String>,
    },

    /// Ask the AI assistant. Without a message, starts an interactive session.
    Chat { message: Option<String> },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MissingData {
    /// Missing metrics score zero and still count toward the maximum.
    Zero,
    /// Missing metrics are left out of the maximum.
    Exclude,
}

impl From<MissingData> for MissingDataPolicy {
    fn from(value: MissingData) -> Self {
        match value {
            MissingData::Zero => MissingDataPolicy::CountAsZero,
            MissingData::Exclude => MissingDataPolicy::ExcludeFromDenominator,
        }
    }
}
