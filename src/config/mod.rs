pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::app::report::OutputFormat;
#[cfg(feature = "cli")]
use crate::core::RecipeSource;
#[cfg(feature = "cli")]
use crate::domain::model::{DoughInputs, FlourBlend, InputLimits, PoolishPolicy};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "poolish-dough")]
#[command(about = "Poolish pizza dough calculator: baker's percentages in, grams out")]
pub struct CliConfig {
    /// Number of dough balls
    #[arg(short = 'n', long = "pizzas", default_value = "4")]
    pub pizza_count: u32,

    /// Grams per dough ball
    #[arg(short = 'w', long = "weight", default_value = "273")]
    pub pizza_weight: f64,

    /// Water as a percentage of flour
    #[arg(long, default_value = "62")]
    pub hydration: f64,

    /// Bread flour share in percent (whole wheat gets the rest)
    #[arg(long, conflicts_with = "whole_wheat")]
    pub bread_flour: Option<f64>,

    /// Whole wheat share in percent (bread flour gets the rest)
    #[arg(long)]
    pub whole_wheat: Option<f64>,

    /// Share of the total flour pre-fermented in the poolish, in percent
    #[arg(long = "poolish", default_value = "30")]
    pub poolish_pct: f64,

    #[arg(long, value_enum, default_value_t = PoolishPolicy::Proportional)]
    pub policy: PoolishPolicy,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the report to this file
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn flour_blend(&self) -> Result<FlourBlend> {
        match (self.bread_flour, self.whole_wheat) {
            (Some(bread), Some(whole_wheat)) => FlourBlend::new(bread, whole_wheat),
            (Some(bread), None) => Ok(FlourBlend::from_bread_flour_pct(bread)),
            (None, Some(whole_wheat)) => Ok(FlourBlend::from_whole_wheat_pct(whole_wheat)),
            (None, None) => Ok(FlourBlend::default()),
        }
    }
}

#[cfg(feature = "cli")]
impl RecipeSource for CliConfig {
    fn inputs(&self) -> Result<DoughInputs> {
        Ok(DoughInputs {
            pizza_count: self.pizza_count,
            pizza_weight: self.pizza_weight,
            hydration: self.hydration,
            flour: self.flour_blend()?,
            poolish_pct: self.poolish_pct,
        })
    }

    fn policy(&self) -> PoolishPolicy {
        self.policy
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.output {
            validate_path("output", path)?;
        }
        self.inputs()?.validate_within(&InputLimits::default())
    }
}
