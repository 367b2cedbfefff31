pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::report::OutputFormat;
pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::calculator::{compute_recipe, RecipeCalculator};
pub use crate::core::engine::{RecipeEngine, RecipeRun};
pub use crate::domain::model::{DoughInputs, FlourBlend, InputLimits, PoolishPolicy, Recipe};
pub use crate::utils::error::{DoughError, Result};
