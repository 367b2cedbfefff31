pub mod calculator;
pub mod engine;
pub mod format;
pub mod instructions;

pub use crate::domain::model::{DoughInputs, Recipe};
pub use crate::domain::ports::{RecipeSource, Storage};
pub use crate::utils::error::Result;
