use crate::domain::model::{DoughInputs, InputLimits, PoolishPolicy};
use crate::utils::error::Result;

/// Somewhere the dough inputs come from (command line, recipe file, ...).
pub trait RecipeSource {
    fn inputs(&self) -> Result<DoughInputs>;
    fn policy(&self) -> PoolishPolicy;

    fn limits(&self) -> InputLimits {
        InputLimits::default()
    }
}

pub trait Storage {
    /// 寫入後回傳實際路徑
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}
