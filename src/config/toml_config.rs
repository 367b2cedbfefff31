use crate::app::report::OutputFormat;
use crate::core::RecipeSource;
use crate::domain::model::{DoughInputs, FlourBlend, InputLimits, PoolishPolicy};
use crate::utils::error::{DoughError, Result};
use crate::utils::validation::{validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub dough: DoughConfig,
    pub recipe: Option<RecipeConfig>,
    pub output: Option<OutputConfig>,
    pub limits: Option<InputLimits>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoughConfig {
    pub pizza_count: u32,
    pub pizza_weight: f64,
    pub hydration: f64,
    pub bread_flour_pct: Option<f64>,
    pub whole_wheat_pct: Option<f64>,
    pub poolish_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeConfig {
    pub policy: Option<PoolishPolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub path: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DoughError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DoughError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PIZZA_COUNT})，沒設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DoughError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn flour_blend(&self) -> Result<FlourBlend> {
        match (self.dough.bread_flour_pct, self.dough.whole_wheat_pct) {
            (Some(bread), Some(whole_wheat)) => FlourBlend::new(bread, whole_wheat),
            (Some(bread), None) => Ok(FlourBlend::from_bread_flour_pct(bread)),
            (None, Some(whole_wheat)) => Ok(FlourBlend::from_whole_wheat_pct(whole_wheat)),
            (None, None) => Err(DoughError::MissingConfigError {
                field: "dough.bread_flour_pct".to_string(),
            }),
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(path) = self.output_path() {
            validate_path("output.path", path)?;
        }

        let limits = self.limits();
        limits.validate_limits()?;
        self.inputs()?.validate_within(&limits)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    pub fn set_policy(&mut self, policy: PoolishPolicy) {
        self.recipe = Some(RecipeConfig {
            policy: Some(policy),
        });
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        let output = self.output.get_or_insert(OutputConfig {
            format: None,
            path: None,
        });
        output.format = Some(format);
    }

    pub fn set_output_path(&mut self, path: String) {
        let output = self.output.get_or_insert(OutputConfig {
            format: None,
            path: None,
        });
        output.path = Some(path);
    }
}

impl RecipeSource for TomlConfig {
    fn inputs(&self) -> Result<DoughInputs> {
        Ok(DoughInputs {
            pizza_count: self.dough.pizza_count,
            pizza_weight: self.dough.pizza_weight,
            hydration: self.dough.hydration,
            flour: self.flour_blend()?,
            poolish_pct: self.dough.poolish_pct,
        })
    }

    fn policy(&self) -> PoolishPolicy {
        self.recipe
            .as_ref()
            .and_then(|r| r.policy)
            .unwrap_or_default()
    }

    fn limits(&self) -> InputLimits {
        self.limits.unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
