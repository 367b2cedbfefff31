use crate::utils::error::{DoughError, Result};
use crate::utils::validation::{
    validate_finite, validate_open_range, validate_positive_number, validate_range,
};
use serde::{Deserialize, Serialize};

/// 麵粉總比例
pub const FULL_BLEND_PCT: f64 = 100.0;

const SPLIT_TOLERANCE: f64 = 1e-9;

/// 決定 poolish 的麵粉從哪裡來
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum PoolishPolicy {
    /// All poolish flour is bread flour; whole wheat goes entirely into the final dough.
    Flat,
    /// Poolish flour is split in the same ratio as the overall blend.
    #[default]
    Proportional,
}

impl std::fmt::Display for PoolishPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolishPolicy::Flat => write!(f, "flat"),
            PoolishPolicy::Proportional => write!(f, "proportional"),
        }
    }
}

/// Bread flour / whole wheat shares of the total flour.
///
/// The two shares always sum to 100. Setting one share recomputes the other,
/// so there is no way to hold an inconsistent pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlourBlend {
    bread_flour_pct: f64,
    whole_wheat_pct: f64,
}

impl FlourBlend {
    /// Checked constructor for callers that carry both shares (e.g. recipe files).
    pub fn new(bread_flour_pct: f64, whole_wheat_pct: f64) -> Result<Self> {
        validate_finite("bread_flour_pct", bread_flour_pct)?;
        validate_finite("whole_wheat_pct", whole_wheat_pct)?;
        if ((bread_flour_pct + whole_wheat_pct) - FULL_BLEND_PCT).abs() > SPLIT_TOLERANCE {
            return Err(DoughError::InconsistentFlourSplit {
                bread_flour_pct,
                whole_wheat_pct,
            });
        }
        Ok(Self {
            bread_flour_pct,
            whole_wheat_pct,
        })
    }

    pub fn from_bread_flour_pct(bread_flour_pct: f64) -> Self {
        let mut blend = Self::default();
        blend.set_bread_flour_pct(bread_flour_pct);
        blend
    }

    pub fn from_whole_wheat_pct(whole_wheat_pct: f64) -> Self {
        let mut blend = Self::default();
        blend.set_whole_wheat_pct(whole_wheat_pct);
        blend
    }

    pub fn set_bread_flour_pct(&mut self, pct: f64) {
        self.bread_flour_pct = pct;
        self.whole_wheat_pct = FULL_BLEND_PCT - pct;
    }

    pub fn set_whole_wheat_pct(&mut self, pct: f64) {
        self.whole_wheat_pct = pct;
        self.bread_flour_pct = FULL_BLEND_PCT - pct;
    }

    pub fn bread_flour_pct(&self) -> f64 {
        self.bread_flour_pct
    }

    pub fn whole_wheat_pct(&self) -> f64 {
        self.whole_wheat_pct
    }
}

impl Default for FlourBlend {
    fn default() -> Self {
        Self {
            bread_flour_pct: 80.0,
            whole_wheat_pct: 20.0,
        }
    }
}

/// The six scalar inputs of a dough recipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DoughInputs {
    pub pizza_count: u32,
    /// Grams per dough ball.
    pub pizza_weight: f64,
    /// Water / flour, in percent.
    pub hydration: f64,
    pub flour: FlourBlend,
    /// Share of the total flour that goes into the poolish, in percent.
    pub poolish_pct: f64,
}

impl Default for DoughInputs {
    fn default() -> Self {
        Self {
            pizza_count: 4,
            pizza_weight: 273.0,
            hydration: 62.0,
            flour: FlourBlend::default(),
            poolish_pct: 30.0,
        }
    }
}

impl DoughInputs {
    pub fn total_dough(&self) -> f64 {
        f64::from(self.pizza_count) * self.pizza_weight
    }

    /// 結構性範圍：不論 limits 怎麼設都必須成立
    pub fn validate_structure(&self) -> Result<()> {
        validate_range("pizza_count", self.pizza_count, 1, u32::MAX)?;
        validate_positive_number("pizza_weight", self.pizza_weight)?;
        validate_finite("hydration", self.hydration)?;
        validate_range("hydration", self.hydration, 0.0, f64::MAX)?;
        validate_range("bread_flour_pct", self.flour.bread_flour_pct(), 0.0, FULL_BLEND_PCT)?;
        validate_open_range("poolish_pct", self.poolish_pct, 0.0, FULL_BLEND_PCT)?;
        Ok(())
    }

    pub fn validate_within(&self, limits: &InputLimits) -> Result<()> {
        self.validate_structure()?;
        limits.pizza_count.check("pizza_count", self.pizza_count)?;
        limits.pizza_weight.check("pizza_weight", self.pizza_weight)?;
        limits.hydration.check("hydration", self.hydration)?;
        limits
            .bread_flour_pct
            .check("bread_flour_pct", self.flour.bread_flour_pct())?;
        limits.poolish_pct.check("poolish_pct", self.poolish_pct)?;
        Ok(())
    }
}

/// Inclusive range for one input field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + std::fmt::Display + Copy> Bounds<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn check(&self, field_name: &str, value: T) -> Result<()> {
        validate_range(field_name, value, self.min, self.max)
    }
}

/// Per-field input ranges.
///
/// Defaults: 1–20 balls, 100–500 g per ball, 50–80 % hydration, 20–50 % poolish.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    pub pizza_count: Bounds<u32>,
    pub pizza_weight: Bounds<f64>,
    pub hydration: Bounds<f64>,
    pub bread_flour_pct: Bounds<f64>,
    pub poolish_pct: Bounds<f64>,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            pizza_count: Bounds::new(1, 20),
            pizza_weight: Bounds::new(100.0, 500.0),
            hydration: Bounds::new(50.0, 80.0),
            bread_flour_pct: Bounds::new(0.0, FULL_BLEND_PCT),
            poolish_pct: Bounds::new(20.0, 50.0),
        }
    }
}

impl InputLimits {
    /// 自訂的 limits 也不能超出結構性範圍
    pub fn validate_limits(&self) -> Result<()> {
        check_bounds_order("limits.pizza_count", &self.pizza_count)?;
        check_bounds_order("limits.pizza_weight", &self.pizza_weight)?;
        check_bounds_order("limits.hydration", &self.hydration)?;
        check_bounds_order("limits.bread_flour_pct", &self.bread_flour_pct)?;
        check_bounds_order("limits.poolish_pct", &self.poolish_pct)?;

        if self.pizza_count.min < 1 {
            return Err(invalid_limit(
                "limits.pizza_count",
                self.pizza_count.min,
                "minimum must be at least 1",
            ));
        }
        if !(self.pizza_weight.min > 0.0) {
            return Err(invalid_limit(
                "limits.pizza_weight",
                self.pizza_weight.min,
                "minimum must be positive",
            ));
        }
        if !(self.hydration.min >= 0.0) {
            return Err(invalid_limit(
                "limits.hydration",
                self.hydration.min,
                "minimum cannot be negative",
            ));
        }
        if !(self.bread_flour_pct.min >= 0.0 && self.bread_flour_pct.max <= FULL_BLEND_PCT) {
            return Err(invalid_limit(
                "limits.bread_flour_pct",
                format!("{}..{}", self.bread_flour_pct.min, self.bread_flour_pct.max),
                "range must lie within 0..100",
            ));
        }
        if !(self.poolish_pct.min > 0.0 && self.poolish_pct.max < FULL_BLEND_PCT) {
            return Err(invalid_limit(
                "limits.poolish_pct",
                format!("{}..{}", self.poolish_pct.min, self.poolish_pct.max),
                "range must lie strictly within 0..100",
            ));
        }
        Ok(())
    }
}

fn check_bounds_order<T: PartialOrd + std::fmt::Display>(
    field: &str,
    bounds: &Bounds<T>,
) -> Result<()> {
    if !(bounds.min <= bounds.max) {
        return Err(invalid_limit(
            field,
            format!("{}..{}", bounds.min, bounds.max),
            "min must not exceed max",
        ));
    }
    Ok(())
}

fn invalid_limit(field: &str, value: impl ToString, reason: &str) -> DoughError {
    DoughError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PoolishMix {
    pub yeast: f64,
    pub water: f64,
    pub bread_flour: f64,
    /// Absent under the flat policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whole_wheat: Option<f64>,
}

impl PoolishMix {
    pub fn flour(&self) -> f64 {
        self.bread_flour + self.whole_wheat.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinalDough {
    pub water: f64,
    pub bread_flour: f64,
    pub whole_wheat: f64,
    pub salt: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecipeTotals {
    pub flour: f64,
    pub water: f64,
    pub salt: f64,
    pub yeast: f64,
    pub dough: f64,
    pub poolish_weight: f64,
}

/// Absolute masses in grams. A fresh value per computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recipe {
    pub policy: PoolishPolicy,
    pub poolish: PoolishMix,
    #[serde(rename = "final")]
    pub final_dough: FinalDough,
    pub totals: RecipeTotals,
}
