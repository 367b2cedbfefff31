use crate::domain::model::{
    DoughInputs, FinalDough, InputLimits, PoolishMix, PoolishPolicy, Recipe, RecipeTotals,
};
use crate::utils::error::{DoughError, Result};

/// Salt, as a fraction of total flour.
pub const SALT_RATIO: f64 = 0.02;
/// Yeast, as a fraction of total flour.
pub const YEAST_RATIO: f64 = 0.003;
/// Poolish water / poolish flour.
pub const POOLISH_HYDRATION: f64 = 1.0;
/// Relative to total flour; smaller shortfalls are rounding noise.
const MASS_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeCalculator {
    policy: PoolishPolicy,
    limits: InputLimits,
}

impl RecipeCalculator {
    pub fn new(policy: PoolishPolicy) -> Self {
        Self {
            policy,
            limits: InputLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: InputLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn policy(&self) -> PoolishPolicy {
        self.policy
    }

    /// Validates `inputs`, then derives poolish, final dough and totals.
    ///
    /// Out-of-range inputs are rejected, never clamped. A negative final-dough
    /// mass means the configuration cannot be baked and is reported as
    /// [`DoughError::NegativeDerivedMass`].
    pub fn compute(&self, inputs: &DoughInputs) -> Result<Recipe> {
        self.limits.validate_limits()?;
        inputs.validate_within(&self.limits)?;

        let mut recipe = derive(inputs, self.policy);
        settle_final_masses(&mut recipe)?;

        tracing::debug!(
            "Computed recipe ({} policy): flour={:.3}g water={:.3}g poolish={:.3}g",
            self.policy,
            recipe.totals.flour,
            recipe.totals.water,
            recipe.totals.poolish_weight
        );
        Ok(recipe)
    }
}

/// Computes a recipe with the proportional policy and the default form limits.
pub fn compute_recipe(inputs: &DoughInputs) -> Result<Recipe> {
    RecipeCalculator::default().compute(inputs)
}

fn derive(inputs: &DoughInputs, policy: PoolishPolicy) -> Recipe {
    let bread_share = inputs.flour.bread_flour_pct() / 100.0;
    let whole_wheat_share = inputs.flour.whole_wheat_pct() / 100.0;
    let hydration = inputs.hydration / 100.0;

    let total_dough = inputs.total_dough();
    let total_flour = total_dough / (1.0 + hydration + SALT_RATIO + YEAST_RATIO);
    let total_water = total_flour * hydration;
    let total_salt = total_flour * SALT_RATIO;
    let total_yeast = total_flour * YEAST_RATIO;

    let bread_flour_mass = total_flour * bread_share;
    let whole_wheat_mass = total_flour * whole_wheat_share;

    let poolish_flour = total_flour * (inputs.poolish_pct / 100.0);
    let poolish_water = poolish_flour * POOLISH_HYDRATION;
    // 酵母全部放進 poolish
    let poolish_yeast = total_yeast;

    let (poolish_bread_flour, poolish_whole_wheat) = match policy {
        PoolishPolicy::Flat => (poolish_flour, None),
        PoolishPolicy::Proportional => (
            poolish_flour * bread_share,
            Some(poolish_flour * whole_wheat_share),
        ),
    };

    Recipe {
        policy,
        poolish: PoolishMix {
            yeast: poolish_yeast,
            water: poolish_water,
            bread_flour: poolish_bread_flour,
            whole_wheat: poolish_whole_wheat,
        },
        final_dough: FinalDough {
            water: total_water - poolish_water,
            bread_flour: bread_flour_mass - poolish_bread_flour,
            whole_wheat: whole_wheat_mass - poolish_whole_wheat.unwrap_or(0.0),
            salt: total_salt,
        },
        totals: RecipeTotals {
            flour: total_flour,
            water: total_water,
            salt: total_salt,
            yeast: total_yeast,
            dough: total_dough,
            poolish_weight: poolish_flour + poolish_water + poolish_yeast,
        },
    }
}

/// 浮點誤差範圍內的負值視為 0g
fn settle_final_masses(recipe: &mut Recipe) -> Result<()> {
    let tolerance = MASS_TOLERANCE * recipe.totals.flour;
    let final_dough = &mut recipe.final_dough;
    let masses = [
        ("final water", &mut final_dough.water),
        ("final bread flour", &mut final_dough.bread_flour),
        ("final whole wheat", &mut final_dough.whole_wheat),
    ];

    for (ingredient, grams) in masses {
        if *grams < -tolerance {
            tracing::warn!("Infeasible recipe: {} would be {:.1}g", ingredient, *grams);
            return Err(DoughError::NegativeDerivedMass {
                ingredient: ingredient.to_string(),
                grams: *grams,
            });
        }
        if *grams < 0.0 {
            *grams = 0.0;
        }
    }
    Ok(())
}
