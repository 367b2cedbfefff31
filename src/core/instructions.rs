use crate::core::format::format_number;

pub const POOLISH_NOTE: &str = "Ferment 8-12 hours at 60-80°F";

/// The fixed method, with the ball count and weight filled in.
pub fn steps(pizza_count: u32, pizza_weight: f64) -> Vec<String> {
    vec![
        "Mix the poolish and ferment 8-12 hours at 60-80°F".to_string(),
        "Mix poolish and final dough ingredients with a butter knife. Rest 30 min".to_string(),
        "Slap and fold with damp hands. Rest 30 min".to_string(),
        "Round the dough. Ferment 1 hour".to_string(),
        format!(
            "Divide into {} × {}g balls. Rise 1-2 hours until doubled",
            pizza_count,
            format_number(pizza_weight)
        ),
        "Bake and enjoy!".to_string(),
    ]
}
