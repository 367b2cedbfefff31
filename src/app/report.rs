use crate::core::format::{format_mass, format_number, round_tenth};
use crate::core::instructions::{self, POOLISH_NOTE};
use crate::domain::model::{DoughInputs, Recipe};
use crate::utils::error::{DoughError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

pub fn render(recipe: &Recipe, inputs: &DoughInputs, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(recipe, inputs)),
        OutputFormat::Json => render_json(recipe, inputs),
        OutputFormat::Csv => render_csv(recipe),
    }
}

const LABEL_WIDTH: usize = 22;
const VALUE_WIDTH: usize = 10;

fn line(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("  {:<LABEL_WIDTH$}{:>VALUE_WIDTH$}\n", label, value));
}

pub fn render_text(recipe: &Recipe, inputs: &DoughInputs) -> String {
    let mut out = String::new();

    out.push_str("Pizza Dough Calculator\n");
    out.push_str(&format!(
        "{} × {}g balls, {}% hydration, {}% bread flour / {}% whole wheat, {}% poolish ({} split)\n",
        inputs.pizza_count,
        format_number(inputs.pizza_weight),
        format_number(inputs.hydration),
        format_number(inputs.flour.bread_flour_pct()),
        format_number(inputs.flour.whole_wheat_pct()),
        format_number(inputs.poolish_pct),
        recipe.policy
    ));

    let poolish = &recipe.poolish;
    out.push_str("\nPoolish\n");
    line(&mut out, "Active Dry Yeast:", &format_mass(poolish.yeast));
    line(&mut out, "Water:", &format_mass(poolish.water));
    line(&mut out, "Bread Flour:", &format_mass(poolish.bread_flour));
    if let Some(whole_wheat) = poolish.whole_wheat {
        line(&mut out, "Whole Wheat Flour:", &format_mass(whole_wheat));
    }
    line(&mut out, "Total Poolish:", &format_mass(recipe.totals.poolish_weight));
    out.push_str(&format!("  {}\n", POOLISH_NOTE));

    let final_dough = &recipe.final_dough;
    out.push_str("\nFinal Dough\n");
    line(&mut out, "All the poolish", "↑");
    line(&mut out, "Water:", &format_mass(final_dough.water));
    line(&mut out, "Bread Flour:", &format_mass(final_dough.bread_flour));
    line(&mut out, "Whole Wheat Flour:", &format_mass(final_dough.whole_wheat));
    line(&mut out, "Salt:", &format_mass(final_dough.salt));

    let totals = &recipe.totals;
    out.push_str("\nTotals\n");
    line(&mut out, "Total Flour:", &format_mass(totals.flour));
    line(&mut out, "Total Water:", &format_mass(totals.water));
    line(&mut out, "Total Salt:", &format_mass(totals.salt));
    line(&mut out, "Total Yeast:", &format_mass(totals.yeast));
    line(&mut out, "Total Dough:", &format_mass(totals.dough));

    out.push_str("\nInstructions:\n");
    for (i, step) in instructions::steps(inputs.pizza_count, inputs.pizza_weight)
        .iter()
        .enumerate()
    {
        out.push_str(&format!("  {}. {}\n", i + 1, step));
    }

    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    inputs: &'a DoughInputs,
    recipe: &'a Recipe,
    instructions: Vec<String>,
}

pub fn render_json(recipe: &Recipe, inputs: &DoughInputs) -> Result<String> {
    let report = JsonReport {
        inputs,
        recipe,
        instructions: instructions::steps(inputs.pizza_count, inputs.pizza_weight),
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

#[derive(Serialize)]
struct CsvRow {
    stage: &'static str,
    ingredient: &'static str,
    grams: f64,
}

fn csv_rows(recipe: &Recipe) -> Vec<CsvRow> {
    let row = |stage: &'static str, ingredient: &'static str, grams: f64| CsvRow {
        stage,
        ingredient,
        grams: round_tenth(grams),
    };

    let mut rows = vec![
        row("poolish", "yeast", recipe.poolish.yeast),
        row("poolish", "water", recipe.poolish.water),
        row("poolish", "bread_flour", recipe.poolish.bread_flour),
    ];
    if let Some(whole_wheat) = recipe.poolish.whole_wheat {
        rows.push(row("poolish", "whole_wheat", whole_wheat));
    }
    rows.extend([
        row("final", "water", recipe.final_dough.water),
        row("final", "bread_flour", recipe.final_dough.bread_flour),
        row("final", "whole_wheat", recipe.final_dough.whole_wheat),
        row("final", "salt", recipe.final_dough.salt),
        row("totals", "flour", recipe.totals.flour),
        row("totals", "water", recipe.totals.water),
        row("totals", "salt", recipe.totals.salt),
        row("totals", "yeast", recipe.totals.yeast),
        row("totals", "dough", recipe.totals.dough),
        row("totals", "poolish_weight", recipe.totals.poolish_weight),
    ]);
    rows
}

pub fn render_csv(recipe: &Recipe) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in csv_rows(recipe) {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DoughError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        DoughError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::{compute_recipe, RecipeCalculator};
    use crate::domain::model::PoolishPolicy;

    #[test]
    fn test_text_report_sections() {
        let inputs = DoughInputs::default();
        let recipe = compute_recipe(&inputs).unwrap();
        let text = render_text(&recipe, &inputs);

        assert!(text.contains("\nPoolish\n"));
        assert!(text.contains("\nFinal Dough\n"));
        assert!(text.contains("\nTotals\n"));
        assert!(text.contains("Ferment 8-12 hours at 60-80°F"));
        assert!(text.contains("5. Divide into 4 × 273g balls"));
        // 1092g 以 kg 顯示
        assert!(text.contains("1.09kg"));
    }

    #[test]
    fn test_text_report_lines() {
        let inputs = DoughInputs::default();
        let recipe = compute_recipe(&inputs).unwrap();
        let text = render_text(&recipe, &inputs);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Pizza Dough Calculator");
        assert_eq!(
            lines[1],
            "4 × 273g balls, 62% hydration, 80% bread flour / 20% whole wheat, 30% poolish (proportional split)"
        );
        assert!(lines.contains(&"  Total Dough:              1.09kg"));
        assert_eq!(lines.last(), Some(&"  6. Bake and enjoy!"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_text_report_omits_poolish_whole_wheat_for_flat_policy() {
        let inputs = DoughInputs::default();
        let recipe = RecipeCalculator::new(PoolishPolicy::Flat)
            .compute(&inputs)
            .unwrap();
        let text = render_text(&recipe, &inputs);

        // 只剩 final dough 那一行
        assert_eq!(text.matches("Whole Wheat Flour:").count(), 1);
        assert!(text.contains("(flat split)"));
    }

    #[test]
    fn test_json_report_shape() {
        let inputs = DoughInputs::default();
        let recipe = compute_recipe(&inputs).unwrap();
        let json = render(&recipe, &inputs, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["inputs"]["pizza_count"], 4);
        assert_eq!(value["inputs"]["flour"]["whole_wheat_pct"], 20.0);
        assert_eq!(value["recipe"]["policy"], "proportional");
        assert_eq!(value["recipe"]["totals"]["dough"], 1092.0);
        assert!(value["recipe"]["final"]["salt"].is_number());
        assert_eq!(value["instructions"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_csv_report_rows() {
        let recipe = compute_recipe(&DoughInputs::default()).unwrap();
        let csv = render(&recipe, &DoughInputs::default(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "stage,ingredient,grams");
        assert_eq!(lines.len(), 1 + 14);
        assert!(lines.iter().any(|l| l.starts_with("totals,dough,1092")));
    }
}
