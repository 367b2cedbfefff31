use anyhow::Result;
use poolish_dough::core::RecipeSource;
use poolish_dough::utils::validation::Validate;
use poolish_dough::{
    DoughError, LocalStorage, OutputFormat, PoolishPolicy, RecipeEngine, TomlConfig,
};
use tempfile::TempDir;

fn write_recipe(dir: &TempDir, name: &str, body: &str) -> Result<String> {
    let path = dir.path().join(name);
    std::fs::write(&path, body)?;
    Ok(path.to_str().unwrap().to_string())
}

#[test]
fn test_recipe_file_end_to_end_csv() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = write_recipe(
        &temp_dir,
        "friday.toml",
        r#"
[dough]
pizza_count = 6
pizza_weight = 250.0
hydration = 65.0
whole_wheat_pct = 25.0
poolish_pct = 40.0

[recipe]
policy = "proportional"

[output]
format = "csv"
path = "reports/friday.csv"
"#,
    )?;

    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;
    assert_eq!(config.inputs()?.flour.bread_flour_pct(), 75.0);

    let format = config.output_format();
    let path = config.output_path().unwrap().to_string();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

    let written = RecipeEngine::new(config).run_to_storage(format, &storage, &path)?;
    assert!(written.ends_with("friday.csv"));

    let csv = std::fs::read_to_string(temp_dir.path().join("reports/friday.csv"))?;
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("stage,ingredient,grams"));
    assert!(csv.contains("poolish,whole_wheat,"));
    assert!(csv.lines().any(|l| l.starts_with("totals,dough,1500")));

    Ok(())
}

#[test]
fn test_recipe_file_with_flat_policy_and_json() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = write_recipe(
        &temp_dir,
        "flat.toml",
        r#"
[dough]
pizza_count = 2
pizza_weight = 300
hydration = 70
bread_flour_pct = 90
poolish_pct = 20

[recipe]
policy = "flat"
"#,
    )?;

    let config = TomlConfig::from_file(&config_path)?;
    assert_eq!(config.policy(), PoolishPolicy::Flat);

    let run = RecipeEngine::new(config).run()?;
    let json: serde_json::Value = serde_json::from_str(&run.render(OutputFormat::Json)?)?;

    assert_eq!(json["recipe"]["policy"], "flat");
    assert!(json["recipe"]["poolish"].get("whole_wheat").is_none());
    assert_eq!(json["recipe"]["totals"]["dough"], 600.0);
    assert_eq!(
        json["instructions"][4],
        "Divide into 2 × 300g balls. Rise 1-2 hours until doubled"
    );

    Ok(())
}

#[test]
fn test_infeasible_recipe_file_reports_negative_mass() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = write_recipe(
        &temp_dir,
        "rye_heavy.toml",
        r#"
[dough]
pizza_count = 4
pizza_weight = 273
hydration = 62
bread_flour_pct = 10
poolish_pct = 50

[recipe]
policy = "flat"
"#,
    )?;

    let config = TomlConfig::from_file(&config_path)?;
    // 範圍都合法，只是做不出來
    config.validate()?;

    let err = RecipeEngine::new(config).run().unwrap_err();
    assert!(matches!(err, DoughError::NegativeDerivedMass { .. }));
    assert_eq!(err.severity().exit_code(), 1);

    Ok(())
}

#[test]
fn test_missing_recipe_file() {
    let err = TomlConfig::from_file("/definitely/not/here/dough.toml").unwrap_err();
    assert!(matches!(err, DoughError::IoError(_)));
}
