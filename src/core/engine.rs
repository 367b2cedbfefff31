use crate::app::report::{self, OutputFormat};
use crate::core::calculator::RecipeCalculator;
use crate::core::{DoughInputs, Recipe, RecipeSource, Storage};
use crate::utils::error::Result;

/// Inputs together with the recipe derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeRun {
    pub inputs: DoughInputs,
    pub recipe: Recipe,
}

impl RecipeRun {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        report::render(&self.recipe, &self.inputs, format)
    }
}

pub struct RecipeEngine<S: RecipeSource> {
    source: S,
}

impl<S: RecipeSource> RecipeEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn run(&self) -> Result<RecipeRun> {
        tracing::info!("Reading dough inputs...");
        let inputs = self.source.inputs()?;
        tracing::debug!("Inputs: {:?}", inputs);

        let calculator =
            RecipeCalculator::new(self.source.policy()).with_limits(self.source.limits());

        tracing::info!(
            "Computing recipe for {} × {}g ({} poolish policy)...",
            inputs.pizza_count,
            inputs.pizza_weight,
            calculator.policy()
        );
        let recipe = calculator.compute(&inputs)?;
        tracing::info!(
            "Total dough {:.1}g, poolish {:.1}g",
            recipe.totals.dough,
            recipe.totals.poolish_weight
        );

        Ok(RecipeRun { inputs, recipe })
    }

    /// Runs, renders and hands the report to `storage`. Returns where it was written.
    pub fn run_to_storage<T: Storage>(
        &self,
        format: OutputFormat,
        storage: &T,
        path: &str,
    ) -> Result<String> {
        let run = self.run()?;
        let rendered = run.render(format)?;

        tracing::info!("Writing {} report to {}", format, path);
        storage.write_file(path, rendered.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FlourBlend, InputLimits, PoolishPolicy};
    use crate::utils::error::DoughError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct FixedSource {
        inputs: DoughInputs,
        policy: PoolishPolicy,
    }

    impl RecipeSource for FixedSource {
        fn inputs(&self) -> Result<DoughInputs> {
            Ok(self.inputs)
        }

        fn policy(&self) -> PoolishPolicy {
            self.policy
        }
    }

    struct LooseSource;

    impl RecipeSource for LooseSource {
        fn inputs(&self) -> Result<DoughInputs> {
            Ok(DoughInputs {
                pizza_count: 40,
                ..DoughInputs::default()
            })
        }

        fn policy(&self) -> PoolishPolicy {
            PoolishPolicy::Proportional
        }

        fn limits(&self) -> InputLimits {
            let mut limits = InputLimits::default();
            limits.pizza_count.max = 50;
            limits
        }
    }

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl Storage for MockStorage {
        fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(path.to_string())
        }
    }

    #[test]
    fn test_engine_uses_source_policy() {
        let engine = RecipeEngine::new(FixedSource {
            inputs: DoughInputs::default(),
            policy: PoolishPolicy::Flat,
        });

        let run = engine.run().unwrap();
        assert_eq!(run.recipe.policy, PoolishPolicy::Flat);
        assert_eq!(run.inputs, DoughInputs::default());
    }

    #[test]
    fn test_engine_uses_source_limits() {
        let run = RecipeEngine::new(LooseSource).run().unwrap();
        assert_eq!(run.recipe.totals.dough, 40.0 * 273.0);
    }

    #[test]
    fn test_engine_surfaces_calculator_errors() {
        let engine = RecipeEngine::new(FixedSource {
            inputs: DoughInputs {
                flour: FlourBlend::from_bread_flour_pct(10.0),
                poolish_pct: 50.0,
                ..DoughInputs::default()
            },
            policy: PoolishPolicy::Flat,
        });

        assert!(matches!(
            engine.run(),
            Err(DoughError::NegativeDerivedMass { .. })
        ));
    }

    #[test]
    fn test_run_to_storage_writes_report() {
        let engine = RecipeEngine::new(FixedSource {
            inputs: DoughInputs::default(),
            policy: PoolishPolicy::Proportional,
        });
        let storage = MockStorage::default();

        let written = engine
            .run_to_storage(OutputFormat::Csv, &storage, "recipe.csv")
            .unwrap();
        assert_eq!(written, "recipe.csv");

        let files = storage.files.borrow();
        let content = String::from_utf8(files["recipe.csv"].clone()).unwrap();
        assert!(content.starts_with("stage,ingredient,grams"));
    }
}
