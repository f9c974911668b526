//! Diff computation stage.
//!
//! Turns the matching section of a [`DiffConfig`] into key extractors and an
//! equality policy, then runs the engine over loaded records.

use crate::config::{DiffConfig, MatchingConfig};
use crate::diff::DiffEngine;
use crate::equality::Equality;
use crate::error::CmpError;
use crate::records::{parse_paths, record_equality, RecordKeyExtractor};
use crate::reports::RecordDiff;
use anyhow::{Context, Result};
use serde_json::Value;

/// Key extractors and equality policy for one record comparison.
pub struct MatchPlan {
    pub base_keys: RecordKeyExtractor,
    pub working_keys: RecordKeyExtractor,
    pub equality: Equality<Value, Value>,
}

impl MatchPlan {
    /// Build the plan, rejecting key or equality lists that cannot be paired.
    pub fn from_config(matching: &MatchingConfig) -> crate::error::Result<Self> {
        let base_keys = RecordKeyExtractor::from_paths(matching.base_keys())?;
        let working_keys = RecordKeyExtractor::from_paths(matching.working_keys())?;
        if base_keys.fields().len() != working_keys.fields().len() {
            return Err(CmpError::invalid_configuration(format!(
                "{} base key fields but {} working key fields",
                base_keys.fields().len(),
                working_keys.fields().len()
            )));
        }

        let equality = record_equality(
            &parse_paths(matching.equality_fields.as_slice())?,
            &parse_paths(matching.working_equality())?,
        )?;

        Ok(Self {
            base_keys,
            working_keys,
            equality,
        })
    }
}

/// Run the comparison described by `config` over already loaded records.
pub fn compute_diff<'a>(
    config: &DiffConfig,
    plan: &MatchPlan,
    base: &'a [Value],
    working: &'a [Value],
) -> Result<RecordDiff<'a>> {
    let quiet = config.behavior.quiet;
    let engine = DiffEngine::new().with_collision_policy(config.matching.collision_policy);

    if !quiet {
        tracing::info!(
            "Comparing by {} ({})",
            config.matching.base_keys().join(", "),
            plan.equality.strategy_name()
        );
    }

    let base_key = |record: &Value| plan.base_keys.key_of(record);
    let working_key = |record: &Value| plan.working_keys.key_of(record);
    let result = if config.matching.parallel {
        engine.diff_parallel(base, working, base_key, working_key, &plan.equality)
    } else {
        engine.diff(base, working, base_key, working_key, &plan.equality)
    }
    .context("Failed to compute diff")?;

    if !quiet {
        tracing::info!("Diff complete: {}", result.summary());
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, DiffPaths};
    use crate::partition::CollisionPolicy;
    use serde_json::json;

    fn config(app: AppConfig) -> DiffConfig {
        DiffConfig::from_app(
            DiffPaths {
                base: "base.json".into(),
                working: "working.json".into(),
            },
            app,
        )
    }

    #[test]
    fn test_plan_rejects_key_arity_mismatch() {
        let app = AppConfig::builder()
            .key_fields(["id"])
            .working_key_fields(["sku", "region"])
            .build();
        assert!(MatchPlan::from_config(&app.matching).is_err());
    }

    #[test]
    fn test_compute_diff_by_field() {
        let app = AppConfig::builder()
            .key_fields(["id"])
            .equality_fields(["price"])
            .quiet(true)
            .build();
        let config = config(app);
        let plan = MatchPlan::from_config(&config.matching).expect("valid plan");

        let base = vec![json!({"id": 1, "price": 5, "note": "a"})];
        let working = vec![json!({"id": 1, "price": 5, "note": "b"})];
        let result = compute_diff(&config, &plan, &base, &working).expect("diff");
        assert_eq!(result.unchanged().len(), 1);
    }

    #[test]
    fn test_compute_diff_fail_fast() {
        let app = AppConfig::builder()
            .key_fields(["id"])
            .collision_policy(CollisionPolicy::FailFast)
            .parallel(true)
            .quiet(true)
            .build();
        let config = config(app);
        let plan = MatchPlan::from_config(&config.matching).expect("valid plan");

        let base = vec![json!({"id": 1}), json!({"id": 1})];
        let err = compute_diff(&config, &plan, &base, &[]).expect_err("collision");
        assert!(format!("{err:#}").contains("same key"));
    }
}
