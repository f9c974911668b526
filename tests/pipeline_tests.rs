//! Pipeline and CLI integration tests.
//!
//! These tests exercise the load → diff → report pipeline, error handling
//! paths, and CLI command handlers with real fixture files.

use collection_cmp::cli::{run_check_keys, run_diff};
use collection_cmp::config::{AppConfig, CheckKeysConfig, DiffConfig, DiffPaths, ExplicitChoices};
use collection_cmp::pipeline::{compute_diff, exit_codes, load_records_with_context, MatchPlan};
use collection_cmp::records::load_records;
use collection_cmp::reports::ReportFormat;
use collection_cmp::{ChangeKind, CmpError, CollisionPolicy};
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn inventory_paths(working: &str) -> DiffPaths {
    DiffPaths {
        base: fixture_path("inventory/base.json"),
        working: fixture_path(working),
    }
}

// ============================================================================
// Records loading
// ============================================================================

mod load_stage {
    use super::*;

    #[test]
    fn load_inventory_fixture() {
        let records = load_records(&fixture_path("inventory/base.json")).expect("valid fixture");
        assert_eq!(records.len(), 3);
        assert_eq!(records[1]["name"], "nut");
    }

    #[test]
    fn not_an_array_is_rejected() {
        let err = load_records(&fixture_path("invalid/not_array.json")).expect_err("object");
        assert!(matches!(err, CmpError::Records { .. }));
        assert!(err.to_string().contains("Failed to read records"));
    }

    #[test]
    fn scalar_entry_is_rejected() {
        let err =
            load_records(&fixture_path("invalid/scalar_entry.json")).expect_err("scalar entry");
        let source = std::error::Error::source(&err).expect("kind").to_string();
        assert!(source.contains("index 1"), "{source}");
    }

    #[test]
    fn truncated_json_is_rejected() {
        assert!(load_records(&fixture_path("invalid/truncated.json")).is_err());
    }

    #[test]
    fn missing_file_error_names_path() {
        let path = fixture_path("inventory/missing.json");
        let err = load_records_with_context(&path, true).expect_err("missing");
        assert!(format!("{err:#}").contains("missing.json"));
    }
}

// ============================================================================
// Diff stage
// ============================================================================

mod diff_stage {
    use super::*;

    /// Rendered keys of the removed, added, updated and unchanged groups.
    type Groups = [Vec<String>; 4];

    fn run(app: AppConfig, working: &str) -> Groups {
        let config = DiffConfig::from_app(inventory_paths(working), app);
        let plan = MatchPlan::from_config(&config.matching).expect("valid plan");
        let base = load_records_with_context(&config.paths.base, true).expect("base");
        let working = load_records_with_context(&config.paths.working, true).expect("working");
        let result = compute_diff(&config, &plan, &base, &working).expect("diff");

        ChangeKind::ALL.map(|kind| {
            result
                .group(kind)
                .iter()
                .map(|pair| pair.key().to_string())
                .collect()
        })
    }

    #[test]
    fn price_equality_classifies_inventory() {
        let app = AppConfig::builder()
            .key_fields(["id"])
            .equality_fields(["price"])
            .quiet(true)
            .build();
        let [removed, added, updated, unchanged] = run(app, "inventory/working.json");

        assert_eq!(removed, vec!["\"1\""]);
        assert_eq!(added, vec!["\"4\""]);
        assert_eq!(updated, vec!["\"2\""]);
        // Stock changed for "3" but only price is compared.
        assert_eq!(unchanged, vec!["\"3\""]);
    }

    #[test]
    fn whole_record_equality_sees_stock_change() {
        let app = AppConfig::builder().key_fields(["id"]).quiet(true).build();
        let [_, _, updated, unchanged] = run(app, "inventory/working.json");

        assert_eq!(updated, vec!["\"2\"", "\"3\""]);
        assert!(unchanged.is_empty());
    }

    #[test]
    fn cross_schema_keys_and_fields() {
        let app = AppConfig::builder()
            .key_fields(["id"])
            .working_key_fields(["sku.code"])
            .equality_fields(["price"])
            .working_equality_fields(["cost"])
            .parallel(true)
            .quiet(true)
            .build();
        let [removed, added, updated, unchanged] = run(app, "inventory/feed.json");

        assert_eq!(removed, vec!["\"1\""]);
        assert_eq!(added, vec!["\"4\""]);
        assert_eq!(updated, vec!["\"2\""]);
        assert_eq!(unchanged, vec!["\"3\""]);
    }

    #[test]
    fn duplicates_follow_collision_policy() {
        let first_wins = AppConfig::builder()
            .key_fields(["id"])
            .equality_fields(["price"])
            .quiet(true)
            .build();
        let [removed, added, _, unchanged] = run(first_wins, "inventory/duplicates.json");
        assert_eq!(removed, vec!["\"3\""]);
        assert!(added.is_empty());
        assert_eq!(unchanged, vec!["\"1\"", "\"2\""]);

        let fail_fast = AppConfig::builder()
            .key_fields(["id"])
            .collision_policy(CollisionPolicy::FailFast)
            .quiet(true)
            .build();
        let config = DiffConfig::from_app(inventory_paths("inventory/duplicates.json"), fail_fast);
        let plan = MatchPlan::from_config(&config.matching).expect("valid plan");
        let base = load_records(&config.paths.base).expect("base");
        let working = load_records(&config.paths.working).expect("working");
        assert!(compute_diff(&config, &plan, &base, &working).is_err());
    }
}

// ============================================================================
// CLI handlers
// ============================================================================

mod cli_handlers {
    use super::*;

    #[test]
    fn run_diff_writes_json_report() {
        let dir = tempfile::tempdir().expect("temp dir");
        let out = dir.path().join("diff.json");
        let app = AppConfig::builder()
            .key_fields(["id"])
            .equality_fields(["price"])
            .output_format(ReportFormat::Json)
            .output_file(Some(out.clone()))
            .include_unchanged(true)
            .quiet(true)
            .build();

        let code = run_diff(DiffConfig::from_app(
            inventory_paths("inventory/working.json"),
            app,
        ))
        .expect("diff runs");
        assert_eq!(code, exit_codes::SUCCESS);

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).expect("report")).expect("json");
        assert_eq!(report["summary"]["changes"], 3);
        assert_eq!(report["summary"]["different"], 2);
        assert_eq!(report["entries"].as_array().map(Vec::len), Some(4));
        assert_eq!(report["entries"][0]["kind"], "removed");
        assert_eq!(report["entries"][0]["base"]["name"], "bolt");
    }

    #[test]
    fn run_diff_fail_on_change_exit_code() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = AppConfig::builder()
            .key_fields(["id"])
            .output_file(Some(dir.path().join("out.txt")))
            .fail_on_change(true)
            .quiet(true)
            .build();

        let code = run_diff(DiffConfig::from_app(
            inventory_paths("inventory/working.json"),
            app,
        ))
        .expect("diff runs");
        assert_eq!(code, exit_codes::CHANGES_DETECTED);
    }

    #[test]
    fn run_diff_identical_documents() {
        let dir = tempfile::tempdir().expect("temp dir");
        let out = dir.path().join("out.txt");
        let app = AppConfig::builder()
            .key_fields(["id"])
            .output_file(Some(out.clone()))
            .fail_on_change(true)
            .quiet(true)
            .build();
        let paths = DiffPaths {
            base: fixture_path("inventory/base.json"),
            working: fixture_path("inventory/base.json"),
        };

        let code = run_diff(DiffConfig::from_app(paths, app)).expect("diff runs");
        assert_eq!(code, exit_codes::SUCCESS);
        let report = std::fs::read_to_string(out).expect("report");
        assert!(report.contains("No changes"), "{report}");
    }

    #[test]
    fn run_diff_rejects_mismatched_equality_fields() {
        let app = AppConfig::builder()
            .key_fields(["id"])
            .equality_fields(["price", "stock"])
            .working_equality_fields(["cost"])
            .quiet(true)
            .build();

        let err = run_diff(DiffConfig::from_app(
            inventory_paths("inventory/working.json"),
            app,
        ))
        .expect_err("arity mismatch");
        assert!(format!("{err:#}").contains("working_equality_fields"));
    }

    #[test]
    fn run_diff_with_config_file() {
        let (app, loaded_from) = AppConfig::from_file_with_overrides(
            Some(&fixture_path("config.yaml")),
            &AppConfig::builder().quiet(true).build(),
        );
        assert!(loaded_from.is_some());
        assert_eq!(app.output.format, ReportFormat::Json);

        let dir = tempfile::tempdir().expect("temp dir");
        let mut config = DiffConfig::from_app(inventory_paths("inventory/working.json"), app);
        config.output.file = Some(dir.path().join("out.json"));

        let code = run_diff(config).expect("diff runs");
        assert_eq!(code, exit_codes::CHANGES_DETECTED);
    }

    #[test]
    fn explicit_cli_choices_override_config_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config_path = dir.path().join("strict.yaml");
        std::fs::write(
            &config_path,
            "matching:\n  key_fields: [id]\n  collision_policy: fail-fast\n\
             output:\n  format: json\n",
        )
        .expect("write config");
        let out = dir.path().join("out.txt");
        let load = || {
            let cli = AppConfig::builder()
                .output_file(Some(out.clone()))
                .quiet(true)
                .build();
            let (app, _) = AppConfig::from_file_with_overrides(Some(&config_path), &cli);
            app
        };

        let strict = DiffConfig::from_app(inventory_paths("inventory/duplicates.json"), load());
        assert!(run_diff(strict).is_err());

        let mut app = load();
        app.apply_choices(&ExplicitChoices {
            collision_policy: Some(CollisionPolicy::FirstWins),
            format: Some(ReportFormat::Summary),
        });
        let config = DiffConfig::from_app(inventory_paths("inventory/duplicates.json"), app);
        assert_eq!(run_diff(config).expect("first wins"), exit_codes::SUCCESS);

        let report = std::fs::read_to_string(&out).expect("report");
        assert!(report.starts_with("Collection Diff Summary"), "{report}");
    }

    #[test]
    fn check_keys_reports_collisions() {
        let check = |keys: &[&str]| {
            run_check_keys(CheckKeysConfig {
                path: fixture_path("inventory/duplicates.json"),
                key_fields: keys.iter().map(ToString::to_string).collect(),
                quiet: true,
            })
            .expect("check runs")
        };

        assert_eq!(check(&["id"]), exit_codes::CHANGES_DETECTED);
        assert_eq!(check(&["id", "region"]), exit_codes::SUCCESS);
    }
}
