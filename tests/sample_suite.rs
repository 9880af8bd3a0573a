//! Golden tests for the bundled sample suite
//!
//! Review changes: `cargo insta review`

use duck_test::{ReportFormat, RunConfig, Runner, sample};

fn run_sample(config: RunConfig) -> (duck_test::Report, String) {
    let mut ledger = sample::ledger();
    let mut out = Vec::new();
    let report = Runner::new(config.with_quiet_panics(true))
        .run_script(&mut ledger, &sample::namespace(), &mut out)
        .expect("report write failed");
    (report, String::from_utf8(out).expect("utf-8 report"))
}

#[test]
fn test_sample_console_report() {
    let (_, text) = run_sample(RunConfig::new().with_color(false));
    insta::assert_snapshot!(text, @r###"
    Testing caller
    Testing test_empty
    Testing test_bare
    Testing test_small
    Testing test_deeper
    Testing test_sapling
    ** 5 successes
    ** 0 failures
    ** 1 other errors
    test_sapling
    Thoroughness: Found test cases for ["Branch", "Leaf", "Empty", "Sapling"]
    Missing: ["Tree", "nonsense"]
    "###);
}

#[test]
fn test_sample_outcomes() {
    let (report, _) = run_sample(RunConfig::new().with_color(false));
    assert_eq!(report.total, 6);
    assert_eq!(
        report.successes,
        ["caller", "test_empty", "test_bare", "test_small", "test_deeper"]
    );
    assert!(report.failures.is_empty());
    assert_eq!(report.error_names(), ["test_sapling"]);
    assert!(
        report.errors[0]
            .cause
            .ends_with("No implementation of count in Sapling")
    );
}

#[test]
fn test_sample_claim_counts() {
    let ledger = sample::ledger();
    assert_eq!(ledger.coverage_count("Branch"), 2);
    assert_eq!(ledger.coverage_count("Leaf"), 2);
    assert_eq!(ledger.coverage_count("Empty"), 1);
    assert_eq!(ledger.coverage_count("Tree"), 0);
    assert_eq!(ledger.uncovered(&sample::namespace()), ["Tree", "nonsense"]);
}

#[test]
fn test_sample_json_report() {
    let (_, text) = run_sample(RunConfig::new().with_format(ReportFormat::Json));
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");

    let outcomes: Vec<_> = value["tests"]
        .as_array()
        .expect("tests array")
        .iter()
        .map(|t| t["outcome"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(outcomes, ["success", "success", "success", "success", "success", "error"]);
    assert_eq!(value["summary"]["errors"], 1);
    assert_eq!(value["coverage"]["namespace"], "duck_test::sample::subject");
    assert_eq!(value["coverage"]["uncovered"], serde_json::json!(["Tree", "nonsense"]));
}
