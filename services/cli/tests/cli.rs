//! End-to-end runs of the `captable` binary against a scratch state file

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn captable(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_captable"))
        .current_dir(dir)
        .arg("--state")
        .arg(dir.join("state.json"))
        .args(args)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run captable")
}

fn decimal(value: &serde_json::Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = tempdir().unwrap();

    assert!(captable(dir.path(), &["init"]).status.success());
    assert!(dir.path().join("state.json").exists());

    assert!(!captable(dir.path(), &["init"]).status.success());
    assert!(captable(dir.path(), &["init", "--force"]).status.success());
}

#[test]
fn test_rounds_dilute_founders() {
    let dir = tempdir().unwrap();
    captable(dir.path(), &["init"]);

    let added = captable(dir.path(), &["add-round"]);
    assert!(added.status.success());
    assert!(stdout(&added).contains("Pre-Seed"));

    let added = captable(dir.path(), &["add-round", "--preset", "series-a"]);
    assert!(stdout(&added).contains("Series A"));

    let table = stdout(&captable(dir.path(), &["table"]));
    assert!(table.contains("Initial"));
    assert!(table.contains("Lead Investor"));
    assert!(table.contains("Option Pool"));
    assert!(table.contains("Total invested"));
}

#[test]
fn test_unknown_preset_fails() {
    let dir = tempdir().unwrap();
    let output = captable(dir.path(), &["add-round", "--preset", "series-z"]);
    assert!(!output.status.success());
}

#[test]
fn test_exit_applies_deductions_and_persists() {
    let dir = tempdir().unwrap();
    captable(dir.path(), &["init"]);

    let output = captable(
        dir.path(),
        &[
            "exit",
            "--valuation",
            "20000000",
            "--escrow",
            "20",
            "--carveout",
            "1000000",
        ],
    );
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("$15.00M"));
    assert!(text.contains("$7.50M"));

    let saved = std::fs::read_to_string(dir.path().join("state.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(decimal(&saved["exitOptions"]["acquisition"]["escrowPercent"]), dec!(20));
    assert_eq!(decimal(&saved["exitValuation"]), dec!(20_000_000));
}

#[test]
fn test_exit_json_output() {
    let dir = tempdir().unwrap();
    captable(dir.path(), &["init"]);

    let output = captable(dir.path(), &["exit", "--ipo", "--underwriter-fees", "7", "--json"]);
    assert!(output.status.success());

    let analysis: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(decimal(&analysis["proceeds"]["underwriterFees"]), dec!(7_000_000));
    assert_eq!(analysis["payouts"].as_array().unwrap().len(), 2);
}

fn saved(dir: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(dir.join("state.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_founder_edits_persist() {
    let dir = tempdir().unwrap();
    captable(dir.path(), &["init"]);

    let added = captable(dir.path(), &["founder", "add", "--name", "Grace", "--percentage", "10"]);
    assert!(added.status.success());
    assert!(stdout(&added).contains("Grace (#3)"));

    assert!(captable(dir.path(), &["founder", "set", "1", "--percentage", "45"]).status.success());
    assert!(captable(dir.path(), &["founder", "move", "3", "1"]).status.success());
    assert!(captable(dir.path(), &["founder", "remove", "2"]).status.success());

    let state = saved(dir.path());
    let founders = state["founders"].as_array().unwrap();
    assert_eq!(founders.len(), 2);
    assert_eq!(founders[0]["name"], "Grace");
    assert_eq!(decimal(&founders[1]["percentage"]), dec!(45));

    let listing = stdout(&captable(dir.path(), &["founder", "list"]));
    assert!(listing.starts_with(" 1. #3"));

    assert!(!captable(dir.path(), &["founder", "remove", "2"]).status.success());
}

#[test]
fn test_pool_warns_when_allocation_is_off() {
    let dir = tempdir().unwrap();
    captable(dir.path(), &["init"]);

    let output = captable(dir.path(), &["pool", "10"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("warning:"));
    assert_eq!(decimal(&saved(dir.path())["initialOptionPool"]), dec!(10));
}

#[test]
fn test_round_and_investor_edits() {
    let dir = tempdir().unwrap();
    captable(dir.path(), &["init"]);
    captable(dir.path(), &["add-round", "--preset", "seed"]);

    assert!(captable(dir.path(), &["round", "apply-preset", "1", "series-a"]).status.success());
    assert!(captable(dir.path(), &["round", "set", "1", "--name", "A-1"]).status.success());

    let added = captable(
        dir.path(),
        &["investor", "add", "1", "--name", "Angel", "--amount", "250000"],
    );
    assert!(added.status.success());
    assert!(stdout(&added).contains("Angel (#2)"));

    assert!(captable(
        dir.path(),
        &["investor", "set", "1", "1", "--preference", "2", "--participating", "true"],
    )
    .status
    .success());

    let state = saved(dir.path());
    let round = &state["fundingRounds"][0];
    assert_eq!(round["name"], "A-1");
    assert_eq!(decimal(&round["preMoneyValuation"]), dec!(40_000_000));
    assert_eq!(decimal(&round["investors"][0]["liquidationPreference"]), dec!(2));
    assert_eq!(round["investors"][0]["participating"], true);
    assert_eq!(decimal(&round["investors"][1]["amount"]), dec!(250_000));

    let listing = stdout(&captable(dir.path(), &["round", "list"]));
    assert!(listing.contains("2x participating"));

    assert!(captable(dir.path(), &["investor", "remove", "1", "2"]).status.success());
    assert!(!captable(dir.path(), &["investor", "remove", "1", "2"]).status.success());
    assert!(captable(dir.path(), &["round", "remove", "1"]).status.success());
    assert!(saved(dir.path())["fundingRounds"].as_array().unwrap().is_empty());
}

#[test]
fn test_glossary_by_category_and_term() {
    let dir = tempdir().unwrap();

    let output = captable(dir.path(), &["glossary", "--category", "valuation"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("Valuation Terms"));
    assert!(text.contains("Pre-Money Valuation"));
    assert!(!text.contains("Term Sheet"));

    let text = stdout(&captable(dir.path(), &["glossary", "waterfall"]));
    assert!(text.contains("Exit Waterfall"));

    assert!(!captable(dir.path(), &["glossary", "unobtainium"]).status.success());
}
