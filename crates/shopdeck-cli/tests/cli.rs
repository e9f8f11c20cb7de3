#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use shopdeck::model::{EntityKind, EntityRecord};
use shopdeck::store::fs::FileStore;
use shopdeck::store::memory::fixtures;
use shopdeck::store::DataStore;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn seeded() -> Self {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("data"));
        for record in fixtures::customers() {
            store.save(EntityKind::Customer, &record).unwrap();
        }
        for record in fixtures::orders() {
            store.save(EntityKind::Order, &record).unwrap();
        }
        Self { dir }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("shopdeck"));
        cmd.env_remove("RUST_LOG")
            .env_remove("SHOPDECK_DATA_DIR")
            .env("SHOPDECK_THEME", "light")
            .arg("--data-dir")
            .arg(self.dir.path().join("data"))
            .arg("--config")
            .arg(self.dir.path().join("shopdeck.toml"));
        cmd
    }

    fn records(&self, kind: EntityKind) -> Vec<EntityRecord> {
        FileStore::new(self.dir.path().join("data"))
            .list(kind)
            .unwrap()
            .records
    }
}

#[test]
fn search_finds_john_only() {
    let ws = Workspace::seeded();
    ws.cmd()
        .args(["list", "customers", "--search", "john"])
        .assert()
        .success()
        .stdout(predicate::str::contains("John Doe"))
        .stdout(predicate::str::contains("Jane Smith").not());
}

#[test]
fn status_filter_finds_active_customer() {
    let ws = Workspace::seeded();
    ws.cmd()
        .args(["list", "customers", "--filter", "status=active"])
        .assert()
        .success()
        .stdout(predicate::str::contains("c1"))
        .stdout(predicate::str::contains("Jane Smith").not());
}

#[test]
fn no_match_prints_no_results_message() {
    let ws = Workspace::seeded();
    ws.cmd()
        .args(["list", "customers", "--search", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No customers match the current filters",
        ))
        .stdout(predicate::str::contains("John Doe").not());
}

#[test]
fn empty_kind_says_none_yet() {
    let ws = Workspace::seeded();
    ws.cmd()
        .args(["list", "vendors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No vendors yet"));
}

#[test]
fn date_range_and_sort() {
    let ws = Workspace::seeded();
    let output = ws
        .cmd()
        .args([
            "--json",
            "list",
            "orders",
            "--from",
            "2024-05-02",
            "--sort",
            "amount:desc",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = value["listed"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["o2", "o3"]);
}

#[test]
fn stats_sum_full_list_by_default() {
    let ws = Workspace::seeded();
    ws.cmd()
        .args(["stats", "orders", "--metric", "amount", "-f", "priority=high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("245.50"))
        .stdout(predicate::str::contains("priority: low 1"));
}

#[test]
fn stats_filtered_scope() {
    let ws = Workspace::seeded();
    ws.cmd()
        .args([
            "stats",
            "orders",
            "--metric",
            "amount",
            "--filtered",
            "-f",
            "priority=high",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("125.50"))
        .stdout(predicate::str::contains("62.75"));
}

#[test]
fn rating_renders_whole_stars() {
    let ws = Workspace::seeded();
    ws.cmd()
        .args(["rating", "5.7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("★★★★★"));
    ws.cmd()
        .args(["rating", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("☆☆☆☆☆"));
}

#[test]
fn add_then_delete_round_trip() {
    let ws = Workspace::seeded();
    ws.cmd()
        .args([
            "add",
            "customers",
            "--id",
            "c3",
            "--field",
            "name=Ada Lovelace",
            "--category",
            "status=active",
            "--metric",
            "total_spent=99.5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added customer Ada Lovelace"));
    assert_eq!(ws.records(EntityKind::Customer).len(), 3);

    ws.cmd()
        .args(["delete", "customers", "c3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted customer Ada Lovelace"));
    assert_eq!(ws.records(EntityKind::Customer).len(), 2);
}

#[test]
fn add_with_unknown_category_warns() {
    let ws = Workspace::seeded();
    ws.cmd()
        .args(["add", "customers", "--field", "name=Mystery", "--category", "status=archived"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown value 'archived' for status"));
}

#[test]
fn failed_delete_is_reported() {
    let ws = Workspace::seeded();
    ws.cmd()
        .args(["delete", "customers", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: Could not delete nope: No customer found with id nope",
        ));
    assert_eq!(ws.records(EntityKind::Customer).len(), 2);
}

#[test]
fn export_json_lines() {
    let ws = Workspace::seeded();
    let output = ws
        .cmd()
        .args(["export", "orders", "--format", "jsonl", "--search", "john"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 2);
}

#[test]
fn unknown_kind_fails() {
    let ws = Workspace::seeded();
    ws.cmd()
        .args(["list", "widgets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Unknown entity kind 'widgets'"));
}

#[test]
fn infinite_metric_is_rejected_and_list_still_loads() {
    let ws = Workspace::seeded();
    ws.cmd()
        .args(["add", "orders", "--id", "o9", "--metric", "amount=inf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("finite number"));
    assert_eq!(ws.records(EntityKind::Order).len(), 3);
    ws.cmd()
        .args(["list", "orders"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ORD-1003"));
}

#[test]
fn category_names_are_localized() {
    let ws = Workspace::seeded();
    ws.cmd()
        .args(["category", "electronics", "--locale", "es-MX"])
        .assert()
        .success()
        .stdout("Electrónica\n");
    ws.cmd()
        .args(["category", "mystery-box", "--locale", "fr"])
        .assert()
        .success()
        .stdout("mystery-box\n");
}

#[test]
fn theme_comes_from_config_and_toggles() {
    let ws = Workspace::seeded();
    ws.cmd()
        .args(["theme"])
        .assert()
        .success()
        .stdout("light\n");
    ws.cmd()
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout("dark\n");
}
