//! E2E tests driving the opsboard binary against fixture data files

use std::fs;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn revenue_overview_metrics() {
    let output = run(&["revenue", "-f", "tests/data/revenue.csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("REVENUE OVERVIEW"));
    assert!(stdout.contains("Total Revenue: $1,200.00"));
    assert!(stdout.contains("Total Customers: 3"));
    assert!(stdout.contains("Customers <= $200.00: 2"));
    assert!(stdout.contains("Customers >  $200.00: 1"));
    assert!(stdout.contains("Minimum Revenue: $100.00"));
    assert!(stdout.contains("8.33%"));
}

#[test]
fn revenue_csv_output() {
    let output = run(&["revenue", "-f", "tests/data/revenue.csv", "--csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("DATE,Customer,Amount"));
    assert!(stdout.contains("February,TCC,900$"));
}

#[test]
fn supply_monthly_dashboard() {
    let output = run(&["supply", "-f", "tests/data/supply_chain.csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("SUPPLY CHAIN MONTHLY DASHBOARD"));
    assert!(stdout.contains("Total Unique Job Orders: 3"));
    // two January rows, 15 and 10 days
    assert!(stdout.contains("12.5"));
    // the calendar is reindexed: months with no data still appear
    assert!(stdout.contains("January"));
    assert!(stdout.contains("December"));
    assert!(stdout.contains("no data"));
}

#[test]
fn sales_overview_totals() {
    let output = run(&["sales", "-f", "tests/data/sales.csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("SALES OVERVIEW"));
    assert!(stdout.contains("Total Sales Amount: $1,000.00"));
    assert!(stdout.contains("Orders: 2"));
}

#[test]
fn add_rejects_malformed_amount_without_touching_the_file() {
    let before = fs::read_to_string("tests/data/sales.csv").unwrap();

    let output = run(&[
        "add",
        "sales",
        "-j",
        "JO-9999",
        "-c",
        "Acme",
        "-a",
        "abc",
        "-f",
        "tests/data/sales.csv",
    ]);

    assert!(!output.status.success(), "Expected failure: {:?}", output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not parse amount"));

    let after = fs::read_to_string("tests/data/sales.csv").unwrap();
    assert_eq!(before, after, "validation failure must not modify the file");
}

#[test]
fn add_rejects_malformed_date_without_touching_the_file() {
    let before = fs::read_to_string("tests/data/supply_chain.csv").unwrap();

    let output = run(&[
        "add",
        "supply",
        "-j",
        "JO-9999",
        "-r",
        "01/13/2025", // month 13: invalid under the day-first convention
        "-o",
        "20/01/2025",
        "-f",
        "tests/data/supply_chain.csv",
    ]);

    assert!(!output.status.success(), "Expected failure: {:?}", output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not parse date"));

    let after = fs::read_to_string("tests/data/supply_chain.csv").unwrap();
    assert_eq!(before, after);
}

#[test]
fn add_appends_and_recomputes_the_summary() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("revenue.csv");
    fs::copy("tests/data/revenue.csv", &file).unwrap();
    let file = file.to_str().unwrap();

    let output = run(&[
        "add", "revenue", "-d", "March", "-c", "Acme", "-a", "250", "-f", file,
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Added revenue record for Acme"));
    // summary recomputed from the rewritten file
    assert!(stdout.contains("Total Revenue: $1,450.00"));

    let text = fs::read_to_string(file).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 5); // header + 3 fixture rows + 1 appended
    assert_eq!(lines.last().unwrap(), &"March,Acme,250.00$");
}

#[test]
fn missing_file_is_reported() {
    let output = run(&["revenue", "-f", "tests/data/does_not_exist.csv"]);

    assert!(!output.status.success(), "Expected failure: {:?}", output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no data file"));
}
