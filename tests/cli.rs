//! End-to-end CLI tests
//!
//! Each test runs the binary against an isolated data directory supplied via
//! the OUTLAY_CLI_DATA_DIR environment variable, so tests never touch the
//! user's real configuration.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn outlay(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("outlay").unwrap();
    cmd.env("OUTLAY_CLI_DATA_DIR", dir.path());
    cmd
}

/// First token starting with `prefix` in the captured output
fn scrape_id(output: &[u8], prefix: &str) -> String {
    String::from_utf8_lossy(output)
        .split_whitespace()
        .find(|token| token.starts_with(prefix))
        .expect("expected an id in the output")
        .to_string()
}

#[test]
fn no_command_prints_hint() {
    let dir = TempDir::new().unwrap();

    outlay(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("outlay --help"));
}

#[test]
fn expense_add_and_list() {
    let dir = TempDir::new().unwrap();

    outlay(&dir)
        .args([
            "expense",
            "add",
            "Office rent",
            "1200.00",
            "--category",
            "Rent",
            "--date",
            "2025-03-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created expense:"))
        .stdout(predicate::str::contains("$1200.00"));

    outlay(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Office rent"))
        .stdout(predicate::str::contains("Showing 1 expense(s)"));
}

#[test]
fn expense_add_with_gst_prints_gst_line() {
    let dir = TempDir::new().unwrap();

    outlay(&dir)
        .args([
            "expense",
            "add",
            "New laptop",
            "2200.00",
            "--category",
            "Equipment",
            "--gst",
            "200.00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("GST:      $200.00"));
}

#[test]
fn expense_add_rejects_invalid_amount() {
    let dir = TempDir::new().unwrap();

    outlay(&dir)
        .args(["expense", "add", "Broken", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount format"));
}

#[test]
fn expense_add_rejects_invalid_date() {
    let dir = TempDir::new().unwrap();

    outlay(&dir)
        .args(["expense", "add", "Broken", "10.00", "--date", "2025-13-99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn expense_show_edit_delete_flow() {
    let dir = TempDir::new().unwrap();

    let added = outlay(&dir)
        .args(["expense", "add", "Internet", "89.00", "--category", "Utilities"])
        .assert()
        .success();
    let id = scrape_id(&added.get_output().stdout, "exp-");

    outlay(&dir)
        .args(["expense", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Internet"));

    outlay(&dir)
        .args(["expense", "edit", &id, "--amount", "95.00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated expense:"))
        .stdout(predicate::str::contains("$95.00"));

    // Without --force the record survives
    outlay(&dir)
        .args(["expense", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --force to confirm deletion"));

    outlay(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1 expense(s)"));

    outlay(&dir)
        .args(["expense", "delete", &id, "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted expense"));

    outlay(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));
}

#[test]
fn expense_paid_removes_from_unpaid_listing() {
    let dir = TempDir::new().unwrap();

    let added = outlay(&dir)
        .args(["expense", "add", "Water bill", "60.00", "--category", "Utilities"])
        .assert()
        .success();
    let id = scrape_id(&added.get_output().stdout, "exp-");

    outlay(&dir)
        .args(["expense", "mark-paid", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked expense as paid"));

    outlay(&dir)
        .args(["expense", "list", "--unpaid"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));
}

#[test]
fn expense_attach_and_detach() {
    let dir = TempDir::new().unwrap();
    let files = TempDir::new().unwrap();
    let receipt = files.path().join("receipt.pdf");
    std::fs::write(&receipt, vec![0u8; 1024]).unwrap();

    let added = outlay(&dir)
        .args(["expense", "add", "Printer", "350.00", "--category", "Equipment"])
        .assert()
        .success();
    let id = scrape_id(&added.get_output().stdout, "exp-");

    outlay(&dir)
        .args(["expense", "attach", &id, receipt.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Attached to expense"))
        .stdout(predicate::str::contains("receipt.pdf"));

    outlay(&dir)
        .args(["expense", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("receipt.pdf"));

    outlay(&dir)
        .args(["expense", "detach", &id, "receipt.pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed attachment"));
}

#[test]
fn funding_add_list_and_repaid() {
    let dir = TempDir::new().unwrap();

    let added = outlay(&dir)
        .args([
            "funding",
            "add",
            "Community Bank",
            "10000.00",
            "--date",
            "2025-03-01",
            "--repayable",
            "--repayment",
            "2025-12-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded funding:"))
        .stdout(predicate::str::contains("Repay by: 2025-12-01"));
    let id = scrape_id(&added.get_output().stdout, "fnd-");

    outlay(&dir)
        .args(["funding", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Community Bank"))
        .stdout(predicate::str::contains("Showing 1 funding record(s)"));

    outlay(&dir)
        .args(["funding", "mark-repaid", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked funding as repaid"));
}

#[test]
fn funding_repaid_rejects_non_repayable() {
    let dir = TempDir::new().unwrap();

    let added = outlay(&dir)
        .args(["funding", "add", "Council Grant", "5000.00"])
        .assert()
        .success();
    let id = scrape_id(&added.get_output().stdout, "fnd-");

    outlay(&dir)
        .args(["funding", "mark-repaid", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not repayable"));
}

#[test]
fn funding_outstanding_filter() {
    let dir = TempDir::new().unwrap();

    outlay(&dir)
        .args([
            "funding",
            "add",
            "Community Bank",
            "10000.00",
            "--repayable",
            "--repayment",
            "2030-01-01",
        ])
        .assert()
        .success();
    outlay(&dir)
        .args(["funding", "add", "Council Grant", "5000.00"])
        .assert()
        .success();

    outlay(&dir)
        .args(["funding", "list", "--outstanding"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Community Bank"))
        .stdout(predicate::str::contains("Showing 1 funding record(s)"));
}

#[test]
fn report_respects_custom_window() {
    let dir = TempDir::new().unwrap();

    outlay(&dir)
        .args([
            "expense", "add", "March rent", "1200.00", "--category", "Rent", "--date",
            "2025-03-10",
        ])
        .assert()
        .success();
    outlay(&dir)
        .args([
            "expense", "add", "April rent", "1200.00", "--category", "Rent", "--date",
            "2025-04-10",
        ])
        .assert()
        .success();

    outlay(&dir)
        .args(["report", "summary", "--start", "2025-03-01", "--end", "2025-03-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Financial Summary: 2025-03-01 to 2025-03-31",
        ))
        .stdout(predicate::str::contains("Total Expenses:   1"));
}

#[test]
fn report_rejects_unknown_period() {
    let dir = TempDir::new().unwrap();

    outlay(&dir)
        .args(["report", "summary", "--period", "fortnightly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid period"));
}

#[test]
fn gst_report_counts_current_month_expense() {
    let dir = TempDir::new().unwrap();

    // Default date is today, so the expense lands in the current month
    outlay(&dir)
        .args([
            "expense",
            "add",
            "New laptop",
            "2200.00",
            "--category",
            "Equipment",
            "--gst",
            "200.00",
        ])
        .assert()
        .success();

    outlay(&dir)
        .args(["report", "gst"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GST Summary"))
        .stdout(predicate::str::contains("Monthly GST Breakdown"))
        .stdout(predicate::str::contains("$200.00"))
        .stdout(predicate::str::contains("1 expense(s)"));
}

#[test]
fn gst_report_rejects_zero_months() {
    let dir = TempDir::new().unwrap();

    outlay(&dir)
        .args(["report", "gst", "--months", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Months must be at least 1"));
}

#[test]
fn dashboard_runs_on_empty_data() {
    let dir = TempDir::new().unwrap();

    outlay(&dir)
        .args(["dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dashboard"))
        .stdout(predicate::str::contains("No expenses yet."));
}

#[test]
fn reminders_report_empty_and_overdue() {
    let dir = TempDir::new().unwrap();

    outlay(&dir)
        .args(["reminders"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing due"));

    outlay(&dir)
        .args([
            "expense",
            "add",
            "Old phone bill",
            "45.00",
            "--category",
            "Utilities",
            "--recurring",
            "--due",
            "2020-01-01",
        ])
        .assert()
        .success();

    outlay(&dir)
        .args(["reminders"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OVERDUE (1)"))
        .stdout(predicate::str::contains("Old phone bill"));
}

#[test]
fn config_set_and_show() {
    let dir = TempDir::new().unwrap();

    outlay(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OutlayCLI Configuration"))
        .stdout(predicate::str::contains("default_period:  monthly"));

    outlay(&dir)
        .args(["config", "set", "default_period", "weekly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set default_period = weekly"));

    outlay(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_period:  weekly"));

    outlay(&dir)
        .args(["config", "set", "default_period", "fortnightly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid period"));

    outlay(&dir)
        .args(["config", "set", "favourite_colour", "teal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn config_currency_symbol_flows_into_output() {
    let dir = TempDir::new().unwrap();

    outlay(&dir)
        .args(["config", "set", "currency_symbol", "€"])
        .assert()
        .success();

    outlay(&dir)
        .args(["expense", "add", "Coffee beans", "4.50", "--category", "Office Supplies"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€4.50"));
}

#[test]
fn config_rejects_bad_date_format_string() {
    let dir = TempDir::new().unwrap();

    outlay(&dir)
        .args(["config", "set", "date_format", "%Q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format string"));
}

#[test]
fn report_output_writes_xlsx_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("march.xlsx");

    outlay(&dir)
        .args([
            "expense", "add", "March rent", "1200.00", "--category", "Rent", "--date",
            "2025-03-10",
        ])
        .assert()
        .success();

    outlay(&dir)
        .args([
            "report",
            "summary",
            "--start",
            "2025-03-01",
            "--end",
            "2025-03-31",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Financial report exported to:"));

    assert!(out.exists());
}

#[test]
fn export_xlsx_roundtrip() {
    use calamine::{open_workbook, Data, Reader, Xlsx};

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("report.xlsx");

    outlay(&dir)
        .args([
            "expense", "add", "Office rent", "1200.00", "--category", "Rent", "--date",
            "2025-03-10",
        ])
        .assert()
        .success();
    outlay(&dir)
        .args([
            "funding",
            "add",
            "Community Bank",
            "10000.00",
            "--date",
            "2025-02-01",
            "--repayable",
            "--repayment",
            "2025-12-01",
        ])
        .assert()
        .success();

    outlay(&dir)
        .args([
            "export",
            "xlsx",
            "--start",
            "2025-01-01",
            "--end",
            "2025-12-31",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Exported 1 expense(s) and 1 funding record(s)",
        ));

    let mut workbook: Xlsx<_> = open_workbook(&out).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec![
            "Summary".to_string(),
            "Expenses".to_string(),
            "Funding".to_string(),
        ]
    );

    let summary = workbook.worksheet_range("Summary").unwrap();
    assert_eq!(
        summary.get_value((0, 0)),
        Some(&Data::String("Outlay - Financial Report".to_string()))
    );
    // Metric table: count of expenses, then money totals in currency units
    assert_eq!(summary.get_value((7, 1)), Some(&Data::Float(1.0)));
    assert_eq!(summary.get_value((8, 1)), Some(&Data::Float(1200.0)));

    let expenses = workbook.worksheet_range("Expenses").unwrap();
    assert_eq!(
        expenses.get_value((1, 1)),
        Some(&Data::String("Office rent".to_string()))
    );
}

#[test]
fn export_xlsx_uses_dated_default_filename() {
    let dir = TempDir::new().unwrap();

    outlay(&dir)
        .current_dir(dir.path())
        .args(["export", "xlsx", "--period", "monthly"])
        .assert()
        .success();

    let exported = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .any(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            name.starts_with("outlay-financial-report-monthly-") && name.ends_with(".xlsx")
        });
    assert!(exported);
}
