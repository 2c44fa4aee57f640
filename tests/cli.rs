use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pocketbook(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pocketbook").unwrap();
    cmd.env("POCKETBOOK_DATA_DIR", dir.path())
        .env_remove("POCKETBOOK_LOG");
    cmd
}

fn add_expense(dir: &TempDir, amount: &str, category: &str, date: &str) {
    pocketbook(dir)
        .args(["expense", "add", amount, category, "--date", date])
        .assert()
        .success();
}

#[test]
fn init_creates_record_files() {
    let dir = TempDir::new().unwrap();

    pocketbook(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("expenses.json").exists());
}

#[test]
fn expense_add_then_list() {
    let dir = TempDir::new().unwrap();

    pocketbook(&dir)
        .args([
            "expense", "add", "42.50", "Food", "--date", "2024-03-10", "-n", "Groceries",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded $42.50 for Food"));

    pocketbook(&dir)
        .args(["expense", "list", "--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("42.50"));
}

#[test]
fn invalid_amount_is_rejected() {
    let dir = TempDir::new().unwrap();

    pocketbook(&dir)
        .args(["expense", "add", "twelve", "Food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid money format"));
}

#[test]
fn shared_balances_after_dinner() {
    let dir = TempDir::new().unwrap();

    pocketbook(&dir)
        .args([
            "shared", "add", "Dinner", "120", "--paid-by", "Alice", "--with", "Bob, Carol",
            "--date", "2024-03-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 shares of $40.00"));

    pocketbook(&dir)
        .args(["shared", "balances", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice is owed $120.00"))
        .stdout(predicate::str::contains("Bob owes $40.00"))
        .stdout(predicate::str::contains("Carol owes $40.00"));
}

#[test]
fn budget_alert_when_limit_exceeded() {
    let dir = TempDir::new().unwrap();
    add_expense(&dir, "90", "Food", "2024-03-10");
    add_expense(&dir, "30", "Food", "2024-03-12");
    add_expense(&dir, "10", "Transport", "2024-03-12");

    pocketbook(&dir)
        .args(["budget", "set", "Food", "100"])
        .assert()
        .success();
    pocketbook(&dir)
        .args(["budget", "set", "Transport", "50"])
        .assert()
        .success();

    pocketbook(&dir)
        .args(["budget", "alerts", "--period", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("$20.00"))
        .stdout(predicate::str::contains("Transport").not());
}

#[test]
fn dashboard_for_past_year() {
    let dir = TempDir::new().unwrap();
    add_expense(&dir, "90", "Food", "2024-03-10");
    add_expense(&dir, "40", "Rent", "2024-05-01");

    pocketbook(&dir)
        .args(["report", "dashboard", "--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dashboard: 2024 (Full Year)"))
        .stdout(predicate::str::contains("Highest Month (March)"))
        .stdout(predicate::str::contains("Top Category (Food)"))
        .stdout(predicate::str::contains("$130.00"));
}

#[test]
fn dashboard_csv_export() {
    let dir = TempDir::new().unwrap();
    add_expense(&dir, "90", "Food", "2024-03-10");
    let out = dir.path().join("dashboard.csv");

    pocketbook(&dir)
        .args(["report", "dashboard", "--year", "2024", "--output"])
        .arg(&out)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&out).unwrap();
    assert!(contents.starts_with("Section,Label,Amount"));
    assert!(contents.contains("March,90.00"));
}

/// Pull the short record id printed in parentheses at the end of an add command
fn recorded_id(output: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(output);
    let start = stdout.rfind('(').unwrap() + 1;
    let end = stdout.rfind(')').unwrap();
    stdout[start..end].to_string()
}

#[test]
fn deleted_and_settled_records_leave_reports() {
    let dir = TempDir::new().unwrap();

    let food = pocketbook(&dir)
        .args(["expense", "add", "90", "Food", "--date", "2024-03-10"])
        .assert()
        .success();
    let food_id = recorded_id(&food.get_output().stdout);
    add_expense(&dir, "40", "Rent", "2024-05-01");

    let dinner = pocketbook(&dir)
        .args([
            "shared", "add", "Dinner", "120", "--paid-by", "Alice", "--with", "Bob, Carol",
            "--date", "2024-03-01",
        ])
        .assert()
        .success();
    let dinner_id = recorded_id(&dinner.get_output().stdout);
    pocketbook(&dir)
        .args([
            "shared", "add", "Taxi", "30", "--paid-by", "Bob", "--with", "Alice", "--date",
            "2024-03-02",
        ])
        .assert()
        .success();

    pocketbook(&dir)
        .args(["expense", "delete", &food_id])
        .assert()
        .success();
    pocketbook(&dir)
        .args(["shared", "settle", &dinner_id, "--date", "2024-04-01"])
        .assert()
        .success();

    pocketbook(&dir)
        .args(["report", "dashboard", "--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Top Category (Rent)"))
        .stdout(predicate::str::contains("Highest Month (May)"))
        .stdout(predicate::str::contains("$40.00"))
        .stdout(predicate::str::contains("Food").not())
        .stdout(predicate::str::contains("$130.00").not());

    pocketbook(&dir)
        .args(["shared", "balances", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bob is owed $30.00"))
        .stdout(predicate::str::contains("Alice owes $15.00"))
        .stdout(predicate::str::contains("Carol").not())
        .stdout(predicate::str::contains("$120.00").not());

    // Repeating either action is rejected
    pocketbook(&dir)
        .args(["expense", "delete", &food_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
    pocketbook(&dir)
        .args(["shared", "settle", &dinner_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}
