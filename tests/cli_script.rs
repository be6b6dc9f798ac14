use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

#[test]
fn script_mode_records_and_reports_transactions() {
    let home = TempDir::new().unwrap();
    let input = "add 2024-03-01 Income Salary 52000\n\
                 add 2024-03-05 Food Groceries -1200\n\
                 add 2024-03-06 Transport Bus -300\n\
                 dashboard\n\
                 quit\n";

    let mut cmd = Command::cargo_bin("finsight").unwrap();
    cmd.env("FINSIGHT_HOME", home.path())
        .env("FINSIGHT_CLI_SCRIPT", "1")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("50500"));

    let csv = std::fs::read_to_string(home.path().join("transactions.csv")).unwrap();
    assert!(csv.starts_with("date,category,description,amount"));
    assert!(csv.contains("2024-03-05,Food,Groceries,-1200"));
}

#[test]
fn script_mode_deletes_by_row_number() {
    let home = TempDir::new().unwrap();
    let input = "add 2024-03-01 Income Salary 52000\n\
                 add 2024-03-05 Food Groceries -1200\n\
                 delete 2\n\
                 list\n\
                 quit\n";

    let mut cmd = Command::cargo_bin("finsight").unwrap();
    cmd.env("FINSIGHT_HOME", home.path())
        .env("FINSIGHT_CLI_SCRIPT", "1")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Deleted"));

    let csv = std::fs::read_to_string(home.path().join("transactions.csv")).unwrap();
    assert!(!csv.contains("Groceries"));
    assert!(csv.contains("Salary"));
}

#[test]
fn script_mode_reports_unknown_commands_with_a_suggestion() {
    let home = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("finsight").unwrap();
    cmd.env("FINSIGHT_HOME", home.path())
        .env("FINSIGHT_CLI_SCRIPT", "1")
        .write_stdin("lst\nquit\n")
        .assert()
        .success()
        .stdout(contains("Did you mean `list`?"));
}
