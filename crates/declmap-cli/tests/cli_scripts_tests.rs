// Runs the built `declmap` binary and checks each walkthrough's output

use std::process::{Command, Output};

const ED: &str = "<User(name='ed', fullname='Ed Jones', nickname='edsnickname')>";
const BOB: &str = "<User(name='Bob', fullname='Ed Jones', nickname='edsnickname')>";

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_declmap"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run declmap")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_getting_started_prints_representations() {
    let output = run(&["getting-started"]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(
        lines,
        vec![
            "<User(name='None', fullname='None', nickname='None')>".to_string(),
            ED.to_string(),
            format!("{} id=1", ED),
        ]
    );
}

#[test]
fn test_mutation_prints_rename_and_json() {
    let output = run(&["mutation"]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], ED);
    assert_eq!(lines[1], BOB);
    assert_eq!(
        lines[2],
        r#"{"fullname":"Ed Jones","id":1,"name":"Bob","nickname":"edsnickname"}"#
    );
}

#[test]
fn test_no_serialization_exits_non_zero() {
    let output = run(&["no-serialization"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));

    let lines = stdout_lines(&output);
    assert_eq!(lines, vec![ED.to_string(), BOB.to_string()]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: "));
    assert!(stderr.contains("Object of type User is not JSON serializable"));
}

#[test]
fn test_getting_started_echoes_sql_by_default() {
    let output = run(&["getting-started"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("CREATE TABLE users"));
    assert!(stderr.contains("INSERT INTO users"));

    // Echo never reaches stdout
    assert!(!String::from_utf8_lossy(&output.stdout).contains("CREATE TABLE"));
}

#[test]
fn test_mutation_quiet_unless_echo_requested() {
    let quiet = run(&["mutation"]);
    assert!(quiet.status.success());
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("CREATE TABLE"));

    let echoed = run(&["--echo", "mutation"]);
    assert!(echoed.status.success());
    let stderr = String::from_utf8_lossy(&echoed.stderr);
    assert!(stderr.contains("CREATE TABLE users"));
    assert!(stderr.contains("INSERT INTO users"));
}

#[test]
fn test_subcommands_take_no_arguments() {
    let output = run(&["mutation", "extra"]);
    assert!(!output.status.success());
}
