//! Integration tests for command mode (-c/--command flag)

use std::process::Command;

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_gridfill"))
        // Tests must not depend on a user's ~/.config/gridfill/config.toml.
        .arg("--config")
        .arg("/nonexistent/gridfill-test-config.toml")
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

#[test]
fn test_copy_fill_repeats_pattern() {
    let (stdout, _, code) = run_command(&["-c", "set A1 1; set B1 2; fill A1:B1 D1 copy; print A1:D1"]);
    assert_eq!(stdout, "1\t2\t1\t2\n");
    assert_eq!(code, 0);
}

#[test]
fn test_series_fill_down() {
    let (stdout, _, code) = run_command(&["-c", "set A1 3; set A2 5; fill A1:A2 A4 series; print A1:A4"]);
    assert_eq!(stdout, "3\n5\n6\n7\n");
    assert_eq!(code, 0);
}

#[test]
fn test_series_fill_right() {
    let (stdout, _, code) = run_command(&["-c", "set A1 1; set B1 2; set C1 3; fill A1:C1 E1 series; print D1:E1"]);
    assert_eq!(stdout, "4\t5\n");
    assert_eq!(code, 0);
}

#[test]
fn test_series_on_text_copies() {
    let (stdout, _, code) = run_command(&["-c", "set A1 x; fill A1 A3 series; print A1:A3"]);
    assert_eq!(stdout, "x\nx\nx\n");
    assert_eq!(code, 0);
}

#[test]
fn test_sum_is_a_snapshot() {
    let (stdout, _, code) = run_command(&["-c", "set A1 3; set A2 4; sum A3 A1 A2; set A1 100; print A3"]);
    assert_eq!(stdout.trim(), "7");
    assert_eq!(code, 0);
}

#[test]
fn test_typed_formula_is_evaluated() {
    let (stdout, _, code) = run_command(&["-c", "set A1 5; set B1 =SUM(A1,Z99); print B1"]);
    assert_eq!(stdout.trim(), "5");
    assert_eq!(code, 0);
}

#[test]
fn test_rows_flag_sets_initial_size() {
    let (stdout, _, code) = run_command(&["--rows", "10", "--cols", "4", "-c", "grow rows; size"]);
    assert_eq!(stdout.trim(), "11x4");
    assert_eq!(code, 0);
}

#[test]
fn test_fill_inside_selection_fails() {
    let (stdout, stderr, code) = run_command(&["-c", "set A1 1; fill A1 A1; print A1"]);
    assert!(stdout.is_empty());
    assert!(stderr.contains("error: Command 2"), "stderr: {}", stderr);
    assert_eq!(code, 1);
}

#[test]
fn test_write_beyond_limit_fails() {
    let (_, stderr, code) = run_command(&["-c", "set A1001 x"]);
    assert!(stderr.contains("Maximum number of rows (1000) reached"), "stderr: {}", stderr);
    assert_eq!(code, 1);
}

#[test]
fn test_unknown_option() {
    let (_, stderr, code) = run_command(&["--frobnicate"]);
    assert!(stderr.contains("Unknown option"));
    assert_eq!(code, 1);
}

#[test]
fn test_tall_selection_fills_right() {
    let (stdout, _, code) = run_command(&["-c", "set A1 x; set A2 y; fill A1:A2 B2; print B1:B2"]);
    assert_eq!(stdout, "x\ny\n");
    assert_eq!(code, 0);
}

#[test]
fn test_series_fill_up_counts_down_from_bottom() {
    let (stdout, _, code) = run_command(&["-c", "set A3 10; set A4 20; fill A3:A4 A1 series; print A1:A2"]);
    assert_eq!(stdout, "18\n19\n");
    assert_eq!(code, 0);
}
