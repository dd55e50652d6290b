use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::tempdir;

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.env_remove("TA_PLANNER_CONFIG")
        .write_stdin(script.to_string())
        .assert()
}

#[test]
fn cli_calc_prints_booking_deadline_and_table() {
    run_cli("calc 2026-09-14 CHINA VIETNAM\nquit\n")
        .success()
        .stdout(str_contains("Final booking deadline:"))
        .stdout(str_contains("Fabric/Sewing: CHINA / VIETNAM"))
        .stdout(str_contains("Fabric Booking"))
        .stdout(str_contains("2026-09-14"))
        .stdout(str_contains("WARNING: Holidays pushed the schedule back"));
}

#[test]
fn cli_calc_uses_defaults_without_arguments() {
    run_cli("calc\nquit\n")
        .success()
        .stdout(str_contains("Fabric/Sewing: CHINA / VIETNAM"))
        .stdout(str_contains("Target date"));
}

#[test]
fn cli_rejects_early_in_store_date() {
    run_cli("calc 2024-06-01 CHINA VIETNAM\nquit\n")
        .success()
        .stdout(str_contains("before the earliest supported date 2025-01-01"));
}

#[test]
fn cli_rejects_unknown_country() {
    run_cli("calc 2026-09-14 CHINA THAILAND\nquit\n")
        .success()
        .stdout(str_contains("unsupported country 'THAILAND'"));
}

#[test]
fn cli_export_requires_a_schedule() {
    run_cli("export\nquit\n")
        .success()
        .stdout(str_contains("No schedule yet."));
}

#[test]
fn cli_export_writes_csv_into_directory() {
    let dir = tempdir().expect("create temp dir");
    let script = format!(
        "calc 2026-09-14 VN KH\nexport {}\nquit\n",
        dir.path().display()
    );
    run_cli(&script)
        .success()
        .stdout(str_contains("Schedule exported to"));
    let path = dir.path().join("TA_Schedule_2026-09-14.csv");
    let bytes = std::fs::read(&path).expect("exported file");
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
}

#[test]
fn cli_lists_holidays_and_countries() {
    run_cli("countries\nholidays VN 2026\nquit\n")
        .success()
        .stdout(str_contains("Fabric origins : CHINA, VIETNAM, INDONESIA"))
        .stdout(str_contains("Sewing origins : VIETNAM, CAMBODIA, INDONESIA"))
        .stdout(str_contains("for VIETNAM (buffers included)"))
        .stdout(str_contains("09-02"));
}

#[test]
fn cli_compare_lists_all_pairs() {
    run_cli("compare 2026-09-14\nquit\n")
        .success()
        .stdout(str_contains("Sourcing options for in-store 2026-09-14"))
        .stdout(str_contains("INDONESIA  -> CAMBODIA"));
}

#[test]
fn cli_unknown_command_hints_help() {
    run_cli("frobnicate\nhelp\nquit\n")
        .success()
        .stdout(str_contains("Unknown command. Type 'help'."))
        .stdout(str_contains("leadtimes"));
}
