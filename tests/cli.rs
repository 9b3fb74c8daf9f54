//! End-to-end tests against the compiled binary: exit status, stdout and
//! stderr contracts.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run_binary(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_asn-zone"))
        .args(args)
        .env_remove("CONFIG_PATH")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn asn-zone");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    child.wait_with_output().unwrap()
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr_lines(output: &Output) -> Vec<String> {
    String::from_utf8(output.stderr.clone())
        .unwrap()
        .lines()
        .map(|line| line.to_string())
        .collect()
}

#[test]
fn test_convert_success() {
    let output = run_binary(&[], "176.97.158.0/24 1921\n2001:db8::/33 64500\n\n");

    assert!(output.status.success());
    assert!(stderr_lines(&output).is_empty());

    let stdout = stdout_of(&output);
    assert_eq!(stdout.lines().count(), 8 + 1 + 9);
    assert!(stdout.contains("IPV4\t176.97.158.0/24:127.0.0.2:1921 | 176.97.158.0/24 | NA | NA | NA\n"));
    assert!(stdout.contains("IPV6\t:64500 | 2001:db8::/33 | NA | NA | NA\n"));
    assert!(stdout.contains("IPV6\t*.7.8.b.d.0.1.0.0.2\n"));
    assert!(!stdout.contains("IPV6\t*.8.8.b.d.0.1.0.0.2\n"));
}

#[test]
fn test_explicit_convert_subcommand() {
    let output = run_binary(&["convert"], "10.0.0.0/8 64500\n");

    assert!(output.status.success());
    assert!(stdout_of(&output).ends_with("IPV4\t10.0.0.0/8:127.0.0.2:64500 | 10.0.0.0/8 | NA | NA | NA\n"));
}

#[test]
fn test_invalid_prefix_fails_without_output() {
    let output = run_binary(&[], "176.97.158.0/24 1921\n10.0.0.0/33 64500\n");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = stderr_lines(&output);
    assert_eq!(stderr.len(), 1);
    assert!(stderr[0].contains("line 2"));
    assert!(stderr[0].contains("/33"));
}

#[test]
fn test_malformed_line_fails() {
    let output = run_binary(&[], "this is not a prefix\n");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = stderr_lines(&output);
    assert_eq!(stderr.len(), 1);
    assert!(stderr[0].contains("line 1"));
    assert!(stderr[0].contains("malformed"));
}

#[test]
fn test_integrity_failure() {
    let output = run_binary(&[], "2001:db8:9000::/33 64500\n");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(stderr_lines(&output).len(), 1);
}

#[test]
fn test_single_warning_for_ignored_prefixes() {
    let output = run_binary(
        &[],
        "192.0.2.0/25 64500\n192.0.2.128/25 64500\n2001:db8::/96 64500\n192.0.2.0/24 64500\n",
    );

    assert!(output.status.success());

    let stderr = stderr_lines(&output);
    assert_eq!(stderr.len(), 1);
    assert!(stderr[0].contains("Ignored 2 IPv4 prefixes longer than /24 and 1 IPv6 prefixes longer than /64"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let output = run_binary(&["--config", "does-not-exist.json"], "10.0.0.0/8 64500\n");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_config_that_would_hide_the_summary_is_rejected() {
    let path = std::env::temp_dir().join(format!("asn-zone-quiet-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "log_level": "error" }"#).unwrap();

    let output = run_binary(&["--config", path.to_str().unwrap()], "192.0.2.0/25 64500\n");
    std::fs::remove_file(&path).unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = stderr_lines(&output);
    assert_eq!(stderr.len(), 1);
    assert!(stderr[0].contains("log_level"));
}

#[test]
fn test_convert_then_split() {
    let converted = run_binary(&[], "176.97.158.0/24 1921\n2001:db8::/32 64500\n");
    assert!(converted.status.success());

    let dir = std::env::temp_dir().join(format!("asn-zone-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let ipv4_path = dir.join("origin.zone");
    let ipv6_path = dir.join("origin6.zone");

    let split = run_binary(
        &["split", "--ipv4", ipv4_path.to_str().unwrap(), "--ipv6", ipv6_path.to_str().unwrap()],
        &stdout_of(&converted),
    );
    assert!(split.status.success());

    let ipv4 = std::fs::read_to_string(&ipv4_path).unwrap();
    let ipv6 = std::fs::read_to_string(&ipv6_path).unwrap();

    assert!(ipv4.ends_with("176.97.158.0/24:127.0.0.2:1921 | 176.97.158.0/24 | NA | NA | NA\n"));
    assert!(ipv6.starts_with(";\n$DATASET dnset @\n"));
    assert!(ipv6.ends_with(":64500 | 2001:db8::/32 | NA | NA | NA\n*.8.b.d.0.1.0.0.2\n"));
    assert!(!ipv4.contains("IPV4\t"));

    std::fs::remove_dir_all(dir).unwrap();
}
