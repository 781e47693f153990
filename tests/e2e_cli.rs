mod support;

use std::fs;

use serde_json::Value;
use tempfile::tempdir;

use support::{run_apiping, sample_document, spawn_http_server_or_skip};

fn read_json(path: &std::path::Path) -> Result<Value, String> {
    let content = fs::read_to_string(path).map_err(|err| format!("read report failed: {}", err))?;
    serde_json::from_str(&content).map_err(|err| format!("parse report failed: {}", err))
}

fn array_len(entry: &Value, field: &str) -> usize {
    entry
        .get(field)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

#[test]
fn e2e_json_report_over_rounds() -> Result<(), String> {
    let Some((base, _server)) = spawn_http_server_or_skip(|_| sample_document(&[]))? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let spec_path = dir.path().join("openapi.json");
    fs::write(&spec_path, sample_document(&[]))
        .map_err(|err| format!("write spec failed: {}", err))?;
    let out_dir = dir.path().join("out");

    let args = vec![
        "-i".to_owned(),
        spec_path.to_string_lossy().into_owned(),
        "-b".to_owned(),
        base,
        "-o".to_owned(),
        "json".to_owned(),
        "--out-dir".to_owned(),
        out_dir.to_string_lossy().into_owned(),
        "-l".to_owned(),
        "3".to_owned(),
        "-w".to_owned(),
        "5".to_owned(),
        "-r".to_owned(),
        "--no-progress".to_owned(),
        "-m".to_owned(),
        r#"["get", "post", "delete"]"#.to_owned(),
    ];
    let output = run_apiping(args)?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let report = read_json(&out_dir.join("apiping.json"))?;
    let object = report
        .as_object()
        .ok_or_else(|| format!("report is not an object: {}", report))?;
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    if keys != ["DELETE /health", "GET /health", "GET /items/{id}"] {
        return Err(format!("Unexpected routes: {:?}", keys));
    }

    let health = report
        .get("GET /health")
        .ok_or_else(|| "missing GET /health".to_owned())?;
    if array_len(health, "urls") != 1 || array_len(health, "responses") != 1 {
        return Err(format!("plain route sampled more than once: {}", health));
    }
    let response = health
        .get("responses")
        .and_then(|responses| responses.get(0))
        .and_then(Value::as_str);
    if response != Some("GET /health ok ") {
        return Err(format!("Unexpected response: {:?}", response));
    }

    let items = report
        .get("GET /items/{id}")
        .ok_or_else(|| "missing GET /items/{id}".to_owned())?;
    if array_len(items, "urls") != 3 {
        return Err(format!("templated route should keep one url per round: {}", items));
    }
    Ok(())
}

#[test]
fn e2e_loads_description_from_url_and_single_server() -> Result<(), String> {
    let Some((base, _server)) = spawn_http_server_or_skip(|base| sample_document(&[base]))? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let args = vec![
        "-i".to_owned(),
        format!("{}/openapi.json", base),
        "-o".to_owned(),
        "csv".to_owned(),
        "--out-dir".to_owned(),
        dir.path().to_string_lossy().into_owned(),
        "--no-progress".to_owned(),
    ];
    let output = run_apiping(args)?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let csv = fs::read_to_string(dir.path().join("apiping.csv"))
        .map_err(|err| format!("read csv failed: {}", err))?;
    if !csv.contains(&format!("{}/health", base)) || csv.contains("DELETE") {
        return Err(format!("Unexpected csv:\n{}", csv));
    }
    if !csv.lines().any(|line| line.ends_with(",-")) {
        return Err(format!("Uncaptured responses should be '-':\n{}", csv));
    }
    Ok(())
}

#[test]
fn e2e_console_table_from_config_file() -> Result<(), String> {
    let Some((base, _server)) = spawn_http_server_or_skip(|_| sample_document(&[]))? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let spec_path = dir.path().join("openapi.json");
    fs::write(&spec_path, sample_document(&[]))
        .map_err(|err| format!("write spec failed: {}", err))?;
    let config_path = dir.path().join("apiping.toml");
    let config = format!(
        "input = {:?}\nbase = {:?}\nout = \"console\"\nloop = 2\nno_progress = true\n",
        spec_path.to_string_lossy(),
        base
    );
    fs::write(&config_path, config).map_err(|err| format!("write config failed: {}", err))?;

    let args = vec![
        "--config".to_owned(),
        config_path.to_string_lossy().into_owned(),
        "-f".to_owned(),
        "^/health".to_owned(),
    ];
    let output = run_apiping(args)?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let checks = [
        (stdout.contains("| # |"), "table header"),
        (stdout.contains("/health"), "health route"),
        (!stdout.contains("/items/"), "filtered route"),
        (stdout.contains("1 routes x 2 rounds"), "footer"),
    ];
    for (ok, what) in checks {
        if !ok {
            return Err(format!("Missing {} in:\n{}", what, stdout));
        }
    }
    Ok(())
}

#[test]
fn e2e_sends_default_and_custom_headers() -> Result<(), String> {
    let Some((base, _server)) = spawn_http_server_or_skip(|_| sample_document(&[]))? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let spec_path = dir.path().join("openapi.json");
    fs::write(&spec_path, sample_document(&[]))
        .map_err(|err| format!("write spec failed: {}", err))?;

    let cases = [
        (
            r#"{"X-Probe": "1"}"#,
            ["x-probe=1", "user-agent=apiping/", "accept=*/*"],
        ),
        (
            r#"{"X-Probe": "2", "user-agent": "custom-agent/9"}"#,
            ["x-probe=2", "user-agent=custom-agent/9 ", "accept=*/*"],
        ),
    ];
    for (index, (headers, expected)) in cases.into_iter().enumerate() {
        let out_dir = dir.path().join(format!("out-{}", index));
        let args = vec![
            "-i".to_owned(),
            spec_path.to_string_lossy().into_owned(),
            "-b".to_owned(),
            base.clone(),
            "-o".to_owned(),
            "json".to_owned(),
            "--out-dir".to_owned(),
            out_dir.to_string_lossy().into_owned(),
            "-f".to_owned(),
            "^/health$".to_owned(),
            "-r".to_owned(),
            "--no-progress".to_owned(),
            "--header".to_owned(),
            headers.to_owned(),
        ];
        let output = run_apiping(args)?;
        if !output.status.success() {
            return Err(format!(
                "stdout: {}\nstderr: {}",
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            ));
        }

        let report = read_json(&out_dir.join("apiping.json"))?;
        let response = report
            .get("GET /health")
            .and_then(|entry| entry.get("responses"))
            .and_then(|responses| responses.get(0))
            .and_then(Value::as_str)
            .ok_or_else(|| format!("missing GET /health response: {}", report))?;
        if let Some(missing) = expected.iter().find(|needle| !response.contains(*needle)) {
            return Err(format!(
                "headers {} did not reach the server as {}: {}",
                headers, missing, response
            ));
        }
    }
    Ok(())
}

#[test]
fn e2e_rejects_malformed_headers() -> Result<(), String> {
    let output = run_apiping(["-i", "missing.json", "-b", "http://127.0.0.1:1", "--header", "{oops"])?;
    if output.status.success() {
        return Err("malformed header JSON should fail".to_owned());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("Invalid header JSON") {
        return Err(format!("Unexpected stderr: {}", stderr));
    }
    Ok(())
}

#[test]
fn e2e_rejects_unsupported_version() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let spec_path = dir.path().join("old.json");
    fs::write(&spec_path, r#"{"swagger": "1.2", "apis": []}"#)
        .map_err(|err| format!("write spec failed: {}", err))?;

    let args = vec![
        "-i".to_owned(),
        spec_path.to_string_lossy().into_owned(),
        "-b".to_owned(),
        "http://127.0.0.1:1".to_owned(),
    ];
    let output = run_apiping(args)?;
    if output.status.success() {
        return Err("swagger 1.2 should be rejected".to_owned());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("UnsupportedVersion") {
        return Err(format!("Unexpected stderr: {}", stderr));
    }
    Ok(())
}
