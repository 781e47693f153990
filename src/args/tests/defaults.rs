use super::*;

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = parse_test_args(["apiping", "-i", "openapi.json"])?;

    let expected_no_color = std::env::var("NO_COLOR")
        .ok()
        .and_then(|value| parse_bool_env(&value).ok())
        .unwrap_or(false);

    let checks = [
        (
            args.input.as_deref() == Some("openapi.json"),
            "Unexpected input",
        ),
        (args.base.is_none(), "Expected base to be None"),
        (
            matches!(args.output, OutputFormat::Console),
            "Expected OutputFormat::Console",
        ),
        (args.out_dir == ".", "Unexpected out_dir"),
        (args.headers.0.is_empty(), "Expected no custom headers"),
        (args.workers.get() == 1, "Unexpected workers"),
        (args.timeout_secs.get() == 5, "Unexpected timeout"),
        (args.rounds.get() == 1, "Unexpected rounds"),
        (!args.capture_response, "Expected capture_response to be false"),
        (
            args.methods.0 == vec!["GET".to_owned(), "POST".to_owned()],
            "Unexpected default methods",
        ),
        (args.filter.is_none(), "Expected filter to be None"),
        (args.threshold.is_none(), "Expected threshold to be None"),
        (!args.verbose, "Expected verbose to be false"),
        (args.no_color == expected_no_color, "Unexpected no_color"),
        (!args.no_progress, "Expected no_progress to be false"),
        (args.config.is_none(), "Expected config to be None"),
    ];

    for (ok, message) in checks {
        if !ok {
            return Err(AppError::validation(message));
        }
    }
    Ok(())
}

#[test]
fn default_headers_carry_user_agent() -> AppResult<()> {
    let headers = default_headers();
    if headers.get("User-Agent").map(String::as_str) != Some(DEFAULT_USER_AGENT) {
        return Err(AppError::validation("Expected default User-Agent"));
    }
    if headers.get("Accept").map(String::as_str) != Some("*/*") {
        return Err(AppError::validation("Expected default Accept header"));
    }
    if headers.len() != 4 {
        return Err(AppError::validation(format!(
            "Expected 4 default headers, got {}",
            headers.len()
        )));
    }
    Ok(())
}
