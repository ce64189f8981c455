/// Parse and validate the application base URL.
///
/// The verifier only talks plain HTTP(S) to a local server, so anything
/// else is rejected at parse time. A trailing slash is removed.
///
/// # Examples
///
/// Valid: `http://localhost:3000`, `https://127.0.0.1:8443/`
/// Invalid: `localhost:3000`, `ftp://host`, `""`
///
/// # Errors
///
/// Returns an error message if the URL is empty or not http(s).
pub fn parse_base_url(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Base URL cannot be empty".to_string());
    }

    let Some(rest) = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
    else {
        return Err(format!(
            "Base URL must start with http:// or https://: '{trimmed}'"
        ));
    };

    if rest.trim_end_matches('/').is_empty() {
        return Err(format!("Base URL has no host: '{trimmed}'"));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Parse a timeout in milliseconds. Zero would make every wait fail
/// immediately, so it is rejected.
///
/// # Errors
///
/// Returns an error message if the value is not a positive integer.
pub fn parse_timeout_ms(s: &str) -> Result<u64, String> {
    let value: u64 = s
        .parse()
        .map_err(|_| format!("Timeout must be a whole number of milliseconds: '{s}'"))?;
    if value == 0 {
        return Err("Timeout must be greater than zero".to_string());
    }
    Ok(value)
}
