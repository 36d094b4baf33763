/// Parse a `PREFIX=DIR` alias argument.
///
/// The prefix must be non-empty; the directory may not be empty either.
pub fn parse_alias(s: &str) -> Result<(String, String), String> {
    let Some((prefix, dir)) = s.split_once('=') else {
        return Err(format!("Alias '{s}' must have the form PREFIX=DIR"));
    };

    if prefix.is_empty() {
        return Err("Alias prefix cannot be empty".to_string());
    }
    if dir.trim().is_empty() {
        return Err(format!("Alias '{prefix}' needs a target directory"));
    }

    Ok((prefix.to_string(), dir.to_string()))
}
