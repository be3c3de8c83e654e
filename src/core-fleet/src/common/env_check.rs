/// Returns the trimmed value of the environment variable if it is set and not blank.
/// An empty or whitespace-only value is treated the same as an unset variable.
pub fn env_value(env_var: &str) -> Option<String> {
    non_blank(std::env::var(env_var).ok())
}

/// Normalizes an optional string: `None` and blank strings both become `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
