use std::env::var;

/// Get the value of an ENV var, or compute a default
///
/// The default is used when the var is not set, or set to an empty string
pub fn env_var_or<F>(var_name: &str, or_else: F) -> String
where
    F: FnOnce() -> String,
{
    match var(var_name) {
        Ok(value) if !value.is_empty() => value,
        _ => or_else(),
    }
}
