/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 6/10/26
******************************************************************************/
use crate::error::AppError;
use std::collections::HashMap;
use std::env;
use std::fmt::Debug;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, error};

/// Gets an environment variable or returns a default value if not found or cannot be parsed
///
/// # Arguments
///
/// * `env_var` - The name of the environment variable
/// * `default` - The default value to use if the environment variable is not found or cannot be parsed
pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match get_env_or_none::<T>(env_var) {
        Some(val) => val,
        None => default,
    }
}

/// Gets an environment variable and parses it, returning None if not found or invalid
///
/// Empty values count as missing.
pub fn get_env_or_none<T: FromStr>(env_var: &str) -> Option<T>
where
    <T as FromStr>::Err: Debug,
{
    let raw = non_empty(env::var(env_var).ok())?;
    match raw.parse::<T>() {
        Ok(val) => Some(val),
        Err(e) => {
            error!("Failed to parse {}: {} ({:?}), ignoring", env_var, raw, e);
            None
        }
    }
}

/// Trims a value and drops it when nothing is left
#[must_use]
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads a `key=value` credentials file without touching the process environment
///
/// Keys are lower-cased. A file that does not exist yields an empty map; a file
/// that exists but cannot be parsed is an error.
pub fn read_key_values(path: &Path) -> Result<HashMap<String, String>, AppError> {
    if !path.is_file() {
        debug!("Credentials file {} not present", path.display());
        return Ok(HashMap::new());
    }

    let mut values = HashMap::new();
    for item in dotenv::from_path_iter(path)? {
        let (key, value) = item?;
        values.insert(key.trim().to_lowercase(), value);
    }
    debug!(
        "Read {} entries from credentials file {}",
        values.len(),
        path.display()
    );
    Ok(values)
}
