//! Loading [`ParseOptions`] from TOML and `key=value` pairs.
//!
//! Unknown keys and malformed values are rejected here, before any input
//! is matched.

use street_sweeper_models::ParseOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("option `{key}` expects a boolean, got `{value}`")]
    InvalidValue { key: String, value: String },

    #[error("malformed option `{0}`: expected key=value")]
    Malformed(String),

    #[error("invalid options file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Parses an options table such as:
///
/// ```toml
/// informal = true
/// avoid_redundant_street_type = false
/// ```
///
/// # Errors
///
/// * If the TOML is malformed or names an unknown option
pub fn from_toml_str(content: &str) -> Result<ParseOptions, OptionsError> {
    Ok(toml::de::from_str(content)?)
}

/// Splits `key=value`.
///
/// # Errors
///
/// * If there is no `=`
pub fn parse_pair(pair: &str) -> Result<(String, String), OptionsError> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| OptionsError::Malformed(pair.to_string()))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

/// Applies `key=value` overrides on top of `base`. Keys may use dashes
/// or underscores.
///
/// # Errors
///
/// * If a key is not a known option
/// * If a value is not a boolean
pub fn from_pairs<I, K, V>(base: ParseOptions, pairs: I) -> Result<ParseOptions, OptionsError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut options = base;
    for (key, value) in pairs {
        let (key, value) = (key.as_ref(), value.as_ref());
        let field = match key.replace('-', "_").as_str() {
            "informal" => &mut options.informal,
            "avoid_redundant_street_type" => &mut options.avoid_redundant_street_type,
            _ => return Err(OptionsError::UnknownOption(key.to_string())),
        };
        *field = parse_bool(key, value)?;
    }
    Ok(options)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, OptionsError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(OptionsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
