//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Variable named by a `${VAR}` reference that is not set.
struct UnsetVar(String);

fn lookup(name: &str) -> Result<Option<String>, UnsetVar> {
    std::env::var(name)
        .map(Some)
        .map_err(|_| UnsetVar(name.to_owned()))
}

/// Substitute `${VAR}` and `${VAR:-default}` in a config value.
///
/// `$VAR` without braces passes through unchanged. `field` is the dotted
/// config key, used in the error for an unset variable with no default.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    match shellexpand::env_with_context(value, lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(err) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.cause.0),
        }),
    }
}
