use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Matches `{{ env.VAR }}` and `{{ env.VAR | default("fallback") }}`
fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

/// Expand `{{ env.VAR }}` placeholders in raw config text
///
/// A `default("...")` filter supplies the value when the variable is unset.
/// Comment lines are copied through untouched, so commented-out secrets
/// never have to exist in the environment.
pub fn expand_env(input: &str) -> Result<String, String> {
    input
        .split('\n')
        .map(|line| {
            if line.trim_start().starts_with('#') {
                Ok(line.to_owned())
            } else {
                expand_line(line)
            }
        })
        .collect::<Result<Vec<_>, _>>()
        .map(|lines| lines.join("\n"))
}

fn expand_line(line: &str) -> Result<String, String> {
    let mut failure = None;

    let expanded = placeholder().replace_all(line, |captures: &Captures<'_>| {
        match resolve(&captures[1], captures.get(2).map(|m| m.as_str())) {
            Ok(value) => value,
            Err(e) => {
                failure.get_or_insert(e);
                String::new()
            }
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(expanded.into_owned()),
    }
}

fn resolve(key: &str, default: Option<&str>) -> Result<String, String> {
    let Some(var_name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    match (std::env::var(var_name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => Err(format!("environment variable not found: `{var_name}`")),
    }
}
