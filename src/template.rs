//! `{{name}}` placeholder extraction and substitution.
//!
//! Both functions are total: malformed or unknown placeholders are left in
//! the text untouched.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `{{`, then the shortest run of characters up to the next `}}`.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(.+?)\}\}").expect("placeholder pattern is valid"));

/// Distinct variable names in first-occurrence order.
///
/// Whitespace around a name is ignored, so `{{ host }}` and `{{host}}` name
/// the same variable. Placeholders whose name is blank are not variables.
pub fn extract_variables(command: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut vars = Vec::new();

    for caps in PLACEHOLDER.captures_iter(command) {
        let name = caps[1].trim();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.to_string()) {
            vars.push(name.to_string());
        }
    }

    vars
}

/// Replace every placeholder that has a value; leave the rest verbatim.
pub fn substitute(command: &str, values: &HashMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(command, |caps: &Captures| {
            match values.get(caps[1].trim()) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
