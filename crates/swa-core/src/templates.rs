//! Placeholder substitution for notification templates

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(\w+)\}").unwrap());

/// Substitute `{key}` placeholders in `template` from a flat value map.
///
/// Unknown placeholders are replaced with the empty string; each distinct
/// missing key is reported exactly once through `on_missing_key`. This is a
/// generic substitution primitive, independent of the summary renderer.
pub fn fill_template(
    template: &str,
    values: &HashMap<&str, String>,
    mut on_missing_key: impl FnMut(&str),
) -> String {
    let mut reported: HashSet<String> = HashSet::new();
    PLACEHOLDER
        .replace_all(template, |captures: &regex::Captures<'_>| {
            let key = &captures[1];
            match values.get(key) {
                Some(value) => value.clone(),
                None => {
                    if reported.insert(key.to_string()) {
                        on_missing_key(key);
                    }
                    String::new()
                }
            }
        })
        .into_owned()
}
