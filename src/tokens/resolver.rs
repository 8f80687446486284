//! `var()` resolution
//!
//! Replaces `var(--name[, fallback])` references with the variable value, or
//! the inline fallback when the variable is not declared. Variable values are
//! expanded recursively.
//!
//! Expansion is bounded three ways:
//!
//! - nesting deeper than [`MAX_RESOLUTION_DEPTH`] leaves the reference as is,
//! - a variable already being expanded on the current path is left as is,
//!   which ends cycles like `--a: var(--b); --b: var(--a)`,
//! - output longer than [`MAX_RESOLVED_LEN`] aborts resolution.
//!
//! A reference left as is means the result may still contain `var(`.

use std::collections::BTreeMap;

use crate::tokens::values::{matching_paren_end, sanitize_value};
use crate::tokens::variables::VariableMap;

pub const MAX_RESOLUTION_DEPTH: usize = 10;
/// Ceiling on a resolved value, in bytes
pub const MAX_RESOLVED_LEN: usize = 64 * 1024;

const VAR_FUNCTION: &str = "var(";

/// Why an expansion produced no value
enum Unresolved {
    /// Referenced variable is not declared and has no fallback
    Missing,
    /// Output grew past [`MAX_RESOLVED_LEN`]
    TooLong,
}

/// Resolve a raw value against the variable map
///
/// Returns None when the value sanitizes to nothing, when a referenced
/// variable is missing and has no fallback, or when the result would exceed
/// [`MAX_RESOLVED_LEN`].
pub fn resolve_value(raw: &str, variables: &VariableMap) -> Option<String> {
    resolve_at_depth(raw, variables, 0)
}

/// Resolve starting at an explicit depth
pub fn resolve_at_depth(raw: &str, variables: &VariableMap, depth: usize) -> Option<String> {
    resolve_on_path(raw, variables, depth, Vec::new())
}

/// Resolve the value of a declared variable. References back to the variable
/// itself are left unresolved.
pub fn resolve_variable(name: &str, variables: &VariableMap) -> Option<String> {
    let (name, raw) = variables.get_key_value(name)?;
    resolve_on_path(raw, variables, 0, vec![name])
}

/// `path` holds the variables currently being expanded, borrowed from the map
fn resolve_on_path<'v>(
    raw: &str,
    variables: &'v VariableMap,
    depth: usize,
    mut path: Vec<&'v str>,
) -> Option<String> {
    let value = sanitize_value(raw)?;
    if !contains_var_reference(&value) {
        return Some(value);
    }

    let mut output = String::with_capacity(value.len());
    match expand(&value, variables, depth, &mut path, &mut output) {
        Ok(()) => sanitize_value(&output),
        Err(Unresolved::Missing) => None,
        Err(Unresolved::TooLong) => {
            log::debug!("Resolved value exceeds {} bytes, dropping it", MAX_RESOLVED_LEN);
            None
        }
    }
}

/// Whether a value still references a variable
pub fn contains_var_reference(value: &str) -> bool {
    value.contains(VAR_FUNCTION)
}

/// Whether the whole value is exactly one `var()` reference
pub fn is_single_var_reference(value: &str) -> bool {
    let value = value.trim();
    value.starts_with(VAR_FUNCTION) && matching_paren_end(value, VAR_FUNCTION.len() - 1) == Some(value.len())
}

fn push_bounded(output: &mut String, text: &str) -> Result<(), Unresolved> {
    if output.len() + text.len() > MAX_RESOLVED_LEN {
        return Err(Unresolved::TooLong);
    }
    output.push_str(text);
    Ok(())
}

/// Append `text` to `output` with every top level `var()` expanded
fn expand<'v>(
    text: &str,
    variables: &'v VariableMap,
    depth: usize,
    path: &mut Vec<&'v str>,
    output: &mut String,
) -> Result<(), Unresolved> {
    let mut rest = text;

    while let Some(start) = rest.find(VAR_FUNCTION) {
        let open = start + VAR_FUNCTION.len() - 1;
        let Some(end) = matching_paren_end(rest, open) else {
            // unbalanced reference, keep the remainder verbatim
            break;
        };

        push_bounded(output, &rest[..start])?;
        let reference = &rest[start..end];
        let arguments = &rest[open + 1..end - 1];
        expand_reference(reference, arguments, variables, depth, path, output)?;
        rest = &rest[end..];
    }

    push_bounded(output, rest)
}

fn expand_reference<'v>(
    reference: &str,
    arguments: &str,
    variables: &'v VariableMap,
    depth: usize,
    path: &mut Vec<&'v str>,
    output: &mut String,
) -> Result<(), Unresolved> {
    let (name, fallback) = match arguments.find(',') {
        Some(index) => (arguments[..index].trim(), Some(arguments[index + 1..].trim())),
        None => (arguments.trim(), None),
    };

    if depth >= MAX_RESOLUTION_DEPTH || path.iter().any(|seen| *seen == name) {
        return push_bounded(output, reference);
    }

    if let Some((key, value)) = variables.get_key_value(name) {
        path.push(key);
        let expanded = expand(value.trim(), variables, depth + 1, path, output);
        path.pop();
        return expanded;
    }

    match fallback {
        Some(fallback) if !fallback.is_empty() => expand(fallback, variables, depth + 1, path, output),
        _ => Err(Unresolved::Missing),
    }
}

/// Every declared variable resolved once, for the alias lanes.
///
/// Only variables that resolve to a value free of `var()` are kept.
#[derive(Debug, Clone, Default)]
pub struct ResolvedVariables {
    values: BTreeMap<String, String>,
}

impl ResolvedVariables {
    pub fn resolve(variables: &VariableMap) -> Self {
        let values = variables
            .iter()
            .filter_map(|(name, _)| {
                let resolved = resolve_variable(name, variables)?;
                (!contains_var_reference(&resolved)).then(|| (name.to_string(), resolved))
            })
            .collect();
        Self { values }
    }

    /// Resolved variables ordered by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
