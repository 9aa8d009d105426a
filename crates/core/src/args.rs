// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flag-list builders for wrapped command-line tools.
//!
//! The wrapped tools follow fixed conventions: `--name value`, `--name=value`,
//! bare `--name` for booleans, repeated flags for lists, and comma-joined
//! `k=v` pairs for maps. Each builder returns the tokens to splice into an
//! argv; absent values produce no tokens at all.

use std::fmt::Display;
use std::path::Path;

/// `--name` when enabled, nothing otherwise.
pub fn flag(name: &str, enabled: bool) -> Vec<String> {
    if enabled {
        vec![format!("--{name}")]
    } else {
        Vec::new()
    }
}

/// `--name value`, or nothing when the value is absent.
pub fn opt<T: Display>(name: &str, value: Option<T>) -> Vec<String> {
    match value {
        Some(v) => vec![format!("--{name}"), v.to_string()],
        None => Vec::new(),
    }
}

/// `--name=value`, or nothing when the value is absent.
pub fn opt_eq<T: Display>(name: &str, value: Option<T>) -> Vec<String> {
    match value {
        Some(v) => vec![format!("--{name}={v}")],
        None => Vec::new(),
    }
}

/// `--name <path>`, or nothing when the path is absent.
pub fn opt_path(name: &str, value: Option<&Path>) -> Vec<String> {
    opt(name, value.map(|p| p.display().to_string()))
}

/// `--name v` once per value, preserving order.
pub fn repeated<T: Display>(name: &str, values: &[T]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| [format!("--{name}"), v.to_string()])
        .collect()
}

/// `--name=k1=v1,k2=v2`, or nothing for an empty map.
pub fn key_values(name: &str, pairs: &[(String, String)]) -> Vec<String> {
    if pairs.is_empty() {
        return Vec::new();
    }
    let joined = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(",");
    vec![format!("--{name}={joined}")]
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
