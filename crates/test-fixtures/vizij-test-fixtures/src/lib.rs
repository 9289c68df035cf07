//! Shared JSON fixtures for rig integration tests.
//!
//! Paths are listed in `fixtures/manifest.json` at the repository root and
//! resolved relative to it.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(rename = "rbf-setups")]
    rbf_setups: HashMap<String, String>,
    #[serde(rename = "ik-cases")]
    ik_cases: HashMap<String, IkCaseEntry>,
}

#[derive(Debug, Deserialize)]
struct IkCaseEntry {
    input: String,
    expected: String,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

fn sorted_keys<T>(map: &HashMap<String, T>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort();
    keys
}

/// Target sets with settings and expected query results.
pub mod rbf_setups {
    use super::*;

    pub fn keys() -> Vec<String> {
        sorted_keys(&MANIFEST.rbf_setups)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.rbf_setups, "rbf setup", name)?;
        super::load_json(rel)
    }
}

/// Two-bone IK inputs paired with expected joint positions.
pub mod ik_cases {
    use super::*;

    pub fn keys() -> Vec<String> {
        sorted_keys(&MANIFEST.ik_cases)
    }

    pub fn input<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.ik_cases, "ik case", name)?;
        super::load_json(&entry.input)
    }

    pub fn expected<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.ik_cases, "ik case", name)?;
        super::load_json(&entry.expected)
    }
}
