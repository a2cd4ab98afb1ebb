//! Loading collaborator inputs from disk.
//!
//! Files with a `.json` extension are read as JSON, everything else as YAML.

use std::path::Path;

use aliasync_types::{Repository, Roster};
use anyhow::Context;
use serde::de::DeserializeOwned;

pub fn load_roster(path: &Path) -> anyhow::Result<Roster> {
    let mut roster: Roster = load(path).context("failed to load roster")?;
    roster.sort();
    Ok(roster)
}

pub fn load_inventory(path: &Path) -> anyhow::Result<Vec<Repository>> {
    load(path).context("failed to load inventory")
}

fn load<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let value = if is_json {
        serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))?
    } else {
        serde_yaml::from_str(&text).with_context(|| format!("invalid YAML in {}", path.display()))?
    };
    Ok(value)
}
