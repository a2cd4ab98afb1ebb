//! Team roster: the authoritative membership source.
//!
//! Slugs are matched verbatim against alias names, so `"A"` and `"a"` are
//! different teams. A [`Roster`] is built once per run and shared read-only
//! by every branch evaluation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A single team and its current members.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Team identifier, compared case-sensitively against alias names.
    pub slug: String,
    /// Member logins as reported by the membership source.
    #[serde(default)]
    pub members: Vec<String>,
}

impl Team {
    pub fn new(slug: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            slug: slug.into(),
            members,
        }
    }

    /// Members with ASCII letters lowercased, as a fresh copy.
    pub fn lowercase_members(&self) -> Vec<String> {
        self.members.iter().map(|m| m.to_ascii_lowercase()).collect()
    }
}

/// An ordered collection of teams with unique slugs.
///
/// Construction rejects duplicate slugs instead of silently letting the
/// first occurrence win.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    teams: Vec<Team>,
}

impl Roster {
    /// An empty roster. Every alias is unknown against it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a roster, failing on duplicate slugs.
    pub fn from_teams(teams: Vec<Team>) -> Result<Self, TypeError> {
        let mut seen = HashSet::with_capacity(teams.len());
        for team in &teams {
            if !seen.insert(team.slug.as_str()) {
                return Err(TypeError::DuplicateSlug(team.slug.clone()));
            }
        }
        Ok(Self { teams })
    }

    /// Look up a team by exact slug.
    pub fn find(&self, slug: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.slug == slug)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Sort teams by lowercased slug, the order the membership API reports.
    pub fn sort(&mut self) {
        self.teams
            .sort_by(|a, b| a.slug.to_lowercase().cmp(&b.slug.to_lowercase()));
    }
}

impl<'de> Deserialize<'de> for Roster {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let teams = Vec::<Team>::deserialize(deserializer)?;
        Roster::from_teams(teams).map_err(serde::de::Error::custom)
    }
}
