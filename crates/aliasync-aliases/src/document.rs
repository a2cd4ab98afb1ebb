use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AliasError, Result};

/// Name of the alias file inside a repository.
pub const OWNERS_ALIASES_FILENAME: &str = "OWNERS_ALIASES";

/// On-disk shape of the file. Top-level keys other than `aliases` are ignored.
#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    aliases: Option<UniqueAliases>,
}

/// Alias mapping that refuses repeated names instead of keeping the last one.
struct UniqueAliases(BTreeMap<String, Option<Vec<String>>>);

impl<'de> Deserialize<'de> for UniqueAliases {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AliasMapVisitor;

        impl<'de> Visitor<'de> for AliasMapVisitor {
            type Value = UniqueAliases;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping from alias name to member list")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut aliases = BTreeMap::new();
                while let Some(name) = map.next_key::<String>()? {
                    let members = map.next_value::<Option<Vec<String>>>()?;
                    if aliases.contains_key(&name) {
                        return Err(serde::de::Error::custom(format!(
                            "alias `{name}` is defined more than once"
                        )));
                    }
                    aliases.insert(name, members);
                }
                Ok(UniqueAliases(aliases))
            }
        }

        deserializer.deserialize_map(AliasMapVisitor)
    }
}

#[derive(Serialize)]
struct EncodedDocument<'a> {
    aliases: &'a BTreeMap<String, Vec<String>>,
}

/// Mapping from alias name to member list.
///
/// Keys are unique and case-sensitive. Member order is preserved as parsed
/// but carries no meaning; [`AliasDocument::to_yaml`] and
/// [`AliasDocument::sort`] normalize it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasDocument {
    aliases: BTreeMap<String, Vec<String>>,
}

impl AliasDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the text of an alias file.
    ///
    /// Blank or comment-only text is an empty document. An alias with no
    /// members (`name:` with a null value) parses to an empty member list.
    pub fn parse(content: &str) -> Result<Self> {
        if is_blank(content) {
            return Ok(Self::new());
        }

        let raw: RawDocument =
            serde_yaml::from_str(content).map_err(|e| AliasError::Parse(e.to_string()))?;

        let aliases = raw
            .aliases
            .map(|unique| unique.0)
            .unwrap_or_default()
            .into_iter()
            .map(|(name, members)| (name, members.unwrap_or_default()))
            .collect();

        Ok(Self { aliases })
    }

    /// Read and parse an alias file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Encode the document as YAML with sorted keys and sorted member lists.
    ///
    /// A non-empty `header` is trimmed and placed above the document,
    /// separated by one blank line.
    pub fn to_yaml(&self, header: &str) -> Result<String> {
        let mut sorted = self.clone();
        sorted.sort();

        let body = serde_yaml::to_string(&EncodedDocument {
            aliases: &sorted.aliases,
        })
        .map_err(|e| AliasError::Serialize(e.to_string()))?;

        let header = header.trim();
        if header.is_empty() {
            return Ok(body);
        }

        Ok(format!("{header}\n\n{body}"))
    }

    /// Sort every member list in place.
    pub fn sort(&mut self) {
        for members in self.aliases.values_mut() {
            members.sort();
        }
    }

    /// Members of an alias, if present.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.aliases.get(name).map(Vec::as_slice)
    }

    /// Set the members of an alias, replacing any previous list.
    pub fn insert(&mut self, name: impl Into<String>, members: Vec<String>) -> Option<Vec<String>> {
        self.aliases.insert(name.into(), members)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    /// Alias names in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(String::as_str)
    }

    /// `(name, members)` pairs in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl<K, V, M> FromIterator<(K, V)> for AliasDocument
where
    K: Into<String>,
    V: IntoIterator<Item = M>,
    M: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let aliases = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
            .collect();
        Self { aliases }
    }
}

fn is_blank(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}
