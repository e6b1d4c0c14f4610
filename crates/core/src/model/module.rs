use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModuleError {
    #[error("unknown module: {0}")]
    Unknown(String),
}

/// A purchasable unit of service. Gates phase visibility for HESTIA clients.
///
/// Variant order is the registry order used for display and iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKey {
    Vetting,
    Review,
    Design,
    Inspection,
    Dispute,
}

impl ModuleKey {
    /// Every known module, in registry order.
    pub const ALL: [ModuleKey; 5] = [
        ModuleKey::Vetting,
        ModuleKey::Review,
        ModuleKey::Design,
        ModuleKey::Inspection,
        ModuleKey::Dispute,
    ];

    /// Stable key used in persisted records.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            ModuleKey::Vetting => "vetting",
            ModuleKey::Review => "review",
            ModuleKey::Design => "design",
            ModuleKey::Inspection => "inspection",
            ModuleKey::Dispute => "dispute",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            ModuleKey::Vetting => "Vetting",
            ModuleKey::Review => "Review",
            ModuleKey::Design => "Design & Material",
            ModuleKey::Inspection => "Inspection & Warranty",
            ModuleKey::Dispute => "Dispute & Completion",
        }
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ModuleKey {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ModuleKey::ALL
            .into_iter()
            .find(|module| module.key().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ModuleError::Unknown(needle.to_owned()))
    }
}

/// A set of modules kept in registry order.
///
/// On a phase, an empty set means "belongs to every selection".
/// On a client, an empty set is only valid for ZEUS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleSet(BTreeSet<ModuleKey>);

impl ModuleSet {
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn contains(&self, module: ModuleKey) -> bool {
        self.0.contains(&module)
    }

    #[must_use]
    pub fn intersects(&self, other: &ModuleSet) -> bool {
        !self.0.is_disjoint(&other.0)
    }

    pub fn insert(&mut self, module: ModuleKey) -> bool {
        self.0.insert(module)
    }

    pub fn remove(&mut self, module: ModuleKey) -> bool {
        self.0.remove(&module)
    }

    /// Adds the module if absent, removes it if present.
    pub fn toggle(&mut self, module: ModuleKey) {
        if !self.0.remove(&module) {
            self.0.insert(module);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = ModuleKey> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ModuleKey> for ModuleSet {
    fn from_iter<I: IntoIterator<Item = ModuleKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[ModuleKey; N]> for ModuleSet {
    fn from(modules: [ModuleKey; N]) -> Self {
        modules.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_keys_case_insensitively() {
        assert_eq!("review".parse::<ModuleKey>().unwrap(), ModuleKey::Review);
        assert_eq!(" Dispute ".parse::<ModuleKey>().unwrap(), ModuleKey::Dispute);
        assert_eq!(
            "plumbing".parse::<ModuleKey>(),
            Err(ModuleError::Unknown("plumbing".into()))
        );
    }

    #[test]
    fn set_iterates_in_registry_order() {
        let set = ModuleSet::from([ModuleKey::Dispute, ModuleKey::Vetting, ModuleKey::Design]);
        let keys: Vec<_> = set.iter().map(ModuleKey::key).collect();
        assert_eq!(keys, vec!["vetting", "design", "dispute"]);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut set = ModuleSet::new();
        set.toggle(ModuleKey::Review);
        assert!(set.contains(ModuleKey::Review));
        set.toggle(ModuleKey::Review);
        assert!(set.is_empty());
    }

    #[test]
    fn intersects_requires_shared_module() {
        let a = ModuleSet::from([ModuleKey::Vetting, ModuleKey::Review]);
        let b = ModuleSet::from([ModuleKey::Review]);
        let c = ModuleSet::from([ModuleKey::Design]);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(!a.intersects(&ModuleSet::new()));
    }
}
