//! Per-class selectable names (subjects, specialization subjects, batches,
//! practical subjects).
//!
//! The timetable model treats these as opaque labels; they only feed the
//! entry form's dropdowns.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimetableError;

/// Which dropdown a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfigKind {
    #[serde(rename = "subject")]
    Subject,
    #[serde(rename = "specSubject")]
    SpecSubject,
    #[serde(rename = "batch")]
    Batch,
    #[serde(rename = "practical")]
    Practical,
}

impl ConfigKind {
    pub const ALL: [ConfigKind; 4] = [
        ConfigKind::Subject,
        ConfigKind::SpecSubject,
        ConfigKind::Batch,
        ConfigKind::Practical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKind::Subject => "subject",
            ConfigKind::SpecSubject => "specSubject",
            ConfigKind::Batch => "batch",
            ConfigKind::Practical => "practical",
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKind {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TimetableError::UnknownConfigKind(s.to_string()))
    }
}

/// Ordered name lists for one class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigLists {
    lists: BTreeMap<ConfigKind, Vec<String>>,
}

impl ConfigLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of `kind` in insertion order.
    pub fn names(&self, kind: ConfigKind) -> &[String] {
        self.lists.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Append a name. Blank names are ignored; repeats are kept.
    ///
    /// Returns whether a name was added.
    pub fn add(&mut self, kind: ConfigKind, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.lists.entry(kind).or_default().push(name.to_string());
        true
    }

    /// Remove every occurrence of `name`. Returns how many were removed.
    pub fn delete(&mut self, kind: ConfigKind, name: &str) -> usize {
        let Some(list) = self.lists.get_mut(&kind) else {
            return 0;
        };
        let before = list.len();
        list.retain(|n| n != name);
        let removed = before - list.len();
        if list.is_empty() {
            self.lists.remove(&kind);
        }
        removed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("subject", ConfigKind::Subject)]
    #[test_case("specSubject", ConfigKind::SpecSubject)]
    #[test_case("batch", ConfigKind::Batch)]
    #[test_case("practical", ConfigKind::Practical)]
    fn test_kind_names(name: &str, kind: ConfigKind) {
        assert_eq!(name.parse::<ConfigKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), name);
    }

    #[test]
    fn test_unknown_kind() {
        assert!(matches!(
            "room".parse::<ConfigKind>(),
            Err(TimetableError::UnknownConfigKind(k)) if k == "room"
        ));
    }

    #[test]
    fn test_add_keeps_order_and_repeats() {
        let mut lists = ConfigLists::new();
        assert!(lists.add(ConfigKind::Batch, "2"));
        assert!(lists.add(ConfigKind::Batch, " 1 "));
        assert!(lists.add(ConfigKind::Batch, "2"));
        assert!(!lists.add(ConfigKind::Batch, "   "));
        assert_eq!(lists.names(ConfigKind::Batch), ["2", "1", "2"]);
        assert!(lists.names(ConfigKind::Subject).is_empty());
    }

    #[test]
    fn test_delete_removes_all_matches() {
        let mut lists = ConfigLists::new();
        lists.add(ConfigKind::Subject, "Maths");
        lists.add(ConfigKind::Subject, "Art");
        lists.add(ConfigKind::Subject, "Maths");
        assert_eq!(lists.delete(ConfigKind::Subject, "Maths"), 2);
        assert_eq!(lists.names(ConfigKind::Subject), ["Art"]);
        assert_eq!(lists.delete(ConfigKind::Practical, "Maths"), 0);
    }

    #[test]
    fn test_serializes_with_wire_kind_names() {
        let mut lists = ConfigLists::new();
        lists.add(ConfigKind::SpecSubject, "Latin");
        let json = serde_json::to_value(&lists).unwrap();
        assert_eq!(json, serde_json::json!({ "specSubject": ["Latin"] }));
    }
}
