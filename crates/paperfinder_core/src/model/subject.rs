//! Subject catalog model.
//!
//! # Responsibility
//! - Define the persisted subject shape (`name` + `papers`).
//! - Keep paper order exactly as declared by the catalog author.
//!
//! # Invariants
//! - `PaperCatalog` never holds two entries with the same paper number.
//! - Serialized form is a JSON object whose key order matches insertion order.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::Formatter;

/// Subject code to subject mapping, as persisted in `subjects.json`.
pub type SubjectCatalog = BTreeMap<String, Subject>;

/// One cataloged subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Display name, e.g. `Physics`.
    pub name: String,
    /// Paper number to description, in declaration order.
    #[serde(default)]
    pub papers: PaperCatalog,
}

impl Subject {
    pub fn new(name: impl Into<String>, papers: PaperCatalog) -> Self {
        Self {
            name: name.into(),
            papers,
        }
    }
}

/// Insertion-ordered mapping from paper number to description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperCatalog {
    entries: Vec<(String, String)>,
}

impl PaperCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces one paper.
    ///
    /// A replaced paper keeps its original position.
    pub fn insert(&mut self, number: impl Into<String>, description: impl Into<String>) {
        let number = number.into();
        let description = description.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == number) {
            Some(entry) => entry.1 = description,
            None => self.entries.push((number, description)),
        }
    }

    pub fn get(&self, number: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == number)
            .map(|(_, description)| description.as_str())
    }

    /// Iterates `(number, description)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(number, description)| (number.as_str(), description.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, D: Into<String>> FromIterator<(N, D)> for PaperCatalog {
    fn from_iter<T: IntoIterator<Item = (N, D)>>(iter: T) -> Self {
        let mut papers = Self::new();
        for (number, description) in iter {
            papers.insert(number, description);
        }
        papers
    }
}

/// Label used for one paper in results, e.g. `Paper 1: Core`.
pub fn paper_label(number: &str, description: &str) -> String {
    format!("Paper {number}: {description}")
}

impl Serialize for PaperCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (number, description) in &self.entries {
            map.serialize_entry(number, description)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PaperCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PaperCatalogVisitor)
    }
}

struct PaperCatalogVisitor;

impl<'de> Visitor<'de> for PaperCatalogVisitor {
    type Value = PaperCatalog;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("an object mapping paper numbers to descriptions")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut papers = PaperCatalog::new();
        while let Some((number, description)) = access.next_entry::<String, String>()? {
            papers.insert(number, description);
        }
        Ok(papers)
    }
}

#[cfg(test)]
mod tests {
    use super::{paper_label, PaperCatalog, Subject};

    #[test]
    fn insert_replaces_in_place() {
        let mut papers = PaperCatalog::new();
        papers.insert("4", "Structured");
        papers.insert("1", "Multiple Choice");
        papers.insert("4", "Theory");

        let collected: Vec<_> = papers.iter().collect();
        assert_eq!(collected, vec![("4", "Theory"), ("1", "Multiple Choice")]);
    }

    #[test]
    fn json_object_order_is_preserved() {
        let json = r#"{"name":"Physics","papers":{"4":"Theory","1":"MCQ","2":"AS"}}"#;
        let subject: Subject = serde_json::from_str(json).unwrap();
        let numbers: Vec<_> = subject.papers.iter().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec!["4", "1", "2"]);

        assert_eq!(serde_json::to_string(&subject).unwrap(), json);
    }

    #[test]
    fn missing_papers_defaults_to_empty() {
        let subject: Subject = serde_json::from_str(r#"{"name":"Art"}"#).unwrap();
        assert!(subject.papers.is_empty());
    }

    #[test]
    fn label_includes_number_and_description() {
        assert_eq!(paper_label("1", "Core"), "Paper 1: Core");
    }
}
