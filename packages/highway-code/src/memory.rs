//! In-memory store.
//!
//! Holds rules and sections in ordered maps keyed by their numbers, which
//! gives ascending iteration for free. Used for fixtures and tests, and by
//! anything that loads the Highway Code from a file instead of a database.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::models::{Rule, Section};
use crate::store::HighwayCodeStore;

/// A Highway Code export: `{"sections": [...], "rules": [...]}`.
///
/// This is the layout read by [`MemoryStore::from_json_file`], and the same
/// value can seed any other store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    pub sections: Vec<Section>,
    pub rules: Vec<Rule>,
}

impl Dataset {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rules: BTreeMap<i32, Rule>,
    sections: BTreeMap<i32, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a rule, replacing any rule with the same number.
    pub fn insert_rule(&mut self, rule: Rule) {
        self.rules.insert(rule.hcno, rule);
    }

    /// Store a section, replacing any section with the same number.
    pub fn insert_section(&mut self, section: Section) {
        self.sections.insert(section.sec_no, section.title);
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.insert_rule(rule);
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.insert_section(section);
        self
    }

    /// Build a store from a dataset. Later entries replace earlier ones with
    /// the same number.
    pub fn from_dataset(dataset: Dataset) -> Self {
        let mut store = Self::new();
        for section in dataset.sections {
            store.insert_section(section);
        }
        for rule in dataset.rules {
            store.insert_rule(rule);
        }
        store
    }

    /// Load a JSON document in the [`Dataset`] layout.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Dataset::from_json_str(json).map(Self::from_dataset)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let store = Self::from_dataset(Dataset::from_json_file(path)?);
        tracing::debug!(
            path = %path.display(),
            sections = store.sections.len(),
            rules = store.rules.len(),
            "loaded highway code dataset"
        );
        Ok(store)
    }
}

#[async_trait]
impl HighwayCodeStore for MemoryStore {
    async fn rule(&self, hcno: i32) -> Result<Option<Rule>> {
        Ok(self.rules.get(&hcno).cloned())
    }

    async fn rules(&self, hcnos: &[i32]) -> Result<Vec<Rule>> {
        Ok(self
            .rules
            .values()
            .filter(|rule| hcnos.contains(&rule.hcno))
            .cloned()
            .collect())
    }

    async fn rules_in_pubsec(&self, pubsec: i32) -> Result<Vec<Rule>> {
        Ok(self
            .rules
            .values()
            .filter(|rule| rule.pubsec == pubsec)
            .cloned()
            .collect())
    }

    async fn section_title(&self, sec_no: i32) -> Result<Option<String>> {
        Ok(self.sections.get(&sec_no).cloned())
    }

    async fn section_exists_before(&self, sec_no: i32) -> Result<bool> {
        Ok(self.sections.range(..sec_no).next().is_some())
    }

    async fn section_exists_after(&self, sec_no: i32) -> Result<bool> {
        Ok(self
            .sections
            .range((std::ops::Bound::Excluded(sec_no), std::ops::Bound::Unbounded))
            .next()
            .is_some())
    }

    async fn sections(&self) -> Result<Vec<Section>> {
        Ok(self
            .sections
            .iter()
            .map(|(sec_no, title)| Section::new(*sec_no, title.clone()))
            .collect())
    }
}
