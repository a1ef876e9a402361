//! Ordered, editable collection of prompts

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::generator::PromptGenerator;
use super::record::{ExpectedOutcome, PromptRecord};
use crate::error::{BenchError, BenchResult};

/// Read-only view of a prompt set taken when a benchmark starts
pub type PromptSnapshot = Arc<[PromptRecord]>;

/// Ordered, mutable collection of prompt records
///
/// Edits are only meaningful before a benchmark starts: the engine runs
/// against a [`PromptSnapshot`] and never sees later mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PromptRecord>", into = "Vec<PromptRecord>")]
pub struct PromptSet {
    records: Vec<PromptRecord>,
}

impl From<Vec<PromptRecord>> for PromptSet {
    fn from(records: Vec<PromptRecord>) -> Self {
        Self::from_records(records)
    }
}

impl From<PromptSet> for Vec<PromptRecord> {
    fn from(set: PromptSet) -> Self {
        set.records
    }
}

impl PromptSet {
    /// Create an empty prompt set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from existing records, renumbering them by position
    pub fn from_records(records: Vec<PromptRecord>) -> Self {
        let mut set = Self { records };
        set.renumber();
        set
    }

    /// Generate a fresh set with the default generator
    pub fn generate(count: usize, no_tool_probability: f64) -> BenchResult<Self> {
        let mut generator = PromptGenerator::new();
        let records = generator.generate(count, no_tool_probability)?;
        Ok(Self { records })
    }

    /// Replace the contents with a newly generated suite
    ///
    /// On a validation failure the existing records are left untouched.
    pub fn regenerate<R: Rng>(
        &mut self,
        generator: &mut PromptGenerator<R>,
        count: usize,
        no_tool_probability: f64,
    ) -> BenchResult<()> {
        let records = generator.generate(count, no_tool_probability)?;
        self.records = records;
        Ok(())
    }

    /// Append a prompt, returning its index
    pub fn push(&mut self, text: impl Into<String>, expected_outcome: ExpectedOutcome) -> usize {
        let id = self.records.len();
        self.records.push(PromptRecord::new(id, text, expected_outcome));
        id
    }

    /// Replace the text of a prompt; surrounding whitespace is trimmed
    pub fn set_text(&mut self, index: usize, text: impl AsRef<str>) -> BenchResult<()> {
        let record = self.get_mut(index)?;
        record.text = text.as_ref().trim().to_string();
        Ok(())
    }

    /// Change the expected outcome of a prompt
    pub fn set_expected_outcome(
        &mut self,
        index: usize,
        expected_outcome: ExpectedOutcome,
    ) -> BenchResult<()> {
        self.get_mut(index)?.expected_outcome = expected_outcome;
        Ok(())
    }

    /// Get a prompt by index
    pub fn get(&self, index: usize) -> Option<&PromptRecord> {
        self.records.get(index)
    }

    /// All prompts in order
    pub fn records(&self) -> &[PromptRecord] {
        &self.records
    }

    /// Iterate prompts in order
    pub fn iter(&self) -> impl Iterator<Item = &PromptRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Take the read-only snapshot a benchmark runs against
    pub fn snapshot(&self) -> PromptSnapshot {
        Arc::from(self.records.as_slice())
    }

    /// Number of prompts per expected outcome
    pub fn count_by_outcome(&self) -> HashMap<ExpectedOutcome, usize> {
        let mut counts = HashMap::new();
        for record in &self.records {
            *counts.entry(record.expected_outcome).or_insert(0) += 1;
        }
        counts
    }

    /// Load a suite saved as a JSON array of `{sentence, expected_tool}` objects
    pub fn load_from_file(path: &Path) -> BenchResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BenchError::io(format!(
                "Failed to read prompt suite '{}': {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            BenchError::validation(format!(
                "Failed to parse prompt suite '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Save the suite as pretty-printed JSON
    pub fn save_to_file(&self, path: &Path) -> BenchResult<()> {
        let json = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(path, json).map_err(|e| {
            BenchError::io(format!(
                "Failed to write prompt suite '{}': {}",
                path.display(),
                e
            ))
        })
    }

    fn get_mut(&mut self, index: usize) -> BenchResult<&mut PromptRecord> {
        let len = self.records.len();
        self.records.get_mut(index).ok_or_else(|| {
            BenchError::validation(format!(
                "Prompt index {} out of range (suite has {} prompts)",
                index, len
            ))
        })
    }

    fn renumber(&mut self) {
        for (id, record) in self.records.iter_mut().enumerate() {
            record.id = id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_set() -> PromptSet {
        let mut set = PromptSet::new();
        set.push("What is the weather today in Boston, MA?", ExpectedOutcome::Tool);
        set.push("Tell me a joke.", ExpectedOutcome::NoTool);
        set
    }

    #[test]
    fn test_edit_text_trims_and_is_idempotent() {
        let mut set = sample_set();
        set.set_text(0, "  Is it going to rain tomorrow in Denver, CO?  ")
            .unwrap();
        let once = set.clone();
        set.set_text(0, "Is it going to rain tomorrow in Denver, CO?")
            .unwrap();
        assert_eq!(set, once);
        assert_eq!(
            set.get(0).unwrap().text,
            "Is it going to rain tomorrow in Denver, CO?"
        );
    }

    #[test]
    fn test_edit_expected_outcome() {
        let mut set = sample_set();
        set.set_expected_outcome(1, ExpectedOutcome::Tool).unwrap();
        set.set_expected_outcome(1, ExpectedOutcome::Tool).unwrap();
        assert_eq!(set.get(1).unwrap().expected_outcome, ExpectedOutcome::Tool);
        assert_eq!(set.count_by_outcome().get(&ExpectedOutcome::Tool), Some(&2));
    }

    #[test]
    fn test_edit_out_of_range() {
        let mut set = sample_set();
        let before = set.clone();
        assert!(set.set_text(5, "nope").unwrap_err().is_validation());
        assert!(set
            .set_expected_outcome(2, ExpectedOutcome::NoTool)
            .is_err());
        assert_eq!(set, before);
    }

    #[test]
    fn test_invalid_regenerate_keeps_existing() {
        let mut set = sample_set();
        let before = set.clone();
        let mut generator = PromptGenerator::seeded(9);

        assert!(set.regenerate(&mut generator, 0, 0.25).is_err());
        assert_eq!(set, before);

        set.regenerate(&mut generator, 4, 0.25).unwrap();
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut set = sample_set();
        let snapshot = set.snapshot();
        set.set_text(1, "Describe a beautiful sunset.").unwrap();
        assert_eq!(snapshot[1].text, "Tell me a joke.");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("suite.json");

        let set = sample_set();
        set.save_to_file(&path).unwrap();
        let loaded = PromptSet::load_from_file(&path).unwrap();
        assert_eq!(loaded, set);
    }

    #[test]
    fn test_load_renumbers_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("suite.json");
        std::fs::write(
            &path,
            r#"[
                {"id": 9, "sentence": "What is 2+2?", "expected_tool": "none"},
                {"sentence": "How's the weather in Miami, FL today?", "expected_tool": "get_current_weather"}
            ]"#,
        )
        .unwrap();

        let loaded = PromptSet::load_from_file(&path).unwrap();
        assert_eq!(loaded.get(0).unwrap().id, 0);
        assert_eq!(loaded.get(1).unwrap().id, 1);
        assert_eq!(loaded.get(1).unwrap().expected_outcome, ExpectedOutcome::Tool);
    }

    #[test]
    fn test_deserialize_numbers_records_by_position() {
        let set: PromptSet = serde_json::from_str(
            r#"[
                {"sentence": "Tell me a joke.", "expected_tool": "none"},
                {"sentence": "What is 2+2?", "expected_tool": "no_tool"},
                {"id": 0, "sentence": "Will it snow in Denver, CO?", "expected_tool": "tool"}
            ]"#,
        )
        .unwrap();
        let ids: Vec<usize> = set.iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(set.get(1).unwrap().expected_outcome, ExpectedOutcome::NoTool);

        let json = serde_json::to_value(&set).unwrap();
        assert!(json.is_array());
        assert_eq!(json[2]["expected_tool"], "get_current_weather");
    }
}
