// Runtime constraint weight configuration.

use std::collections::HashMap;

// Per-constraint multipliers applied to each constraint's unit weight.
//
// A constraint without an override keeps multiplier 1. Multiplier 0
// switches the constraint off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintWeights {
    weights: HashMap<String, u32>,
}

impl ConstraintWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, N>(iter: I) -> Self
    where
        I: IntoIterator<Item = (N, u32)>,
        N: Into<String>,
    {
        Self {
            weights: iter.into_iter().map(|(n, w)| (n.into(), w)).collect(),
        }
    }

    pub fn put(&mut self, name: impl Into<String>, weight: u32) {
        self.weights.insert(name.into(), weight);
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.weights.get(name).copied()
    }

    pub fn get_or_default(&self, name: &str) -> u32 {
        self.get(name).unwrap_or(1)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    // Override names that match none of `known`, sorted.
    pub fn unknown<'a>(&'a self, known: &[&str]) -> Vec<&'a str> {
        let mut unknown: Vec<&str> = self
            .weights
            .keys()
            .map(String::as_str)
            .filter(|name| !known.contains(name))
            .collect();
        unknown.sort_unstable();
        unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_one() {
        let weights = ConstraintWeights::from_pairs([("subjectDistribution", 3)]);
        assert_eq!(weights.get_or_default("subjectDistribution"), 3);
        assert_eq!(weights.get_or_default("roomConflict"), 1);
        assert_eq!(weights.len(), 1);
    }

    #[test]
    fn test_unknown_names() {
        let mut weights = ConstraintWeights::new();
        weights.put("teacherConflict", 2);
        weights.put("tacherGaps", 1);
        weights.put("lunchBreak", 1);
        assert_eq!(
            weights.unknown(&["teacherConflict", "minimizeTeacherGaps"]),
            vec!["lunchBreak", "tacherGaps"]
        );
    }
}
