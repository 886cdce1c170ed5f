//! Measures attached to components.
//!
//! Raw measures (lines to cover, uncovered conditions, ...) are read by
//! counters during leaf visits. Computed measures are written back by the
//! executor once a node's counter is complete.

pub mod keys;

use crate::component::Component;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single measure value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Long(i64),
    Double(f64),
}

impl Measure {
    /// Integer view; doubles are truncated.
    pub fn as_long(&self) -> i64 {
        match *self {
            Self::Long(v) => v,
            Self::Double(v) => v as i64,
        }
    }

    pub fn as_double(&self) -> f64 {
        match *self {
            Self::Long(v) => v as f64,
            Self::Double(v) => v,
        }
    }
}

impl From<i64> for Measure {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f64> for Measure {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

/// Read access to measures of a component.
///
/// Implementations must be shareable across threads so subtrees can be
/// aggregated in parallel.
pub trait MeasureRepository: Sync {
    fn raw(&self, component: &Component, metric_key: &str) -> Option<&Measure>;
}

/// Measures keyed by component key and metric key.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMeasureRepository {
    measures: HashMap<(String, String), Measure>,
}

impl InMemoryMeasureRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a measure, replacing any previous value for the same pair.
    pub fn add(&mut self, component_key: impl Into<String>, metric_key: impl Into<String>, measure: Measure) {
        let key = (component_key.into(), metric_key.into());
        let previous = self.measures.insert(key.clone(), measure);
        if let Some(previous) = previous.filter(|p| *p != measure) {
            log::warn!(
                "Measure {} on {} replaced ({:?} -> {:?})",
                key.1,
                key.0,
                previous,
                measure
            );
        }
    }

    pub fn add_all<I, C, M>(&mut self, measures: I)
    where
        I: IntoIterator<Item = (C, M, Measure)>,
        C: Into<String>,
        M: Into<String>,
    {
        for (component_key, metric_key, measure) in measures {
            self.add(component_key, metric_key, measure);
        }
    }

    pub fn get(&self, component_key: &str, metric_key: &str) -> Option<&Measure> {
        self.measures
            .get(&(component_key.to_string(), metric_key.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Measure)> {
        self.measures
            .iter()
            .map(|((c, m), v)| (c.as_str(), m.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }
}

impl MeasureRepository for InMemoryMeasureRepository {
    fn raw(&self, component: &Component, metric_key: &str) -> Option<&Measure> {
        self.get(component.key(), metric_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentType, FileAttributes};

    #[test]
    fn test_measure_conversions() {
        assert_eq!(Measure::Long(7).as_double(), 7.0);
        assert_eq!(Measure::Double(7.9).as_long(), 7);
        assert_eq!(Measure::from(3_i64), Measure::Long(3));
        assert_eq!(Measure::from(2.5), Measure::Double(2.5));
    }

    #[test]
    fn test_repository_lookup_by_component() {
        let file = Component::file("p:a.rs", "a.rs", FileAttributes::production());
        let dir = Component::new("p:src", "src", ComponentType::Directory);

        let mut repo = InMemoryMeasureRepository::new();
        repo.add("p:a.rs", keys::LINES_TO_COVER, Measure::Long(10));

        assert_eq!(repo.raw(&file, keys::LINES_TO_COVER), Some(&Measure::Long(10)));
        assert_eq!(repo.raw(&file, keys::UNCOVERED_LINES), None);
        assert_eq!(repo.raw(&dir, keys::LINES_TO_COVER), None);
    }

    #[test]
    fn test_add_replaces_previous_value() {
        let mut repo = InMemoryMeasureRepository::new();
        repo.add("p:a.rs", keys::LINES_TO_COVER, Measure::Long(10));
        repo.add("p:a.rs", keys::LINES_TO_COVER, Measure::Long(12));
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get("p:a.rs", keys::LINES_TO_COVER), Some(&Measure::Long(12)));
    }

    #[test]
    fn test_serializes_untagged() {
        let json = serde_json::to_string(&vec![Measure::Long(3), Measure::Double(42.5)]).unwrap();
        assert_eq!(json, "[3,42.5]");
    }
}
