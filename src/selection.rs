use crate::error::EstimatorError;
use std::collections::{hash_map::Entry, HashMap};

/// One selected value per attribute column, for a single prediction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSelection {
    values: HashMap<String, String>,
}

impl AttributeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<C, V>(&mut self, column: C, value: V) -> Result<(), EstimatorError>
    where
        C: Into<String>,
        V: Into<String>,
    {
        match self.values.entry(column.into()) {
            Entry::Occupied(entry) => Err(EstimatorError::DuplicateAttribute(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(value.into());
                Ok(())
            }
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with<C, V>(mut self, column: C, value: V) -> Result<Self, EstimatorError>
    where
        C: Into<String>,
        V: Into<String>,
    {
        self.insert(column, value)?;
        Ok(self)
    }

    /// Parses `COLUMN=VALUE`. The value is lower-cased to match the stored
    /// casing of the dataset.
    pub fn insert_assignment(&mut self, assignment: &str) -> Result<(), EstimatorError> {
        let (column, value) = assignment
            .split_once('=')
            .map(|(c, v)| (c.trim(), v.trim()))
            .filter(|(c, v)| !c.is_empty() && !v.is_empty())
            .ok_or_else(|| EstimatorError::MalformedAssignment(assignment.to_string()))?;

        self.insert(column, value.to_lowercase())
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }
}
