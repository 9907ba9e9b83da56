use crate::{dataset::Dataset, error::EstimatorError, selection::AttributeSelection};
use log::{debug, warn};
use std::fmt;

pub const DEFAULT_OUTCOME_COLUMN: &str = "HeartProblem";
pub const DEFAULT_POSITIVE_LABEL: &str = "yes";
pub const DEFAULT_NEGATIVE_LABEL: &str = "no";

/// Names the outcome column and its two labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorConfig {
    pub outcome_column: String,
    pub positive_label: String,
    pub negative_label: String,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            outcome_column: DEFAULT_OUTCOME_COLUMN.to_string(),
            positive_label: DEFAULT_POSITIVE_LABEL.to_string(),
            negative_label: DEFAULT_NEGATIVE_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Positive,
    Negative,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Positive => f.write_str("positive"),
            Outcome::Negative => f.write_str("negative"),
        }
    }
}

/// How one selected attribute value contributed to each joint score.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeEvidence {
    pub column: String,
    pub value: String,
    pub count_positive: usize,
    pub count_negative: usize,
    pub p_positive: f64,
    pub p_negative: f64,
}

/// Joint scores are only comparable with each other, never across inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub score_positive: f64,
    pub score_negative: f64,
    pub outcome: Outcome,
    pub evidence: Vec<AttributeEvidence>,
}

/// Scores attribute selections against a dataset under the naive
/// independence assumption. Holds no mutable state, so one estimator can
/// serve any number of threads.
#[derive(Debug)]
pub struct LikelihoodEstimator<'a> {
    dataset: &'a Dataset,
    config: EstimatorConfig,
    outcome_index: usize,
    attributes: Vec<usize>,
}

impl<'a> LikelihoodEstimator<'a> {
    pub fn new(dataset: &'a Dataset, config: EstimatorConfig) -> Result<Self, EstimatorError> {
        let outcome_index = dataset
            .column_index(&config.outcome_column)
            .ok_or_else(|| EstimatorError::UnknownColumn(config.outcome_column.clone()))?;

        let attributes = (0..dataset.columns().len())
            .filter(|&index| index != outcome_index)
            .collect();

        let stray: Vec<&str> = dataset
            .unique_values(outcome_index)
            .into_iter()
            .filter(|label| *label != config.positive_label && *label != config.negative_label)
            .collect();
        if !stray.is_empty() {
            warn!(
                "outcome column '{}' holds labels other than '{}'/'{}', ignoring rows labelled {:?}",
                config.outcome_column, config.positive_label, config.negative_label, stray
            );
        }

        Ok(LikelihoodEstimator {
            dataset,
            config,
            outcome_index,
            attributes,
        })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn label(&self, outcome: Outcome) -> &str {
        match outcome {
            Outcome::Positive => &self.config.positive_label,
            Outcome::Negative => &self.config.negative_label,
        }
    }

    /// Every column except the outcome, in header order.
    pub fn attribute_columns(&self) -> impl Iterator<Item = &str> + '_ {
        let columns = self.dataset.columns();
        self.attributes.iter().map(move |&index| columns[index].as_str())
    }

    /// The values an input layer may offer for each attribute column.
    pub fn choices(&self) -> Vec<(&str, Vec<&str>)> {
        self.attribute_columns()
            .zip(self.attributes.iter())
            .map(|(column, &index)| (column, self.dataset.unique_values(index)))
            .collect()
    }

    /// Row counts per outcome class. Fails when either class has no rows, in
    /// which case no prediction can be made.
    pub fn check_outcomes(&self) -> Result<(usize, usize), EstimatorError> {
        let (positive, negative) = self.dataset.rows().fold((0, 0), |(pos, neg), row| {
            match self.class_of(row) {
                Some(Outcome::Positive) => (pos + 1, neg),
                Some(Outcome::Negative) => (pos, neg + 1),
                None => (pos, neg),
            }
        });

        let missing: Vec<&str> = [(positive, Outcome::Positive), (negative, Outcome::Negative)]
            .into_iter()
            .filter(|&(count, _)| count == 0)
            .map(|(_, outcome)| self.label(outcome))
            .collect();

        if !missing.is_empty() {
            warn!("no rows labelled {}", missing.join(", "));
            return Err(EstimatorError::DataInsufficient {
                positive: self.config.positive_label.clone(),
                negative: self.config.negative_label.clone(),
                missing: missing.join(", "),
            });
        }

        Ok((positive, negative))
    }

    pub fn predict(&self, selection: &AttributeSelection) -> Result<Prediction, EstimatorError> {
        let (total_positive, total_negative) = self.check_outcomes()?;
        let selected = self.selected_values(selection)?;

        // Count co-occurrences of each selected value with each class:
        let mut counts = vec![(0usize, 0usize); selected.len()];
        for row in self.dataset.rows() {
            let class = match self.class_of(row) {
                Some(class) => class,
                None => continue,
            };

            for (count, (&index, &value)) in counts
                .iter_mut()
                .zip(self.attributes.iter().zip(selected.iter()))
            {
                if row[index] == value {
                    match class {
                        Outcome::Positive => count.0 += 1,
                        Outcome::Negative => count.1 += 1,
                    }
                }
            }
        }

        let evidence: Vec<AttributeEvidence> = self
            .attribute_columns()
            .zip(selected.iter())
            .zip(counts.iter())
            .map(|((column, &value), &(count_positive, count_negative))| AttributeEvidence {
                column: column.to_string(),
                value: value.to_string(),
                count_positive,
                count_negative,
                p_positive: frequency(count_positive, total_positive),
                p_negative: frequency(count_negative, total_negative),
            })
            .collect();

        // The empty product is 1:
        let score_positive = evidence.iter().fold(1.0, |acc, e| acc * e.p_positive);
        let score_negative = evidence.iter().fold(1.0, |acc, e| acc * e.p_negative);

        // Ties go to the negative class.
        let outcome = if score_positive > score_negative {
            Outcome::Positive
        } else {
            Outcome::Negative
        };

        debug!(
            "scores {}={:e} {}={:e} over {} attributes -> {}",
            self.config.positive_label,
            score_positive,
            self.config.negative_label,
            score_negative,
            evidence.len(),
            self.label(outcome)
        );

        Ok(Prediction {
            score_positive,
            score_negative,
            outcome,
            evidence,
        })
    }

    /// Lines the selection up with the attribute columns. The selection must
    /// name every attribute column and nothing else.
    fn selected_values<'s>(
        &self,
        selection: &'s AttributeSelection,
    ) -> Result<Vec<&'s str>, EstimatorError> {
        let selected = self
            .attribute_columns()
            .map(|column| {
                selection
                    .get(column)
                    .ok_or_else(|| EstimatorError::MissingAttribute(column.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if selection.len() != selected.len() {
            let mut unknown: Vec<&str> = selection
                .columns()
                .filter(|column| !self.attribute_columns().any(|known| known == *column))
                .collect();
            unknown.sort_unstable();
            if let Some(column) = unknown.first() {
                return Err(EstimatorError::UnknownAttribute(column.to_string()));
            }
        }

        Ok(selected)
    }

    fn class_of(&self, row: &[String]) -> Option<Outcome> {
        let label = row[self.outcome_index].as_str();
        if label == self.config.positive_label {
            Some(Outcome::Positive)
        } else if label == self.config.negative_label {
            Some(Outcome::Negative)
        } else {
            None
        }
    }
}

fn frequency(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
