use crate::{bayes::LikelihoodEstimator, selection::AttributeSelection};
use anyhow::{bail, Result};
use std::io::{BufRead, Write};

/// Asks for a value for every attribute column `selection` does not cover
/// yet, offering only the values observed in the dataset. Answers are
/// lower-cased before they are stored.
pub fn collect_selection<R: BufRead, W: Write>(
    estimator: &LikelihoodEstimator<'_>,
    mut selection: AttributeSelection,
    input: &mut R,
    output: &mut W,
) -> Result<AttributeSelection> {
    for (column, values) in estimator.choices() {
        if selection.get(column).is_some() {
            continue;
        }
        if values.is_empty() {
            bail!("column '{}' has no values to choose from.", column);
        }

        writeln!(output, "Select {}:", column)?;
        for (i, value) in values.iter().enumerate() {
            writeln!(output, "  {}) {}", i + 1, value)?;
        }

        let mut line = String::new();
        loop {
            write!(output, "> ")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                bail!("input closed before a value was selected for '{}'.", column);
            }

            match resolve_choice(line.trim(), &values) {
                Some(value) => {
                    selection.insert(column, value.to_lowercase())?;
                    break;
                }
                None => writeln!(output, "'{}' is not one of the listed options.", line.trim())?,
            }
        }
    }

    Ok(selection)
}

/// Accepts either a 1-based option number or the option itself, ignoring case.
fn resolve_choice<'v>(answer: &str, values: &[&'v str]) -> Option<&'v str> {
    if let Ok(number) = answer.parse::<usize>() {
        if let Some(value) = number.checked_sub(1).and_then(|i| values.get(i).copied()) {
            return Some(value);
        }
    }

    values
        .iter()
        .copied()
        .find(|value| value.eq_ignore_ascii_case(answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bayes::EstimatorConfig, dataset::Dataset};

    fn dataset() -> Dataset {
        Dataset::from_rows(
            ["Smoker", "AgeCategory", "HeartProblem"],
            vec![
                vec!["yes", "55-59", "yes"],
                vec!["no", "18-24", "no"],
                vec!["no", "80 or older", "yes"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn resolves_numbers_and_names() {
        let values = ["yes", "no"];
        assert_eq!(resolve_choice("1", &values), Some("yes"));
        assert_eq!(resolve_choice("NO", &values), Some("no"));
        assert_eq!(resolve_choice("0", &values), None);
        assert_eq!(resolve_choice("3", &values), None);
        assert_eq!(resolve_choice("maybe", &values), None);
    }

    #[test]
    fn collects_one_value_per_column() {
        let dataset = dataset();
        let estimator = LikelihoodEstimator::new(&dataset, EstimatorConfig::default()).unwrap();

        let mut input = "Yes\nnope\n3\n".as_bytes();
        let mut output = Vec::new();
        let selection =
            collect_selection(&estimator, AttributeSelection::new(), &mut input, &mut output)
                .unwrap();

        assert_eq!(selection.get("Smoker"), Some("yes"));
        assert_eq!(selection.get("AgeCategory"), Some("80 or older"));
        assert_eq!(selection.len(), 2);

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Select AgeCategory:\n  1) 55-59\n  2) 18-24\n  3) 80 or older\n"));
        assert!(transcript.contains("'nope' is not one of the listed options."));
    }

    #[test]
    fn skips_columns_already_selected() {
        let dataset = dataset();
        let estimator = LikelihoodEstimator::new(&dataset, EstimatorConfig::default()).unwrap();

        let seeded = AttributeSelection::new().with("Smoker", "no").unwrap();
        let mut input = "2\n".as_bytes();
        let mut output = Vec::new();
        let selection = collect_selection(&estimator, seeded, &mut input, &mut output).unwrap();

        assert_eq!(selection.get("Smoker"), Some("no"));
        assert_eq!(selection.get("AgeCategory"), Some("18-24"));
        assert!(estimator.predict(&selection).is_ok());

        let transcript = String::from_utf8(output).unwrap();
        assert!(!transcript.contains("Select Smoker:"));
        assert!(transcript.contains("Select AgeCategory:"));
    }

    #[test]
    fn complete_selection_reads_nothing() {
        let dataset = dataset();
        let estimator = LikelihoodEstimator::new(&dataset, EstimatorConfig::default()).unwrap();

        let seeded = AttributeSelection::new()
            .with("Smoker", "yes")
            .unwrap()
            .with("AgeCategory", "55-59")
            .unwrap();
        let mut input = "".as_bytes();
        let mut output = Vec::new();
        let selection =
            collect_selection(&estimator, seeded.clone(), &mut input, &mut output).unwrap();

        assert_eq!(selection, seeded);
        assert!(output.is_empty());
    }

    #[test]
    fn closed_input_is_an_error() {
        let dataset = dataset();
        let estimator = LikelihoodEstimator::new(&dataset, EstimatorConfig::default()).unwrap();

        let mut input = "1\n".as_bytes();
        let err =
            collect_selection(&estimator, AttributeSelection::new(), &mut input, &mut Vec::new())
                .unwrap_err();
        assert!(err.to_string().contains("AgeCategory"));
    }
}
