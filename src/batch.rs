use crate::{bayes::LikelihoodEstimator, dataset::is_missing, selection::AttributeSelection};
use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, Trim, Writer};
use log::info;
use std::{io, path::Path};

/// Predicts every row of `inpath` and writes one result row per input row to `outpath`.
pub fn predict_file<P: AsRef<Path>, Q: AsRef<Path>>(
    estimator: &LikelihoodEstimator<'_>,
    inpath: P,
    outpath: Q,
) -> Result<usize> {
    let inpath = inpath.as_ref();
    let outpath = outpath.as_ref();

    let input = std::fs::File::open(inpath)
        .with_context(|| format!("failed to open {}", inpath.display()))?;
    let output = std::fs::File::create(outpath)
        .with_context(|| format!("failed to create {}", outpath.display()))?;

    let count = predict_csv(estimator, input, output)?;
    info!("wrote {} predictions to {}", count, outpath.display());
    Ok(count)
}

/// Reads a csv whose header names every attribute column and writes
/// `ID,Prediction,ScorePositive,ScoreNegative` rows with 1-based IDs.
pub fn predict_csv<R: io::Read, W: io::Write>(
    estimator: &LikelihoodEstimator<'_>,
    input: R,
    output: W,
) -> Result<usize> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);
    let headers = reader.headers()?.clone();

    // Map each attribute column to its position in the input:
    let positions = estimator
        .attribute_columns()
        .map(|column| {
            headers
                .iter()
                .position(|header| header == column)
                .map(|position| (column, position))
                .with_context(|| format!("input is missing attribute column '{}'.", column))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut results = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;

        let mut selection = AttributeSelection::new();
        for &(column, position) in &positions {
            let value = record.get(position).unwrap_or_default();
            if is_missing(value) {
                bail!("input row {} has no value for '{}'.", i + 1, column);
            }
            selection.insert(column, value.to_lowercase())?;
        }

        let prediction = estimator
            .predict(&selection)
            .with_context(|| format!("failed to predict input row {}", i + 1))?;
        results.push(prediction);
    }

    // Now we can write the result:
    let mut writer = Writer::from_writer(output);

    writer.write_record(["ID", "Prediction", "ScorePositive", "ScoreNegative"])?;
    for (i, result) in results.iter().enumerate() {
        writer.write_record(&[
            (i + 1).to_string(),
            estimator.label(result.outcome).to_string(),
            result.score_positive.to_string(),
            result.score_negative.to_string(),
        ])?;
    }
    writer.flush()?;

    Ok(results.len())
}
