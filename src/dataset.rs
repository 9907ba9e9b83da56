use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use std::{collections::HashSet, fs::File, io, path::Path};

/// Cell contents treated as a missing value, in addition to the empty string.
/// Matched exactly: `none` or `Na` are ordinary categorical values.
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// An immutable table of categorical records. Every stored row is complete:
/// it has exactly one non-missing value per column.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open dataset {}", path.display()))?;
        let dataset = Self::from_reader(file)
            .with_context(|| format!("failed to read dataset {}", path.display()))?;

        info!(
            "loaded {} complete rows with {} columns from {}",
            dataset.len(),
            dataset.columns.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Reads a header row followed by records. Incomplete records are dropped.
    pub fn from_reader<R: io::Read>(rdr: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(rdr);

        let columns: Vec<String> = reader
            .headers()
            .context("csv dataset missing header row.")?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        let mut dropped = 0;
        for record in reader.records() {
            let record = record?;
            match complete_row(&record, columns.len()) {
                Some(row) => rows.push(row),
                None => dropped += 1,
            }
        }

        Self::assemble(columns, rows, dropped)
    }

    /// Builds a dataset from in-memory rows, applying the same cleaning as the
    /// csv loader.
    pub fn from_rows<C, R, S>(columns: C, rows: R) -> Result<Self>
    where
        C: IntoIterator<Item = S>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns
            .into_iter()
            .map(|c| c.into().trim().to_string())
            .collect();

        let mut kept = Vec::new();
        let mut dropped = 0;
        for row in rows {
            let row: Vec<String> = row.into_iter().map(|v| v.into().trim().to_string()).collect();
            if row.len() == columns.len() && row.iter().all(|v| !is_missing(v)) {
                kept.push(row);
            } else {
                dropped += 1;
            }
        }

        Self::assemble(columns, kept, dropped)
    }

    fn assemble(columns: Vec<String>, rows: Vec<Vec<String>>, dropped: usize) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if column.is_empty() {
                bail!("csv dataset has an unnamed column.");
            }
            if !seen.insert(column.as_str()) {
                bail!("csv dataset has duplicate column '{}'.", column);
            }
        }

        if dropped > 0 {
            debug!("dropped {} incomplete rows", dropped);
        }

        Ok(Dataset { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct values of a column in first-seen order.
    pub fn unique_values(&self, index: usize) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter_map(|row| row.get(index))
            .map(String::as_str)
            .filter(|value| seen.insert(*value))
            .collect()
    }
}

fn complete_row(record: &StringRecord, width: usize) -> Option<Vec<String>> {
    if record.len() != width || record.iter().any(is_missing) {
        return None;
    }
    Some(record.iter().map(str::to_string).collect())
}

pub(crate) fn is_missing(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || MISSING_MARKERS.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
Smoker,Diabetic,HeartProblem
yes,no,yes
no,,no
yes,yes,yes
no,no
no,no,no
no,NA,yes
";

    #[test]
    fn drops_incomplete_rows() {
        let dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(dataset.columns(), &["Smoker", "Diabetic", "HeartProblem"]);
        assert_eq!(dataset.len(), 3);
        assert!(dataset.rows().all(|row| row.len() == 3));
    }

    #[test]
    fn null_markers_are_case_sensitive() {
        let csv = "AlcoholDrinking,HeartProblem\nnone,yes\nnone,no\nNONE,yes\nNa,no\nheavy,yes\nNone,no\nnull,yes\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 5);

        let alcohol = dataset.column_index("AlcoholDrinking").unwrap();
        assert_eq!(dataset.unique_values(alcohol), vec!["none", "NONE", "Na", "heavy"]);
    }

    #[test]
    fn unique_values_keep_first_seen_order() {
        let dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();
        let smoker = dataset.column_index("Smoker").unwrap();
        assert_eq!(dataset.unique_values(smoker), vec!["yes", "no"]);
        let diabetic = dataset.column_index("Diabetic").unwrap();
        assert_eq!(dataset.unique_values(diabetic), vec!["no", "yes"]);
    }

    #[test]
    fn trims_whitespace() {
        let dataset = Dataset::from_reader(" A , B \n x , y \n".as_bytes()).unwrap();
        assert_eq!(dataset.columns(), &["A", "B"]);
        assert_eq!(dataset.rows().next().unwrap(), &["x", "y"]);
    }

    #[test]
    fn rejects_duplicate_columns() {
        let err = Dataset::from_reader("A,A\nx,y\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("duplicate column"));
    }

    #[test]
    fn from_rows_applies_cleaning() {
        let dataset = Dataset::from_rows(
            ["Smoker", "HeartProblem"],
            vec![vec!["yes", "yes"], vec!["", "no"], vec!["no", "null"], vec!["no", "no"]],
        )
        .unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let dataset = Dataset::from_path(file.path()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::from_path(dir.path().join("absent.csv")).unwrap_err();
        assert!(err.to_string().contains("failed to open dataset"));
    }
}
