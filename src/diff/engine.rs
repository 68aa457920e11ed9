//! Core comparison engine.
//! Aligns two normalized tables on the `Name` column with a full outer join.

use crate::parser::schema::{CellValue, ProfileTable, Row};
use crate::utils::config::NAME_COLUMN;
use log::{debug, info};
use std::collections::{BTreeSet, HashMap};

use super::CompareError;

/// Where a column of the joined table takes its values from
#[derive(Debug, Clone, Copy)]
enum ColumnSource {
    Key,
    Left(usize),
    Right(usize),
}

/// Compare two tables by joining them on `Name`
///
/// # Arguments
/// * `left` - First table (e.g. the baseline run)
/// * `right` - Second table
/// * `left_label` / `right_label` - Suffixes for columns present in both
///
/// # Returns
/// One row per name found in either table, sorted by name, followed by the
/// unnamed rows of each input (left first), so no input row is dropped.
/// Columns present in both inputs appear twice, as `<column>_<left_label>` and
/// `<column>_<right_label>`; the side a name is absent from stays missing.
///
/// # Errors
/// * `CompareError::LabelCollision` - both labels are equal
/// * `CompareError::MissingKeyColumn` - a table has no `Name` column
/// * `CompareError::DuplicateKey` - a name occurs twice in one table
///
/// # Example
/// ```ignore
/// let joined = compare_tables(&baseline, &target, "old", "new")?;
/// ```
pub fn compare_tables(
    left: &ProfileTable,
    right: &ProfileTable,
    left_label: &str,
    right_label: &str,
) -> Result<ProfileTable, CompareError> {
    if left_label == right_label {
        return Err(CompareError::LabelCollision(left_label.to_string()));
    }

    let left_key = key_column(left, left_label)?;
    let right_key = key_column(right, right_label)?;
    let left_index = index_by_name(left, left_key, left_label)?;
    let right_index = index_by_name(right, right_key, right_label)?;

    let (columns, sources) = joined_columns(left, right, left_label, right_label);

    // Ordinal order of the union of names
    let names: BTreeSet<&str> = left_index
        .named
        .keys()
        .chain(right_index.named.keys())
        .copied()
        .collect();

    let mut joined = ProfileTable::new(columns);
    joined.totals_are_self_time = left.totals_are_self_time || right.totals_are_self_time;

    for name in names {
        let left_row = left_index.named.get(name).map(|&i| &left.rows[i]);
        let right_row = right_index.named.get(name).map(|&i| &right.rows[i]);
        joined.push_row(join_row(&sources, Some(name), left_row, right_row));
    }

    // Unnamed rows match nothing; each keeps its own side
    for &i in &left_index.unnamed {
        joined.push_row(join_row(&sources, None, Some(&left.rows[i]), None));
    }
    for &i in &right_index.unnamed {
        joined.push_row(join_row(&sources, None, None, Some(&right.rows[i])));
    }

    info!(
        "Compared {} ({} rows) with {} ({} rows): {} joined rows",
        left_label,
        left.len(),
        right_label,
        right.len(),
        joined.len()
    );

    Ok(joined)
}

/// Column index of `Name`
///
/// **Private** - internal validation
fn key_column(table: &ProfileTable, label: &str) -> Result<usize, CompareError> {
    table
        .column_index(NAME_COLUMN)
        .ok_or_else(|| CompareError::MissingKeyColumn(label.to_string()))
}

/// Rows of one input, keyed by name
struct NameIndex<'a> {
    named: HashMap<&'a str, usize>,
    /// Rows whose name cell is missing, in input order
    unnamed: Vec<usize>,
}

/// Map every name to its row, rejecting duplicates
fn index_by_name<'a>(
    table: &'a ProfileTable,
    key: usize,
    label: &str,
) -> Result<NameIndex<'a>, CompareError> {
    let mut index = NameIndex {
        named: HashMap::with_capacity(table.len()),
        unnamed: Vec::new(),
    };

    for (i, row) in table.rows.iter().enumerate() {
        let Some(name) = row[key].as_ref().and_then(|v| v.as_str()) else {
            debug!("Row {} of {} has no name, kept unmatched", i, label);
            index.unnamed.push(i);
            continue;
        };
        if index.named.insert(name, i).is_some() {
            return Err(CompareError::DuplicateKey {
                name: name.to_string(),
                label: label.to_string(),
            });
        }
    }

    Ok(index)
}

/// Assemble one output row from the matched input rows
fn join_row(
    sources: &[ColumnSource],
    name: Option<&str>,
    left_row: Option<&Row>,
    right_row: Option<&Row>,
) -> Row {
    sources
        .iter()
        .map(|source| match *source {
            ColumnSource::Key => name.map(CellValue::from),
            ColumnSource::Left(col) => left_row.and_then(|r| r[col].clone()),
            ColumnSource::Right(col) => right_row.and_then(|r| r[col].clone()),
        })
        .collect()
}

/// Output column names and where each one is filled from
///
/// Key first, then the left table's columns, then the right table's.
/// Only columns present on both sides get a label suffix.
fn joined_columns(
    left: &ProfileTable,
    right: &ProfileTable,
    left_label: &str,
    right_label: &str,
) -> (Vec<String>, Vec<ColumnSource>) {
    let mut columns = vec![NAME_COLUMN.to_string()];
    let mut sources = vec![ColumnSource::Key];

    for (i, column) in left.columns.iter().enumerate() {
        if column == NAME_COLUMN {
            continue;
        }
        let name = if right.column_index(column).is_some() {
            format!("{}_{}", column, left_label)
        } else {
            column.clone()
        };
        columns.push(name);
        sources.push(ColumnSource::Left(i));
    }

    for (i, column) in right.columns.iter().enumerate() {
        if column == NAME_COLUMN {
            continue;
        }
        let name = if left.column_index(column).is_some() {
            format!("{}_{}", column, right_label)
        } else {
            column.clone()
        };
        columns.push(name);
        sources.push(ColumnSource::Right(i));
    }

    (columns, sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::CellValue;

    fn table(columns: &[&str], rows: Vec<Row>) -> ProfileTable {
        let mut table = ProfileTable::new(columns.iter().copied());
        for row in rows {
            table.push_row(row);
        }
        table
    }

    #[test]
    fn test_joined_columns_suffix_only_overlap() {
        let a = table(&["Name", "Self CPU", "Input Shapes"], vec![]);
        let b = table(&["Name", "Self CPU", "Self CUDA"], vec![]);

        let (columns, _) = joined_columns(&a, &b, "a", "b");
        assert_eq!(
            columns,
            vec!["Name", "Self CPU_a", "Input Shapes", "Self CPU_b", "Self CUDA"]
        );
    }

    #[test]
    fn test_duplicate_key_is_error() {
        let a = table(
            &["Name", "Val"],
            vec![
                vec![Some("x".into()), Some(CellValue::Int(1))],
                vec![Some("x".into()), Some(CellValue::Int(2))],
            ],
        );
        let b = table(&["Name", "Val"], vec![]);

        let err = compare_tables(&a, &b, "a", "b").unwrap_err();
        assert!(matches!(err, CompareError::DuplicateKey { .. }));
        assert!(err.to_string().contains("grouped by input shape"));
    }

    #[test]
    fn test_unnamed_rows_are_kept() {
        let a = table(
            &["Name", "Val"],
            vec![vec![None, Some(CellValue::Int(1))], vec![Some("x".into()), Some(CellValue::Int(2))]],
        );
        let b = table(&["Name", "Val"], vec![vec![None, Some(CellValue::Int(3))]]);

        let joined = compare_tables(&a, &b, "a", "b").unwrap();
        assert_eq!(joined.names(), vec![Some("x"), None, None]);
        assert_eq!(joined.rows[1], vec![None, Some(CellValue::Int(1)), None]);
        assert_eq!(joined.rows[2], vec![None, None, Some(CellValue::Int(3))]);
    }

    #[test]
    fn test_self_time_flag_propagates() {
        let mut a = table(&["Name"], vec![]);
        a.totals_are_self_time = true;
        let b = table(&["Name"], vec![]);

        assert!(compare_tables(&a, &b, "a", "b").unwrap().totals_are_self_time);
    }
}
