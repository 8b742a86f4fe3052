use std::collections::{HashMap, HashSet};

use log::{debug, info};

use crate::config::MergeOptions;
use crate::data::loader::parse_table;
use crate::data::model::{InputFile, Table};
use crate::data::transform::transform;
use crate::data::writer::write_table;
use crate::error::{MergeError, MergeResult};
use crate::order::MergeOrder;

pub const OUTPUT_FILE_NAME: &str = "combined.csv";
pub const OUTPUT_MIME: &str = "text/csv";

/// The combined download: serialized CSV plus a little bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutput {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
    pub columns: Vec<String>,
    pub row_count: usize,
}

/// Parse, transform and concatenate `files` in `order`, returning one CSV.
///
/// Fails without producing any output if the file list is empty, contains a
/// name twice, `order` is not a permutation of the names, or any file fails
/// to parse. The combined header is the union of all columns in the order
/// they are first seen along `order`.
pub fn merge(
    files: &[InputFile],
    order: &MergeOrder,
    options: &MergeOptions,
) -> MergeResult<MergeOutput> {
    let combined = combine(files, order, options)?;
    let bytes = write_table(&combined)?;

    info!(
        "merged {} file(s) into {} rows × {} columns",
        files.len(),
        combined.len(),
        combined.columns.len()
    );

    Ok(MergeOutput {
        file_name: OUTPUT_FILE_NAME,
        mime: OUTPUT_MIME,
        bytes,
        row_count: combined.len(),
        columns: combined.columns,
    })
}

/// The in-memory half of [`merge`]: the combined table before serialization.
pub fn combine(
    files: &[InputFile],
    order: &MergeOrder,
    options: &MergeOptions,
) -> MergeResult<Table> {
    if files.is_empty() {
        return Err(MergeError::EmptyInput);
    }

    let mut by_name: HashMap<&str, &InputFile> = HashMap::with_capacity(files.len());
    let mut names = Vec::with_capacity(files.len());
    let mut seen = HashSet::new();
    for file in files {
        if !seen.insert(file.name.as_str()) {
            return Err(MergeError::DuplicateFile {
                name: file.name.clone(),
            });
        }
        by_name.insert(file.name.as_str(), file);
        names.push(file.name.as_str());
    }

    order.validate(&names)?;

    let mut combined = Table::default();
    for name in order {
        let file = by_name[name.as_str()];
        let table = parse_table(&file.name, &file.content)?;
        let table = transform(&table, options);
        debug!("appending '{}' ({} rows)", file.name, table.len());
        combined.append(table);
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files() -> Vec<InputFile> {
        vec![
            InputFile::new("a.csv", "Name,P_X\na,1.4\n"),
            InputFile::new("b.csv", "Name,P_X\nb,2.6\n"),
        ]
    }

    #[test]
    fn output_metadata_is_fixed() {
        let out = merge(&files(), &MergeOrder::identity(&["a.csv", "b.csv"]), &MergeOptions::default()).unwrap();
        assert_eq!(out.file_name, "combined.csv");
        assert_eq!(out.mime, "text/csv");
        assert_eq!(out.row_count, 2);
        assert_eq!(out.columns, vec!["Name", "P_X"]);
        assert_eq!(out.bytes, b"Name,P_X\na,1\nb,3\n");
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = merge(&[], &MergeOrder::default(), &MergeOptions::default()).unwrap_err();
        assert_eq!(err, MergeError::EmptyInput);
    }

    #[test]
    fn duplicate_file_names_are_rejected() {
        let mut fs = files();
        fs.push(InputFile::new("a.csv", "Name\nz\n"));
        let err = merge(&fs, &MergeOrder::identity(&["a.csv", "b.csv", "a.csv"]), &MergeOptions::default())
            .unwrap_err();
        assert_eq!(err, MergeError::DuplicateFile { name: "a.csv".into() });
    }

    #[test]
    fn stale_order_is_an_order_mismatch() {
        let err = merge(&files(), &MergeOrder::identity(&["a.csv"]), &MergeOptions::default()).unwrap_err();
        assert!(matches!(err, MergeError::OrderMismatch { .. }));
    }

    #[test]
    fn parse_failure_names_the_file_and_emits_nothing() {
        let mut fs = files();
        fs.push(InputFile::new("broken.csv", "Name\n\"open\n"));
        let order = MergeOrder::identity(&["a.csv", "b.csv", "broken.csv"]);
        let err = merge(&fs, &order, &MergeOptions::default()).unwrap_err();
        assert!(matches!(err, MergeError::Parse { ref file, .. } if file == "broken.csv"));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let fs = files();
        let before = fs.clone();
        merge(&fs, &MergeOrder::identity(&["b.csv", "a.csv"]), &MergeOptions::default()).unwrap();
        assert_eq!(fs, before);
    }
}
