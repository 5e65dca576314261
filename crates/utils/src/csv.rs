//! CSV panel input and output.

use std::{fs::File, path::Path, sync::Arc};

use polars::prelude::*;

use crate::UtilsError;

/// Read a CSV panel with a header row.
///
/// The entity column is always read as text so zero-padded codes such as
/// `000001` keep their padding. Other columns are inferred, with ISO dates
/// parsed as dates.
///
/// # Errors
/// Returns error if the file cannot be opened or parsed.
pub fn read_panel_csv(path: &Path, entity: &str) -> Result<DataFrame, UtilsError> {
    let overwrite = Schema::from_iter([Field::new(entity.into(), DataType::String)]);

    let panel = CsvReadOptions::default()
        .with_has_header(true)
        .with_schema_overwrite(Some(Arc::new(overwrite)))
        .map_parse_options(|opts| opts.with_try_parse_dates(true))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(panel)
}

/// Write a panel to CSV with a header row.
///
/// # Errors
/// Returns error if the file cannot be created or written.
pub fn write_panel_csv(panel: &mut DataFrame, path: &Path) -> Result<(), UtilsError> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(panel)?;
    Ok(())
}
