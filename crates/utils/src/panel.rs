//! Panel column access and validation.

use polars::prelude::*;

use crate::UtilsError;

/// Check that every required column is present.
///
/// All missing names are reported together.
///
/// # Errors
/// Returns `UtilsError::MissingColumns` if any column is absent.
pub fn validate_columns<S: AsRef<str>>(df: &DataFrame, required: &[S]) -> Result<(), UtilsError> {
    let present = df.get_column_names();
    let missing: Vec<String> = required
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !present.iter().any(|p| p.as_str() == *name))
        .map(str::to_string)
        .collect();

    if missing.is_empty() { Ok(()) } else { Err(UtilsError::MissingColumns(missing)) }
}

/// Read a column as `f64`, with nulls and unparsable cells as NaN.
///
/// # Errors
/// Returns error if the column is missing or cannot be cast.
pub fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, UtilsError> {
    let casted = df
        .column(name)
        .map_err(|_| UtilsError::MissingColumn(name.to_string()))?
        .cast(&DataType::Float64)?;

    Ok(casted.f64()?.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// Read a column as string keys, nulls as `None`.
///
/// Works for string, integer and date columns alike.
///
/// # Errors
/// Returns error if the column is missing or cannot be cast.
pub fn key_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, UtilsError> {
    let casted = df
        .column(name)
        .map_err(|_| UtilsError::MissingColumn(name.to_string()))?
        .cast(&DataType::String)?;

    Ok(casted.str()?.into_iter().map(|v| v.map(str::to_string)).collect())
}

/// Stable sort of a panel by entity, then date.
///
/// # Errors
/// Returns error if either column is missing.
pub fn sort_panel(df: DataFrame, entity_col: &str, date_col: &str) -> Result<DataFrame, UtilsError> {
    let sorted = df
        .lazy()
        .sort([entity_col, date_col], SortMultipleOptions::new().with_maintain_order(true))
        .collect()?;
    Ok(sorted)
}

/// Reject repeated (entity, date) pairs in a panel sorted by entity and date.
///
/// # Errors
/// Returns `UtilsError::DuplicateObservation` for the first repeated pair.
pub fn check_unique_observations(
    entities: &[Option<String>],
    dates: &[Option<String>],
) -> Result<(), UtilsError> {
    if entities.len() != dates.len() {
        return Err(UtilsError::InvalidParameter(format!(
            "entity and date keys differ in length: {} vs {}",
            entities.len(),
            dates.len()
        )));
    }

    for i in 1..entities.len() {
        if let (Some(entity), Some(date)) = (&entities[i], &dates[i])
            && entities[i - 1].as_ref() == Some(entity)
            && dates[i - 1].as_ref() == Some(date)
        {
            return Err(UtilsError::DuplicateObservation {
                entity: entity.clone(),
                date: date.clone(),
            });
        }
    }

    Ok(())
}

/// Append a new `Float64` column.
///
/// # Errors
/// Returns `UtilsError::ColumnExists` if the name is taken, or a polars error
/// if the length does not match the panel.
pub fn attach_column(df: &mut DataFrame, name: &str, values: Vec<f64>) -> Result<(), UtilsError> {
    if df.get_column_names().iter().any(|c| c.as_str() == name) {
        return Err(UtilsError::ColumnExists(name.to_string()));
    }
    df.with_column(Column::new(name.into(), values))?;
    Ok(())
}

/// Remove the named columns that exist on the panel, returning their names.
///
/// # Errors
/// Returns error if polars fails to drop a column.
pub fn drop_existing<S: AsRef<str>>(df: &mut DataFrame, names: &[S]) -> Result<Vec<String>, UtilsError> {
    let mut dropped = Vec::new();
    for name in names.iter().map(AsRef::as_ref) {
        if df.get_column_names().iter().any(|c| c.as_str() == name) {
            df.drop_in_place(name)?;
            dropped.push(name.to_string());
        }
    }
    Ok(dropped)
}
