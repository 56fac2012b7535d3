//! Date and extent sub-structures.

use crate::Row;
use dlc_model::{Date, DateType, Extent, ExtentPortion, DATE_LABEL_CREATION, NO_DATE_EXPRESSION};

/// Build a creation date from a date cell.
///
/// Any hyphen makes the date inclusive (`1990-1995`); otherwise it is single.
/// The cell text is kept verbatim as the expression.
pub fn format_date(value: Option<&str>) -> Option<Date> {
    let text = value?;
    let date_type = if text.contains('-') {
        DateType::Inclusive
    } else {
        DateType::Single
    };
    let expression = if text.is_empty() {
        NO_DATE_EXPRESSION
    } else {
        text
    };

    Some(Date {
        date_type,
        label: DATE_LABEL_CREATION.to_string(),
        expression: expression.to_string(),
    })
}

/// Build an extent from a row's extent cells.
///
/// Requires both the extent number and type; the portion defaults to `part`.
pub fn format_extent(row: &Row, portion: Option<ExtentPortion>) -> Option<Extent> {
    let number = row.extent_number.as_ref()?;
    let extent_type = row.extent_type.as_ref()?;

    Some(Extent {
        portion: portion.unwrap_or_default(),
        extent_type: extent_type.clone(),
        number: number.clone(),
        physical_details: row.extent_physical_details.clone(),
        dimensions: row.extent_dimensions.clone(),
    })
}
