//! Ordered column templates.

use std::str::FromStr;

use tsfold_types::Columns;

use crate::{Column, FormatError, OutputRow, Result};

/// Default output template.
const DEFAULT_OUTPUT: &[Column] = &[
    Column::Date,
    Column::Open,
    Column::High,
    Column::Low,
    Column::Close,
    Column::Volume,
    Column::AdjClose,
];

/// Ordered, non-empty list of columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTemplate(Vec<Column>);

impl ColumnTemplate {
    /// Creates a template.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::EmptyTemplate`] if `columns` is empty.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(FormatError::EmptyTemplate);
        }
        Ok(Self(columns))
    }

    /// Infers the input template of a line from its field count.
    #[must_use]
    pub fn infer(fields: usize) -> Option<Self> {
        let tags = match fields {
            9 => "x,s,d,o,h,l,c,v,a",
            8 => "s,d,o,h,l,c,v,a",
            7 => "d,o,h,l,c,v,a",
            4 => "s,d,v,a",
            3 => "d,v,a",
            2 => "d,a",
            _ => return None,
        };
        tags.parse().ok()
    }

    /// Columns in template order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.0
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a template is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the template holds `column`.
    #[must_use]
    pub fn contains(&self, column: Column) -> bool {
        self.0.contains(&column)
    }

    /// Presence tag of the price columns this template carries.
    #[must_use]
    pub fn price_columns(&self) -> Columns {
        Columns::new(
            self.contains(Column::Open),
            self.contains(Column::High),
            self.contains(Column::Low),
            self.contains(Column::Close),
        )
    }

    /// Header row text.
    #[must_use]
    pub fn header(&self) -> String {
        let names: Vec<&str> = self.0.iter().map(Column::header_name).collect();
        names.join(",")
    }

    /// Renders one row.
    #[must_use]
    pub fn format(&self, row: &OutputRow<'_>) -> String {
        let fields: Vec<String> = self.0.iter().map(|column| row.field(*column)).collect();
        fields.join(",")
    }
}

impl Default for ColumnTemplate {
    fn default() -> Self {
        Self(DEFAULT_OUTPUT.to_vec())
    }
}

impl FromStr for ColumnTemplate {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        let columns = s
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Column>>>()?;
        Self::new(columns)
    }
}

impl std::fmt::Display for ColumnTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tags: Vec<&str> = self.0.iter().map(Column::tag).collect();
        write!(f, "{}", tags.join(","))
    }
}
