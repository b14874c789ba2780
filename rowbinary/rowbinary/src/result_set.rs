use rowbinary_core::{ColumnTypeRef, ElementDef, Value};

use crate::error::RowBinaryError;

/// Decoded `RowBinaryWithNamesAndTypes` result.
///
/// Every row holds exactly one value per column, in header order. Column names
/// are not required to be unique.
#[derive(Debug, Clone)]
pub struct ResultSet {
    names: Vec<String>,
    types: Vec<ColumnTypeRef>,
    rows: Vec<Vec<Value>>,
}

impl ResultSet {
    /// Build a result set from `(name, type)` pairs and rows.
    ///
    /// Fails with [`RowBinaryError::ShapeMismatch`] on the first row whose
    /// length differs from the column count.
    pub fn new(
        columns: Vec<(String, ColumnTypeRef)>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self, RowBinaryError> {
        check_shape(columns.len(), &rows)?;
        let (names, types) = columns.into_iter().unzip();
        Ok(Self { names, types, rows })
    }

    pub(crate) fn from_parts(
        names: Vec<String>,
        types: Vec<ColumnTypeRef>,
        rows: Vec<Vec<Value>>,
    ) -> Self {
        debug_assert_eq!(names.len(), types.len());
        Self { names, types, rows }
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn column_types(&self) -> &[ColumnTypeRef] {
        &self.types
    }

    /// Canonical type names, e.g. `Nullable(String)`.
    pub fn type_names(&self) -> Vec<String> {
        self.types.iter().map(|t| t.name()).collect()
    }

    pub fn type_defs(&self) -> Vec<ElementDef> {
        self.types.iter().map(|t| t.type_def()).collect()
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.names.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Values of one column, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    pub fn into_rows(self) -> Vec<Vec<Value>> {
        self.rows
    }
}

pub(crate) fn check_shape(columns: usize, rows: &[Vec<Value>]) -> Result<(), RowBinaryError> {
    match rows.iter().position(|row| row.len() != columns) {
        Some(row) => Err(RowBinaryError::ShapeMismatch {
            row,
            expected: columns,
            actual: rows[row].len(),
        }),
        None => Ok(()),
    }
}
