use cgmath::{Matrix, Matrix3};

use crate::error::FieldError;

/// Rows and columns of the grid
pub const GRID_SIZE: usize = 3;

/// Number of entries in the grid
pub const FIELD_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Text contents of the 3x3 matrix entry grid
///
/// Entries are stored row-major by their visual position: `(row, col)` lives
/// at flat index `row * 3 + col` and becomes matrix element `M[row][col]`, so
/// a vertex is transformed as `v' = M * v`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGrid {
    entries: [String; FIELD_COUNT],
}

impl Default for FieldGrid {
    fn default() -> Self {
        Self::identity()
    }
}

impl FieldGrid {
    /// Grid showing the identity matrix: "1" on the diagonal, "0" elsewhere
    pub fn identity() -> Self {
        Self {
            entries: std::array::from_fn(|index| identity_text(index).to_string()),
        }
    }

    /// Grid with the given texts in row-major order
    pub fn from_entries(entries: [&str; FIELD_COUNT]) -> Self {
        Self {
            entries: entries.map(str::to_string),
        }
    }

    /// # Panics
    /// Panics if `row` or `col` is not below [`GRID_SIZE`].
    pub fn entry(&self, row: usize, col: usize) -> &str {
        &self.entries[flat_index(row, col)]
    }

    /// Mutable access for in-place text editing widgets
    ///
    /// # Panics
    /// Panics if `row` or `col` is not below [`GRID_SIZE`].
    pub fn entry_mut(&mut self, row: usize, col: usize) -> &mut String {
        &mut self.entries[flat_index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, text: impl Into<String>) {
        *self.entry_mut(row, col) = text.into();
    }

    /// All entries in row-major order
    pub fn entries(&self) -> &[String; FIELD_COUNT] {
        &self.entries
    }

    pub fn reset_identity(&mut self) {
        *self = Self::identity();
    }

    /// Parses every entry and assembles the matrix
    ///
    /// Entries are read in row-major order and surrounding whitespace is
    /// ignored. The first entry that is not a finite number is reported.
    pub fn parse_matrix(&self) -> Result<Matrix3<f32>, FieldError> {
        let mut values = [0.0f32; FIELD_COUNT];
        for (index, (value, text)) in values.iter_mut().zip(&self.entries).enumerate() {
            *value = parse_field(index, text)?;
        }

        // `Matrix3::new` takes columns; the values are rows.
        #[rustfmt::skip]
        let rows = Matrix3::new(
            values[0], values[1], values[2],
            values[3], values[4], values[5],
            values[6], values[7], values[8],
        );
        Ok(rows.transpose())
    }
}

fn flat_index(row: usize, col: usize) -> usize {
    assert!(
        row < GRID_SIZE && col < GRID_SIZE,
        "grid position ({row}, {col}) out of range"
    );
    row * GRID_SIZE + col
}

fn identity_text(index: usize) -> &'static str {
    if index / GRID_SIZE == index % GRID_SIZE {
        "1"
    } else {
        "0"
    }
}

fn parse_field(index: usize, text: &str) -> Result<f32, FieldError> {
    let (row, col) = (index / GRID_SIZE, index % GRID_SIZE);
    let value: f32 = text.trim().parse().map_err(|_| FieldError::Unparseable {
        index,
        row,
        col,
        text: text.to_string(),
    })?;

    if !value.is_finite() {
        return Err(FieldError::NonFinite {
            index,
            row,
            col,
            text: text.to_string(),
        });
    }
    Ok(value)
}
