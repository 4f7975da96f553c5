//! Fixed-bandwidth sparse matrix storage.

use nalgebra::{ClosedAdd, DMatrix, Scalar};
use num::Zero;
use serde::{Deserialize, Serialize};

use crate::error::AssemblyError;

/// A square sparse matrix in fixed-bandwidth row-major (ELLPACK) layout.
///
/// The matrix stores at most `max_nonzeros_per_row` entries per row in two flat
/// buffers of length `nrows * max_nonzeros_per_row`: the values and the global
/// column index of each occupied slot. Within a row, each global column occupies
/// exactly one slot, and repeated contributions to the same `(row, col)` pair
/// accumulate into that slot.
///
/// Lifecycle: [`EllMatrix::clear`] zeroes the value buffer and resets slot
/// occupancy at the start of every assembly pass; the column-index buffer is
/// rewritten during the pass and is only meaningful for slots occupied since the
/// last clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllMatrix<T> {
    nrows: usize,
    max_nonzeros_per_row: usize,
    values: Vec<T>,
    column_indices: Vec<usize>,
    row_occupancy: Vec<usize>,
}

impl<T> EllMatrix<T>
where
    T: Scalar + Zero,
{
    pub fn new(nrows: usize, max_nonzeros_per_row: usize) -> Self {
        Self {
            nrows,
            max_nonzeros_per_row,
            values: vec![T::zero(); nrows * max_nonzeros_per_row],
            column_indices: vec![0; nrows * max_nonzeros_per_row],
            row_occupancy: vec![0; nrows],
        }
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.nrows
    }

    pub fn max_nonzeros_per_row(&self) -> usize {
        self.max_nonzeros_per_row
    }

    /// The flat value buffer, of length `nrows * max_nonzeros_per_row`.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The flat column-index buffer, of length `nrows * max_nonzeros_per_row`.
    pub fn column_indices(&self) -> &[usize] {
        &self.column_indices
    }

    /// The number of occupied slots.
    pub fn nnz(&self) -> usize {
        self.row_occupancy.iter().sum()
    }

    /// Zeroes all values and resets slot occupancy, preparing the matrix for a
    /// fresh assembly pass.
    pub fn clear(&mut self) {
        self.values.fill(T::zero());
        self.row_occupancy.fill(0);
    }

    /// Adds `value` to the entry at `(row, col)`.
    ///
    /// The first contribution to a given `(row, col)` pair since the last
    /// [`EllMatrix::clear`] claims the next free slot of the row; subsequent
    /// contributions accumulate into the same slot. Fails with
    /// [`AssemblyError::IndexOutOfRange`] if `row` or `col` is out of bounds or
    /// if the row already holds `max_nonzeros_per_row` distinct columns.
    pub fn add(&mut self, row: usize, col: usize, value: T) -> Result<(), AssemblyError>
    where
        T: ClosedAdd,
    {
        if row >= self.nrows {
            return Err(AssemblyError::IndexOutOfRange {
                index: row,
                len: self.nrows,
            });
        }
        if col >= self.nrows {
            return Err(AssemblyError::IndexOutOfRange {
                index: col,
                len: self.nrows,
            });
        }

        let start = row * self.max_nonzeros_per_row;
        let occupied = self.row_occupancy[row];
        for slot in 0..occupied {
            if self.column_indices[start + slot] == col {
                self.values[start + slot] += value;
                return Ok(());
            }
        }
        if occupied == self.max_nonzeros_per_row {
            return Err(AssemblyError::IndexOutOfRange {
                index: occupied,
                len: self.max_nonzeros_per_row,
            });
        }
        self.column_indices[start + occupied] = col;
        self.values[start + occupied] = value;
        self.row_occupancy[row] += 1;
        Ok(())
    }

    /// The value at `(row, col)`, or zero if the entry is unoccupied.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> T {
        let start = row * self.max_nonzeros_per_row;
        for slot in 0..self.row_occupancy[row] {
            if self.column_indices[start + slot] == col {
                return self.values[start + slot].clone();
            }
        }
        T::zero()
    }

    /// Densifies the matrix, mostly useful for testing and diagnostics.
    pub fn to_dense(&self) -> DMatrix<T>
    where
        T: ClosedAdd,
    {
        let mut dense = DMatrix::zeros(self.nrows, self.nrows);
        for row in 0..self.nrows {
            let start = row * self.max_nonzeros_per_row;
            for slot in 0..self.row_occupancy[row] {
                let col = self.column_indices[start + slot];
                dense[(row, col)] += self.values[start + slot].clone();
            }
        }
        dense
    }
}
