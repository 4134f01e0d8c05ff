use super::*;

impl<T> Tensor<T> {
    /// Borrows rows `row_start..row_end` and columns `col_start..col_end` of a tensor of rank at most 2.
    ///
    /// The view reuses the parent's row and column strides. A rank-1 tensor is treated as a single row.
    /// Returns an error for other ranks or when a range is reversed or exceeds the tensor's extents.
    pub fn slice(&self, row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> Result<View<'_, T>> {
        let (shape, strides) = match self.shape.len() {
            2 => ([self.shape[0], self.shape[1]], [self.strides[0], self.strides[1]]),
            1 => ([1, self.shape[0]], [self.shape[0], 1]),
            rank => return Err(TensorError::UnsupportedRank { op: "slice", rank }),
        };

        if row_start > row_end || row_end > shape[0] || col_start > col_end || col_end > shape[1] {
            return Err(TensorError::IndexOutOfBounds(format!(
                "Slice [{row_start}..{row_end}, {col_start}..{col_end}] out of bounds for shape {}",
                diag::format_shape(&shape)
            )));
        }

        let rows = row_end - row_start;
        let cols = col_end - col_start;
        let data = if rows == 0 || cols == 0 {
            &self.data[..0]
        } else {
            &self.data[row_start * strides[0] + col_start * strides[1]..]
        };

        Ok(View {
            data,
            shape: [rows, cols],
            strides,
        })
    }

    /// Splits a 2D tensor at its integer half-points into top-left, top-right, bottom-left and
    /// bottom-right views. Odd extents leave the extra row or column in the bottom/right quadrants.
    pub fn quadrants(&self) -> Result<[View<'_, T>; 4]> {
        if self.shape.len() != 2 {
            return Err(TensorError::UnsupportedRank {
                op: "quadrants",
                rank: self.shape.len(),
            });
        }

        let (rows, cols) = (self.shape[0], self.shape[1]);
        let (half_rows, half_cols) = (rows / 2, cols / 2);

        Ok([
            self.slice(0, half_rows, 0, half_cols)?,
            self.slice(0, half_rows, half_cols, cols)?,
            self.slice(half_rows, rows, 0, half_cols)?,
            self.slice(half_rows, rows, half_cols, cols)?,
        ])
    }
}

impl<T: Copy> Tensor<T> {
    /// Copies a 2D tensor into the rectangle of `self` whose top-left corner is `(row, col)`.
    /// Rows are copied one at a time using `self`'s row pitch.
    pub fn copy_block(&mut self, src: &Tensor<T>, row: usize, col: usize) -> Result<()> {
        if self.shape.len() != 2 || src.shape.len() != 2 {
            return Err(TensorError::UnsupportedRank {
                op: "copy_block",
                rank: if self.shape.len() != 2 { self.shape.len() } else { src.shape.len() },
            });
        }

        let (src_rows, src_cols) = (src.shape[0], src.shape[1]);
        if row + src_rows > self.shape[0] || col + src_cols > self.shape[1] {
            return Err(TensorError::IndexOutOfBounds(format!(
                "Block {} at ({row}, {col}) does not fit into shape {}",
                diag::format_shape(&src.shape),
                diag::format_shape(&self.shape)
            )));
        }

        let pitch = self.strides[0];
        for (i, src_row) in src.data.chunks_exact(src_cols.max(1)).take(src_rows).enumerate() {
            let start = (row + i) * pitch + col;
            self.data[start..start + src_cols].copy_from_slice(src_row);
        }

        Ok(())
    }
}
