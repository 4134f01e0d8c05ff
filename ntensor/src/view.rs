use super::*;

/// A borrowed rectangular window into a 2D tensor.
///
/// The view keeps the parent's row and column strides, so it addresses the parent's rows at an offset
/// rather than describing an independent geometry. `data` starts at the view's first element and runs to the
/// end of the parent buffer; element `(i, j)` lives at `i * strides[0] + j * strides[1]`.
///
/// Views are created by [`Tensor::slice`] and [`Tensor::quadrants`]. The borrow ties the view to its parent:
/// the parent can be neither dropped nor mutated while the view is alive.
pub struct View<'a, T> {
    pub(crate) data: &'a [T],
    pub(crate) shape: [usize; 2],
    pub(crate) strides: [usize; 2],
}

impl<T> Clone for View<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for View<'_, T> {}

impl<'a, T> View<'a, T> {
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn rows(&self) -> usize {
        self.shape[0]
    }

    pub fn cols(&self) -> usize {
        self.shape[1]
    }

    /// Returns the number of elements covered by the view.
    pub fn len(&self) -> usize {
        self.shape[0] * self.shape[1]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets element at `(row, col)` relative to the view's origin.
    pub fn get(&self, row: usize, col: usize) -> Result<&'a T> {
        if row >= self.shape[0] || col >= self.shape[1] {
            return Err(TensorError::IndexOutOfBounds(format!(
                "Index ({row}, {col}) out of bounds for view of shape {}",
                diag::format_shape(&self.shape)
            )));
        }
        Ok(&self.data[row * self.strides[0] + col * self.strides[1]])
    }

    /// Returns the contiguous elements of one view row.
    pub fn row(&self, row: usize) -> &'a [T] {
        if row >= self.shape[0] {
            fatal!(
                "row {row} out of bounds for view of shape {}",
                diag::format_shape(&self.shape)
            );
        }
        let start = row * self.strides[0];
        &self.data[start..start + self.shape[1]]
    }
}

impl<T: Clone> View<'_, T> {
    /// Copies the viewed elements into a new contiguous tensor.
    pub fn to_tensor(&self, config: TensorConfig) -> Tensor<T> {
        let data = self.iter().cloned().collect();
        Tensor {
            data,
            shape: self.shape.to_vec(),
            strides: vec![self.shape[1], 1],
            config,
        }
    }
}

impl<T> std::ops::Index<(usize, usize)> for View<'_, T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        match self.get(row, col) {
            Ok(value) => value,
            Err(err) => fatal!("cannot index view: {err}"),
        }
    }
}
