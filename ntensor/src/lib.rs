//! Library crate for ntensor
//!

#[macro_use]
mod diag;

mod config;
mod constructive;
mod display;
mod element;
mod error;
mod iterator;
mod math;
mod matmul;
mod misc;
mod slicing;
mod strassen;
mod view;

pub use crate::config::TensorConfig;
pub use crate::element::Element;
pub use crate::error::TensorError;
pub use crate::iterator::ViewElements;
pub use crate::matmul::MatmulKernel;
pub use crate::view::View;

pub type Result<T> = std::result::Result<T, error::TensorError>;

/// Represents a dense multi-dimensional tensor with generic element type T.
///
/// The tensor exclusively owns a contiguous row-major buffer. Shape and strides are fixed at construction:
/// `strides[i]` is the product of all extents after dimension `i`, so the last stride is always 1.
///
/// Rectangular windows into a 2D tensor are borrowed as [`View`]s (see [`Tensor::slice`]). A view holds a
/// shared borrow of the buffer, so the tensor cannot be mutated or dropped while a view over it is alive.
///
/// # Performance
/// Matrix multiplication switches between a direct triple loop and a recursive seven-product block algorithm
/// depending on [`TensorConfig::direct_threshold`].
#[derive(Clone)]
pub struct Tensor<T> {
    data: Vec<T>,
    shape: Vec<usize>,
    strides: Vec<usize>,
    config: TensorConfig,
}

impl<T> Tensor<T> {
    /// Returns the underlying row-major buffer.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns the underlying row-major buffer for writing.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Returns the rank (number of dimensions).
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Returns the number of elements, which always equals the buffer length.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn config(&self) -> &TensorConfig {
        &self.config
    }

    /// Gets element at multi-dimensional index.
    pub fn get(&self, position: &[usize]) -> Result<&T> {
        let offset = self.offset_of(position)?;
        Ok(&self.data[offset])
    }

    /// Gets mutable element at multi-dimensional index.
    pub fn get_mut(&mut self, position: &[usize]) -> Result<&mut T> {
        let offset = self.offset_of(position)?;
        Ok(&mut self.data[offset])
    }

    fn offset_of(&self, position: &[usize]) -> Result<usize> {
        if position.len() != self.shape.len() {
            return Err(TensorError::IndexArity {
                expected: self.shape.len(),
                actual: position.len(),
            });
        }

        let mut offset = 0;
        for (dim, (&idx, (&extent, &stride))) in position
            .iter()
            .zip(self.shape.iter().zip(self.strides.iter()))
            .enumerate()
        {
            if idx >= extent {
                return Err(TensorError::IndexOutOfBounds(format!(
                    "Index {idx} out of bounds for dimension {dim} with size {extent}"
                )));
            }
            offset += idx * stride;
        }

        Ok(offset)
    }

    fn offset_or_fatal(&self, position: &[usize]) -> usize {
        match self.offset_of(position) {
            Ok(offset) => offset,
            Err(err) => fatal!(
                "cannot index tensor of shape {} with {}: {err}",
                diag::format_shape(&self.shape),
                diag::format_shape(position)
            ),
        }
    }

    fn compute_strides(shape: &[usize]) -> Vec<usize> {
        let mut strides = vec![1; shape.len()];
        for i in (0..shape.len().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * shape[i + 1];
        }
        strides
    }
}

impl<T> std::ops::Index<&[usize]> for Tensor<T> {
    type Output = T;

    fn index(&self, position: &[usize]) -> &T {
        &self.data[self.offset_or_fatal(position)]
    }
}

impl<T> std::ops::IndexMut<&[usize]> for Tensor<T> {
    fn index_mut(&mut self, position: &[usize]) -> &mut T {
        let offset = self.offset_or_fatal(position);
        &mut self.data[offset]
    }
}

impl<T, const K: usize> std::ops::Index<[usize; K]> for Tensor<T> {
    type Output = T;

    fn index(&self, position: [usize; K]) -> &T {
        &self[&position[..]]
    }
}

impl<T, const K: usize> std::ops::IndexMut<[usize; K]> for Tensor<T> {
    fn index_mut(&mut self, position: [usize; K]) -> &mut T {
        &mut self[&position[..]]
    }
}
