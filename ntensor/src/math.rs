use super::*;
use num_traits::{Num, NumCast};
use std::ops::MulAssign;

impl<T: Copy + Num> Tensor<T> {
    /// Adds two tensors of equal shape elementwise into a new tensor.
    /// Returns a shape mismatch error, leaving both operands untouched, if the shapes differ.
    pub fn add(&self, other: &Tensor<T>) -> Result<Tensor<T>> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Subtracts `other` from `self` elementwise into a new tensor.
    pub fn sub(&self, other: &Tensor<T>) -> Result<Tensor<T>> {
        self.zip_with(other, |a, b| a - b)
    }

    pub fn add_in_place(&mut self, other: &Tensor<T>) -> Result<&mut Self> {
        self.zip_assign(other, |a, b| a + b)
    }

    pub fn sub_in_place(&mut self, other: &Tensor<T>) -> Result<&mut Self> {
        self.zip_assign(other, |a, b| a - b)
    }

    /// Returns a copy of the tensor with every element multiplied by `k`.
    pub fn scalar_mult(&self, k: T) -> Tensor<T> {
        Tensor {
            data: self.data.iter().map(|&v| v * k).collect(),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            config: self.config,
        }
    }

    /// Multiplies every element by `k` in place.
    pub fn scale(&mut self, k: T) -> &mut Self {
        self.data.iter_mut().for_each(|v| *v = *v * k);
        self
    }

    /// Sums all elements; an empty tensor sums to zero.
    pub fn sum(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &v| acc + v)
    }

    pub(crate) fn zip_with<F>(&self, other: &Tensor<T>, f: F) -> Result<Tensor<T>>
    where
        F: Fn(T, T) -> T,
    {
        if self.shape != other.shape {
            return Err(TensorError::shape_mismatch(&self.shape, &other.shape));
        }

        Ok(Tensor {
            data: self.data.iter().zip(other.data.iter()).map(|(&a, &b)| f(a, b)).collect(),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            config: self.config,
        })
    }

    pub(crate) fn zip_assign<F>(&mut self, other: &Tensor<T>, f: F) -> Result<&mut Self>
    where
        F: Fn(T, T) -> T,
    {
        if self.shape != other.shape {
            return Err(TensorError::shape_mismatch(&self.shape, &other.shape));
        }

        self.data
            .iter_mut()
            .zip(other.data.iter())
            .for_each(|(a, &b)| *a = f(*a, b));

        Ok(self)
    }

    fn combine_views<F>(&mut self, a: &View<'_, T>, b: &View<'_, T>, f: F) -> Result<()>
    where
        F: Fn(T, T) -> T,
    {
        self.check_view_target(a)?;
        if a.shape != b.shape {
            return Err(TensorError::shape_mismatch(&a.shape, &b.shape));
        }

        let cols = a.cols().max(1);
        for (dst, (lhs, rhs)) in self.data.chunks_exact_mut(cols).zip(a.row_slices().zip(b.row_slices())) {
            for ((d, &x), &y) in dst.iter_mut().zip(lhs).zip(rhs) {
                *d = f(x, y);
            }
        }

        Ok(())
    }
}

impl<T: Element> Tensor<T> {
    /// Writes `a + b` into `self`, which must be a 2D tensor shaped like both views.
    /// Integer elements wrap on overflow.
    pub fn add_views(&mut self, a: &View<'_, T>, b: &View<'_, T>) -> Result<()> {
        self.combine_views(a, b, T::ring_add)
    }

    /// Writes `a - b` into `self`, which must be a 2D tensor shaped like both views.
    /// Integer elements wrap on overflow, so unsigned differences below zero are representable.
    pub fn sub_views(&mut self, a: &View<'_, T>, b: &View<'_, T>) -> Result<()> {
        self.combine_views(a, b, T::ring_sub)
    }
}

impl<T: Copy> Tensor<T> {
    /// Copies the elements of `view` into `self`, which must be a 2D tensor of the same shape.
    pub fn assign_view(&mut self, view: &View<'_, T>) -> Result<()> {
        self.check_view_target(view)?;

        let cols = view.cols().max(1);
        for (dst, src) in self.data.chunks_exact_mut(cols).zip(view.row_slices()) {
            dst.copy_from_slice(src);
        }

        Ok(())
    }

    fn check_view_target(&self, view: &View<'_, T>) -> Result<()> {
        if self.shape.as_slice() != view.shape() {
            return Err(TensorError::shape_mismatch(&self.shape, view.shape()));
        }
        Ok(())
    }
}

impl<T: Clone> Tensor<T> {
    /// Returns a rank-1 copy of the tensor holding the same elements in row-major order.
    pub fn flatten(&self) -> Tensor<T> {
        Tensor {
            data: self.data.clone(),
            shape: vec![self.data.len()],
            strides: vec![1],
            config: self.config,
        }
    }
}

impl<T: Copy + Num + NumCast> Tensor<T> {
    /// Computes `sum() / size()` using the division of `T`: integral types truncate.
    pub fn mean(&self) -> Result<T> {
        if self.data.is_empty() {
            return Err(TensorError::Empty("mean"));
        }

        let count = <T as NumCast>::from(self.data.len()).ok_or_else(|| {
            TensorError::CastError(format!(
                "Element count {} is not representable in the element type",
                self.data.len()
            ))
        })?;

        Ok(self.sum() / count)
    }
}

impl<T: Copy + PartialOrd> Tensor<T> {
    /// Returns the smallest element. Unordered values (NaN) never replace the current candidate.
    pub fn min(&self) -> Result<T> {
        self.select("min", |candidate, best| candidate < best)
    }

    /// Returns the largest element. Unordered values (NaN) never replace the current candidate.
    pub fn max(&self) -> Result<T> {
        self.select("max", |candidate, best| candidate > best)
    }

    fn select<F>(&self, op: &'static str, better: F) -> Result<T>
    where
        F: Fn(&T, &T) -> bool,
    {
        let (first, rest) = self.data.split_first().ok_or(TensorError::Empty(op))?;
        Ok(rest
            .iter()
            .fold(*first, |best, v| if better(v, &best) { *v } else { best }))
    }
}

impl<T: Copy + Num> MulAssign<T> for Tensor<T> {
    fn mul_assign(&mut self, k: T) {
        self.scale(k);
    }
}
