use super::*;
use tracing::debug;

/// The kernel `matmul` runs for a given left operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatmulKernel {
    /// Triple loop over rows of both operands.
    Direct,
    /// Seven-product block recursion, falling back to the direct kernel on small blocks.
    Recursive,
}

impl<T> Tensor<T> {
    /// Returns the kernel `matmul` picks for this tensor as the left operand.
    pub fn kernel_for(&self) -> MatmulKernel {
        if self.size() < self.config.direct_threshold {
            MatmulKernel::Direct
        } else {
            MatmulKernel::Recursive
        }
    }

    /// Checks that both operands are matrices with matching inner extents and returns `(m, k, n)`.
    pub(crate) fn matmul_dims(&self, other: &Tensor<T>) -> Result<(usize, usize, usize)> {
        for rank in [self.shape.len(), other.shape.len()] {
            if rank != 2 {
                return Err(TensorError::UnsupportedRank { op: "matmul", rank });
            }
        }

        let (m, k) = (self.shape[0], self.shape[1]);
        let (k2, n) = (other.shape[0], other.shape[1]);
        if k != k2 {
            return Err(TensorError::shape_mismatch(&self.shape, &other.shape));
        }

        Ok((m, k, n))
    }
}

impl<T: Element> Tensor<T> {
    /// Performs matrix multiplication between two 2D tensors.
    ///
    /// Left operands holding fewer than [`TensorConfig::direct_threshold`] elements use the direct kernel;
    /// larger ones use the recursive block algorithm, whose half-size blocks are dispatched the same way.
    /// Both produce a new `m × n` tensor carrying `self`'s config. Integer elements wrap on overflow.
    /// Returns an error for ranks other than 2 or when the inner extents differ.
    pub fn matmul(&self, other: &Tensor<T>) -> Result<Tensor<T>> {
        let (m, k, n) = self.matmul_dims(other)?;
        debug!(target: "ntensor", m, k, n, kernel = ?self.kernel_for(), "matmul");

        self.dispatch(other, m, k, n)
    }

    /// Multiplies two 2D tensors with the direct kernel regardless of size.
    pub fn matmul_direct(&self, other: &Tensor<T>) -> Result<Tensor<T>> {
        let (m, k, n) = self.matmul_dims(other)?;
        Ok(self.multiply_direct(other, m, k, n))
    }

    /// Multiplies two 2D tensors with the recursive block algorithm regardless of size.
    ///
    /// Only the outermost level is forced; the half-size blocks follow [`TensorConfig::direct_threshold`].
    pub fn matmul_recursive(&self, other: &Tensor<T>) -> Result<Tensor<T>> {
        let (m, k, n) = self.matmul_dims(other)?;
        self.multiply_recursive(other, m, k, n)
    }

    /// Multiplies `m × k` by `k × n` with the kernel picked by [`Tensor::kernel_for`].
    pub(crate) fn dispatch(&self, other: &Tensor<T>, m: usize, k: usize, n: usize) -> Result<Tensor<T>> {
        match self.kernel_for() {
            MatmulKernel::Direct => Ok(self.multiply_direct(other, m, k, n)),
            MatmulKernel::Recursive => self.multiply_recursive(other, m, k, n),
        }
    }

    // Every output element accumulates its products in ascending `l` order starting from zero.
    pub(crate) fn multiply_direct(&self, other: &Tensor<T>, m: usize, k: usize, n: usize) -> Tensor<T> {
        let mut result = Tensor::zeros(&[m, n], self.config);
        if n == 0 || k == 0 {
            return result;
        }

        for (lhs_row, out_row) in self.data.chunks_exact(k).zip(result.data.chunks_exact_mut(n)) {
            for (&a, rhs_row) in lhs_row.iter().zip(other.data.chunks_exact(n)) {
                for (c, &b) in out_row.iter_mut().zip(rhs_row) {
                    *c = c.ring_add(a.ring_mul(b));
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference<T: Copy + num_traits::Num>(a: &Tensor<T>, b: &Tensor<T>) -> Vec<T> {
        let (m, k, n) = (a.shape()[0], a.shape()[1], b.shape()[1]);
        let mut out = Vec::with_capacity(m * n);
        for i in 0..m {
            for j in 0..n {
                let mut sum = T::zero();
                for l in 0..k {
                    sum = sum + a[[i, l]] * b[[l, j]];
                }
                out.push(sum);
            }
        }
        out
    }

    #[test]
    fn test_matmul() -> Result<()> {
        let a = Tensor::from_vec((1..=12).collect(), &[3, 4], TensorConfig::default())?;
        let b = Tensor::from_vec((1..=12).collect(), &[4, 3], TensorConfig::default())?;
        let expected = Tensor::<i32>::try_from(vec![[70, 80, 90], [158, 184, 210], [246, 288, 330]])?;

        assert_eq!(a.kernel_for(), MatmulKernel::Direct);
        assert_eq!(a.matmul(&b)?, expected);
        assert_eq!(a.matmul_direct(&b)?, expected);
        assert_eq!(a.matmul_recursive(&b)?, expected);

        Ok(())
    }

    #[test]
    fn test_dispatch_by_threshold() {
        let tensor = Tensor::new(&[7, 7], 1i32, TensorConfig::default());
        assert_eq!(tensor.kernel_for(), MatmulKernel::Recursive);

        let tensor = Tensor::new(&[6, 6], 1i32, TensorConfig::default());
        assert_eq!(tensor.kernel_for(), MatmulKernel::Direct);

        let tensor = Tensor::new(&[6, 8], 1i32, TensorConfig::default());
        assert_eq!(tensor.size(), TensorConfig::default().direct_threshold);
        assert_eq!(tensor.kernel_for(), MatmulKernel::Recursive);

        let tensor = Tensor::new(&[1, 47], 1i32, TensorConfig::default());
        assert_eq!(tensor.kernel_for(), MatmulKernel::Direct);

        let tensor = Tensor::new(&[2, 2], 1i32, TensorConfig::default().with_direct_threshold(0));
        assert_eq!(tensor.kernel_for(), MatmulKernel::Recursive);
    }

    #[test]
    fn test_matmul_rectangular() -> Result<()> {
        let config = TensorConfig::default();
        let a = Tensor::from_fn(&[5, 9], config, |p| p[0] as i64 * 3 - p[1] as i64);
        let b = Tensor::from_fn(&[9, 2], config, |p| (p[0] * p[1]) as i64 + 1);

        let result = a.matmul(&b)?;
        assert_eq!(result.shape(), &[5, 2]);
        assert_eq!(result.data(), reference(&a, &b).as_slice());

        Ok(())
    }

    #[test]
    fn test_matmul_errors() {
        let config = TensorConfig::default();
        let a = Tensor::new(&[2, 3], 1.0f32, config);
        let b = Tensor::new(&[2, 3], 1.0f32, config);
        let cube = Tensor::new(&[2, 2, 2], 1.0f32, config);

        assert_eq!(
            a.matmul(&b).unwrap_err(),
            TensorError::ShapeMismatch { lhs: vec![2, 3], rhs: vec![2, 3] }
        );
        assert_eq!(
            cube.matmul(&a).unwrap_err(),
            TensorError::UnsupportedRank { op: "matmul", rank: 3 }
        );
        assert_eq!(
            a.matmul(&cube).unwrap_err(),
            TensorError::UnsupportedRank { op: "matmul", rank: 3 }
        );
    }

    #[test]
    fn test_matmul_empty_inner_extent() -> Result<()> {
        let config = TensorConfig::default();
        let a = Tensor::new(&[3, 0], 1, config);
        let b = Tensor::new(&[0, 2], 1, config);

        assert_eq!(a.matmul(&b)?, Tensor::zeros(&[3, 2], config));

        Ok(())
    }

    #[test]
    fn test_result_keeps_left_config() -> Result<()> {
        let config = TensorConfig::default().with_direct_threshold(5);
        let a = Tensor::new(&[2, 2], 1, config);
        let b = Tensor::new(&[2, 2], 1, TensorConfig::default());

        assert_eq!(a.matmul(&b)?.config(), &config);

        Ok(())
    }

    #[test]
    fn test_unsigned_matmul_default_config() -> Result<()> {
        let config = TensorConfig::default();
        let a = Tensor::from_fn(&[8, 8], config, |p| (p[0] * 8 + p[1]) as u32);
        let b = Tensor::from_fn(&[8, 8], config, |p| (p[1] * 8 + p[0]) as u32);

        assert_eq!(a.kernel_for(), MatmulKernel::Recursive);
        assert_eq!(a.matmul(&b)?.data(), reference(&a, &b).as_slice());
        assert_eq!(a.matmul_recursive(&b)?, a.matmul_direct(&b)?);

        Ok(())
    }
}
