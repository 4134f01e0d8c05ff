//! Recursive block matrix multiplication.
//!
//! Each level splits both operands into quadrants and forms seven half-size products:
//!
//! ```text
//! m1 = (A11 + A22)(B11 + B22)     c11 = m1 + m2 - m3 + m4
//! m2 = A22 (B21 - B11)            c12 = m5 + m3
//! m3 = (A11 + A12) B22            c21 = m6 + m2
//! m4 = (A12 - A22)(B21 + B22)     c22 = m5 + m1 - m6 - m7
//! m5 = A11 (B12 - B22)
//! m6 = (A21 + A22) B11
//! m7 = (A11 - A21)(B11 + B12)
//! ```
//!
//! Operands of each product are gathered into two scratch tensors that are refilled in the order above; each
//! product is complete before the scratch tensors are overwritten. Odd extents are zero-padded to the next
//! even size for the level and the product is cropped back afterwards. The seven products go through the same
//! threshold dispatch as [`Tensor::matmul`], so blocks holding fewer than `direct_threshold` elements are
//! multiplied directly.
//!
//! Sums and differences use [`Element`] arithmetic: a difference such as `B21 - B11` may leave the range of an
//! unsigned type, and wrapping keeps the final product exact whenever it fits.

use super::*;
use tracing::trace;

/// Blocks with any extent at or below this size are multiplied directly.
const BASE_EXTENT: usize = 4;

impl<T: Element> Tensor<T> {
    pub(crate) fn multiply_recursive(&self, other: &Tensor<T>, m: usize, k: usize, n: usize) -> Result<Tensor<T>> {
        if m <= BASE_EXTENT || k <= BASE_EXTENT || n <= BASE_EXTENT {
            return Ok(self.multiply_direct(other, m, k, n));
        }

        if m % 2 == 0 && k % 2 == 0 && n % 2 == 0 {
            return self.multiply_blocks(other, m, k, n);
        }

        let (pm, pk, pn) = (m.next_multiple_of(2), k.next_multiple_of(2), n.next_multiple_of(2));
        trace!(target: "ntensor", m, k, n, pm, pk, pn, "padding odd extents");

        let lhs = self.padded(pm, pk)?;
        let rhs = other.padded(pk, pn)?;
        let product = lhs.multiply_blocks(&rhs, pm, pk, pn)?;

        Ok(product.slice(0, m, 0, n)?.to_tensor(self.config))
    }

    fn multiply_blocks(&self, other: &Tensor<T>, m: usize, k: usize, n: usize) -> Result<Tensor<T>> {
        let (hm, hk, hn) = (m / 2, k / 2, n / 2);
        trace!(target: "ntensor", m, k, n, "splitting into quadrants");

        let [a11, a12, a21, a22] = self.quadrants()?;
        let [b11, b12, b21, b22] = other.quadrants()?;

        let mut left = Tensor::zeros(&[hm, hk], self.config);
        let mut right = Tensor::zeros(&[hk, hn], self.config);

        left.add_views(&a11, &a22)?;
        right.add_views(&b11, &b22)?;
        let m1 = left.dispatch(&right, hm, hk, hn)?;

        left.assign_view(&a22)?;
        right.sub_views(&b21, &b11)?;
        let m2 = left.dispatch(&right, hm, hk, hn)?;

        left.add_views(&a11, &a12)?;
        right.assign_view(&b22)?;
        let m3 = left.dispatch(&right, hm, hk, hn)?;

        left.sub_views(&a12, &a22)?;
        right.add_views(&b21, &b22)?;
        let m4 = left.dispatch(&right, hm, hk, hn)?;

        left.assign_view(&a11)?;
        right.sub_views(&b12, &b22)?;
        let m5 = left.dispatch(&right, hm, hk, hn)?;

        left.add_views(&a21, &a22)?;
        right.assign_view(&b11)?;
        let m6 = left.dispatch(&right, hm, hk, hn)?;

        left.sub_views(&a11, &a21)?;
        right.add_views(&b11, &b12)?;
        let m7 = left.dispatch(&right, hm, hk, hn)?;

        let mut c22 = m5.zip_with(&m1, T::ring_add)?;
        c22.zip_assign(&m6, T::ring_sub)?.zip_assign(&m7, T::ring_sub)?;
        let c21 = m6.zip_with(&m2, T::ring_add)?;

        let mut c11 = m1;
        c11.zip_assign(&m2, T::ring_add)?
            .zip_assign(&m3, T::ring_sub)?
            .zip_assign(&m4, T::ring_add)?;
        let mut c12 = m5;
        c12.zip_assign(&m3, T::ring_add)?;

        let mut result = Tensor::zeros(&[m, n], self.config);
        result.copy_block(&c11, 0, 0)?;
        result.copy_block(&c12, 0, hn)?;
        result.copy_block(&c21, hm, 0)?;
        result.copy_block(&c22, hm, hn)?;

        Ok(result)
    }

    /// Returns a copy of a 2D tensor enlarged to `rows × cols` with zeros below and to the right.
    fn padded(&self, rows: usize, cols: usize) -> Result<Tensor<T>> {
        let mut result = Tensor::zeros(&[rows, cols], self.config);
        result.copy_block(self, 0, 0)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TensorConfig {
        TensorConfig::default().with_direct_threshold(0)
    }

    fn sample(rows: usize, cols: usize, seed: i64) -> Tensor<i64> {
        Tensor::from_fn(&[rows, cols], config(), |p| {
            ((p[0] as i64 * 31 + p[1] as i64 * 17 + seed) % 23) - 11
        })
    }

    #[test]
    fn test_power_of_two_matches_direct() -> Result<()> {
        let a = sample(32, 32, 1);
        let b = sample(32, 32, 2);

        assert_eq!(a.matmul_recursive(&b)?, a.matmul_direct(&b)?);

        Ok(())
    }

    #[test]
    fn test_odd_extents_are_padded() -> Result<()> {
        let a = sample(13, 11, 3);
        let b = sample(11, 9, 4);

        let product = a.matmul_recursive(&b)?;
        assert_eq!(product.shape(), &[13, 9]);
        assert_eq!(product, a.matmul_direct(&b)?);

        Ok(())
    }

    #[test]
    fn test_rectangular_even_extents() -> Result<()> {
        let a = sample(12, 20, 5);
        let b = sample(20, 6, 6);

        assert_eq!(a.matmul_recursive(&b)?, a.matmul_direct(&b)?);

        Ok(())
    }

    #[test]
    fn test_thin_operands_use_base_case() -> Result<()> {
        let a = sample(40, 3, 7);
        let b = sample(3, 40, 8);

        assert_eq!(a.matmul_recursive(&b)?, a.matmul_direct(&b)?);

        Ok(())
    }

    #[test]
    fn test_identity() -> Result<()> {
        let a = sample(10, 10, 9);
        let identity = Tensor::from_fn(&[10, 10], config(), |p| i64::from(p[0] == p[1]));

        assert_eq!(a.matmul(&identity)?, a);
        assert_eq!(identity.matmul(&a)?, a);

        Ok(())
    }

    #[test]
    fn test_float_within_tolerance() -> Result<()> {
        let a = Tensor::from_fn(&[24, 24], config(), |p| (p[0] as f64 + 1.0) / (p[1] as f64 + 2.0));
        let b = Tensor::from_fn(&[24, 24], config(), |p| (p[0] as f64 - p[1] as f64) * 0.25);

        let recursive = a.matmul_recursive(&b)?;
        let direct = a.matmul_direct(&b)?;
        for (x, y) in recursive.data().iter().zip(direct.data()) {
            assert!((x - y).abs() < 1e-9, "{x} != {y}");
        }

        Ok(())
    }

    #[test]
    fn test_padded() -> Result<()> {
        let a = Tensor::<i32>::try_from(vec![[1, 2, 3], [4, 5, 6]])?;
        let padded = a.padded(3, 4)?;

        assert_eq!(
            padded,
            Tensor::<i32>::try_from(vec![[1, 2, 3, 0], [4, 5, 6, 0], [0, 0, 0, 0]])?
        );

        Ok(())
    }

    #[test]
    fn test_unsigned_quadrant_differences() -> Result<()> {
        let a = Tensor::from_fn(&[8, 8], config(), |p| (p[0] * 8 + p[1]) as u32);
        let b = Tensor::from_fn(&[8, 8], config(), |p| (p[0] * 8 + p[1]) as u32);

        assert_eq!(a.matmul_recursive(&b)?, a.matmul_direct(&b)?);
        assert_eq!(a.matmul_recursive(&b)?[[0, 0]], (0..8u32).map(|l| l * l * 8).sum::<u32>());

        Ok(())
    }

    #[test]
    fn test_unsigned_odd_extents() -> Result<()> {
        let a = Tensor::from_fn(&[11, 9], config(), |p| ((p[0] * 7 + p[1] * 3) % 13) as u64);
        let b = Tensor::from_fn(&[9, 13], config(), |p| ((p[0] * 5 + p[1]) % 11) as u64);

        assert_eq!(a.matmul_recursive(&b)?, a.matmul_direct(&b)?);

        Ok(())
    }

    #[test]
    fn test_blocks_below_threshold_go_direct() -> Result<()> {
        let config = TensorConfig::default().with_direct_threshold(1024);
        let a = Tensor::from_fn(&[64, 64], config, |p| ((p[0] * 13 + p[1] * 7) % 19) as i64 - 9);
        let b = Tensor::from_fn(&[64, 64], config, |p| ((p[0] * 5 + p[1] * 11) % 17) as i64 - 8);

        let left = Tensor::<i64>::zeros(&[32, 32], config);
        assert_eq!(left.kernel_for(), MatmulKernel::Recursive);
        let left = Tensor::<i64>::zeros(&[16, 16], config);
        assert_eq!(left.kernel_for(), MatmulKernel::Direct);

        assert_eq!(a.matmul(&b)?, a.matmul_direct(&b)?);

        Ok(())
    }
}
