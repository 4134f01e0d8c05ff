use num_traits::Num;

/// Element arithmetic used by the matrix multiplication kernels.
///
/// The recursive kernel forms quadrant differences such as `B21 - B11` whose intermediate values may fall
/// outside the range of the element type even when the final product does not. Integer types therefore use
/// wrapping arithmetic, which is exact modulo `2^bits` and yields the true product whenever it fits.
/// Floating point types use ordinary arithmetic.
pub trait Element: Copy + Num {
    fn ring_add(self, rhs: Self) -> Self;
    fn ring_sub(self, rhs: Self) -> Self;
    fn ring_mul(self, rhs: Self) -> Self;
}

macro_rules! impl_element_wrapping {
    ($($t:ty),+) => {
        $(
            impl Element for $t {
                #[inline]
                fn ring_add(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                #[inline]
                fn ring_sub(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }

                #[inline]
                fn ring_mul(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }
            }
        )+
    };
}

macro_rules! impl_element_float {
    ($($t:ty),+) => {
        $(
            impl Element for $t {
                #[inline]
                fn ring_add(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline]
                fn ring_sub(self, rhs: Self) -> Self {
                    self - rhs
                }

                #[inline]
                fn ring_mul(self, rhs: Self) -> Self {
                    self * rhs
                }
            }
        )+
    };
}

impl_element_wrapping!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_element_float!(f32, f64);
