use super::*;
use std::fmt;

fn write_flat<'a, T, I>(f: &mut fmt::Formatter<'_>, shape: &[usize], elements: I) -> fmt::Result
where
    T: fmt::Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    write!(f, "shape={} [", diag::format_shape(shape))?;
    for (i, value) in elements.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        value.fmt(f)?;
    }
    write!(f, "]")
}

/// Writes a flattened dump: the shape followed by all elements in row-major order.
impl<T: fmt::Display> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_flat(f, &self.shape, &self.data)
    }
}

impl<T: fmt::Display> fmt::Display for View<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_flat(f, &self.shape, self.iter())
    }
}

impl<T: fmt::Display> Tensor<T> {
    /// Prints the flattened dump to stdout.
    pub fn print_flat(&self) {
        println!("{self}");
    }
}

impl<T: fmt::Display> View<'_, T> {
    /// Prints the flattened dump to stdout.
    pub fn print_flat(&self) {
        println!("{self}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_display_tensor() -> Result<()> {
        let tensor = Tensor::<i32>::try_from(vec![[1, 2], [3, 4]])?;
        assert_eq!(tensor.to_string(), "shape=(2, 2) [1, 2, 3, 4]");

        let floats = Tensor::from(vec![0.5f32, 2.0]);
        assert_eq!(format!("{floats:.1}"), "shape=(2) [0.5, 2.0]");

        Ok(())
    }

    #[test]
    fn can_display_view() -> Result<()> {
        let tensor = Tensor::from_fn(&[3, 3], TensorConfig::default(), |p| p[0] * 3 + p[1]);
        let view = tensor.slice(1, 3, 1, 3)?;

        assert_eq!(view.to_string(), "shape=(2, 2) [4, 5, 7, 8]");
        assert_eq!(tensor.slice(0, 0, 0, 3)?.to_string(), "shape=(0, 3) []");

        Ok(())
    }
}
