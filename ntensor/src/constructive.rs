use super::*;
use num_traits::Zero;

impl<T: Clone> Tensor<T> {
    /// Creates a tensor of the given shape with every element set to `fill`.
    ///
    /// An empty shape yields a rank-0 scalar holding one element; a zero extent yields an empty tensor.
    pub fn new(shape: &[usize], fill: T, config: TensorConfig) -> Self {
        let size = shape.iter().product();
        Self {
            data: vec![fill; size],
            shape: shape.to_vec(),
            strides: Self::compute_strides(shape),
            config,
        }
    }
}

impl<T> Tensor<T> {
    /// Creates a tensor from a row-major buffer.
    /// Returns an error if the buffer length does not match the shape.
    pub fn from_vec(data: Vec<T>, shape: &[usize], config: TensorConfig) -> Result<Self> {
        let size: usize = shape.iter().product();
        if data.len() != size {
            return Err(TensorError::InvalidShape(format!(
                "Buffer of {} elements cannot have shape {}",
                data.len(),
                diag::format_shape(shape)
            )));
        }

        Ok(Self {
            data,
            shape: shape.to_vec(),
            strides: Self::compute_strides(shape),
            config,
        })
    }

    /// Creates a tensor by evaluating `f` at every coordinate in row-major order.
    pub fn from_fn<F>(shape: &[usize], config: TensorConfig, mut f: F) -> Self
    where
        F: FnMut(&[usize]) -> T,
    {
        let size: usize = shape.iter().product();
        let mut data = Vec::with_capacity(size);
        let mut position = vec![0; shape.len()];

        for _ in 0..size {
            data.push(f(&position));

            for dim in (0..shape.len()).rev() {
                position[dim] += 1;
                if position[dim] < shape[dim] {
                    break;
                }
                position[dim] = 0;
            }
        }

        Self {
            data,
            shape: shape.to_vec(),
            strides: Self::compute_strides(shape),
            config,
        }
    }
}

impl<T: Clone + Zero> Tensor<T> {
    pub fn zeros(shape: &[usize], config: TensorConfig) -> Self {
        Self::new(shape, T::zero(), config)
    }
}

impl<T> From<Vec<T>> for Tensor<T> {
    /// Wraps a vector as a rank-1 tensor with the default config.
    fn from(data: Vec<T>) -> Self {
        let shape = vec![data.len()];
        Self {
            data,
            strides: vec![1],
            shape,
            config: TensorConfig::default(),
        }
    }
}

impl<T, const C: usize> TryFrom<Vec<[T; C]>> for Tensor<T> {
    type Error = TensorError;

    /// Builds a 2D tensor from a list of rows.
    fn try_from(rows: Vec<[T; C]>) -> Result<Self> {
        let shape = [rows.len(), C];
        let data = rows.into_iter().flatten().collect();
        Tensor::from_vec(data, &shape, TensorConfig::default())
    }
}
