//! Diagnostics shared by the tensor modules.
//!
//! Recoverable conditions are returned as [`crate::TensorError`]. Contract violations raised through the
//! panicking accessors go through [`fatal!`], which records the message as a `tracing` error event and then
//! panics with the same text.

/// Emits an error event and panics with the formatted message.
macro_rules! fatal {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        ::tracing::error!(target: "ntensor", "{message}");
        panic!("{message}")
    }};
}

/// Formats a shape or coordinate tuple as `(d0, d1, ...)`.
pub(crate) fn format_shape(shape: &[usize]) -> String {
    let dims = shape.iter().map(ToString::to_string).collect::<Vec<_>>();
    format!("({})", dims.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_shapes_like_tuples() {
        assert_eq!(format_shape(&[]), "()");
        assert_eq!(format_shape(&[7]), "(7)");
        assert_eq!(format_shape(&[64, 64]), "(64, 64)");
    }

    #[test]
    #[should_panic(expected = "rank 3 is not supported")]
    fn fatal_panics_with_message() {
        fatal!("rank {} is not supported", 3);
    }
}
