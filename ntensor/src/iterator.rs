use super::*;

/// An iterator over the elements of a view in a row-major order.
pub struct ViewElements<'a, T> {
    view: View<'a, T>,
    row: usize,
    col: usize,
}

impl<'a, T> View<'a, T> {
    /// Returns an iterator over the elements of the view.
    /// This iterator traverses the view's elements in a row-major order.
    pub fn iter(&self) -> ViewElements<'a, T> {
        ViewElements {
            view: *self,
            row: 0,
            col: 0,
        }
    }

    /// Returns an iterator over the view's rows as contiguous slices.
    pub fn row_slices(&self) -> impl Iterator<Item = &'a [T]> {
        let view = *self;
        (0..view.rows()).map(move |row| view.row(row))
    }
}

impl<'a, T> Iterator for ViewElements<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.view.cols() == 0 || self.row >= self.view.rows() {
            return None;
        }

        let item = &self.view.data[self.row * self.view.strides[0] + self.col * self.view.strides[1]];

        self.col += 1;
        if self.col == self.view.cols() {
            self.col = 0;
            self.row += 1;
        }

        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.view.cols() == 0 || self.row >= self.view.rows() {
            0
        } else {
            (self.view.rows() - self.row) * self.view.cols() - self.col
        };
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for ViewElements<'_, T> {}

impl<'a, T> IntoIterator for &View<'a, T> {
    type Item = &'a T;
    type IntoIter = ViewElements<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
