use crate::Error;

/// Owned row-major grid with at least one row and one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, Error> {
        check_shape(rows, cols)?;
        let expected = checked_len(rows, cols).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self { rows, cols, data })
    }

    /// Builds a grid from nested rows, rejecting empty and ragged input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, Error> {
        let (n_rows, n_cols) = Self::shape_of_rows(&rows)?;
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            data.extend(row);
        }

        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn row(&self, r: usize) -> &[T] {
        assert!(r < self.rows, "row index out of bounds");
        let start = r * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn row_mut(&mut self, r: usize) -> &mut [T] {
        assert!(r < self.rows, "row index out of bounds");
        let start = r * self.cols;
        &mut self.data[start..start + self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks_exact(self.cols)
    }

    pub fn get(&self, r: usize, c: usize) -> Option<&T> {
        if r >= self.rows || c >= self.cols {
            return None;
        }
        self.data.get(r * self.cols + c)
    }

    pub fn get_mut(&mut self, r: usize, c: usize) -> Option<&mut T> {
        if r >= self.rows || c >= self.cols {
            return None;
        }
        self.data.get_mut(r * self.cols + c)
    }

    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Grid<T> {
    pub fn new_fill(rows: usize, cols: usize, value: T) -> Result<Self, Error> {
        check_shape(rows, cols)?;
        let len = checked_len(rows, cols).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: 0,
        })?;
        Ok(Self {
            rows,
            cols,
            data: vec![value; len],
        })
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.iter_rows().map(<[T]>::to_vec).collect()
    }
}

impl Grid<f32> {
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, Error> {
        Self::new_fill(rows, cols, 0.0)
    }

    /// Total mass, accumulated in `f64`.
    pub fn sum(&self) -> f32 {
        self.data.iter().map(|&v| v as f64).sum::<f64>() as f32
    }

    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }
}

impl<T> Grid<T> {
    /// Checks that nested rows form a non-empty rectangle and returns its
    /// shape without copying any cells.
    pub fn shape_of_rows(rows: &[Vec<T>]) -> Result<(usize, usize), Error> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if n_rows == 0 || n_cols == 0 {
            return Err(Error::DegenerateGrid {
                rows: n_rows,
                cols: n_cols,
            });
        }

        if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
            return Err(Error::RaggedGrid {
                row,
                expected: n_cols,
                actual: bad.len(),
            });
        }

        Ok((n_rows, n_cols))
    }
}

fn check_shape(rows: usize, cols: usize) -> Result<(), Error> {
    if rows == 0 || cols == 0 {
        return Err(Error::DegenerateGrid { rows, cols });
    }
    Ok(())
}

fn checked_len(rows: usize, cols: usize) -> Option<usize> {
    rows.checked_mul(cols)
}
