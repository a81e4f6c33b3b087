use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("degenerate grid: {rows}x{cols} has no cells")]
    DegenerateGrid { rows: usize, cols: usize },
    #[error("ragged grid: row {row} has {actual} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("blurring coefficient {value} is outside [0, 1]")]
    InvalidBlurring { value: f32 },
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn messages_name_the_offending_values() {
        let ragged = Error::RaggedGrid {
            row: 2,
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            ragged.to_string(),
            "ragged grid: row 2 has 3 cells, expected 4"
        );

        let degenerate = Error::DegenerateGrid { rows: 0, cols: 5 };
        assert_eq!(degenerate.to_string(), "degenerate grid: 0x5 has no cells");

        let shape = Error::ShapeMismatch {
            expected: (3, 3),
            actual: (2, 3),
        };
        assert_eq!(shape.to_string(), "shape mismatch: expected (3, 3), got (2, 3)");
    }
}
