/// Row and column offsets of the 3x3 neighbourhood, in kernel order.
pub const OFFSETS: [isize; 3] = [-1, 0, 1];

pub type Kernel3 = [[f32; 3]; 3];

/// 3x3 motion-blur kernel derived from a single blur coefficient.
///
/// Conventions:
/// - `weights[dr + 1][dc + 1]` is the share of a cell's mass moved by
///   `(dr, dc)` rows and columns.
/// - centre `1 - b`, edge-adjacent neighbours `b / 6`, diagonals `b / 12`.
/// - weights sum to 1 for every `b`, so blurring conserves total mass.
/// - for `b` in `[0, 1]` every weight is non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct BlurKernel {
    blurring: f32,
    weights: Kernel3,
}

impl BlurKernel {
    pub fn new(blurring: f32) -> Self {
        let center = 1.0 - blurring;
        let adjacent = blurring / 6.0;
        let corner = blurring / 12.0;

        Self {
            blurring,
            weights: [
                [corner, adjacent, corner],
                [adjacent, center, adjacent],
                [corner, adjacent, corner],
            ],
        }
    }

    pub fn blurring(&self) -> f32 {
        self.blurring
    }

    pub fn center(&self) -> f32 {
        self.weights[1][1]
    }

    pub fn adjacent(&self) -> f32 {
        self.weights[0][1]
    }

    pub fn corner(&self) -> f32 {
        self.weights[0][0]
    }

    pub fn weights(&self) -> &Kernel3 {
        &self.weights
    }

    /// Weight for a move of `(dr, dc)`; both must be in `-1..=1`.
    pub fn weight(&self, dr: isize, dc: isize) -> f32 {
        assert!(
            (-1..=1).contains(&dr) && (-1..=1).contains(&dc),
            "kernel offset out of range"
        );
        self.weights[(dr + 1) as usize][(dc + 1) as usize]
    }

    pub fn sum(&self) -> f32 {
        self.weights.iter().flatten().sum()
    }

    pub(crate) fn same_coefficient(&self, blurring: f32) -> bool {
        self.blurring.to_bits() == blurring.to_bits()
    }
}
