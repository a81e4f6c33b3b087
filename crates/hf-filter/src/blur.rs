use hf_core::{Error, Grid, wrap_offset};
use tracing::{debug, trace};

use crate::config::{BlurConfig, DomainPolicy};
use crate::kernel::{BlurKernel, OFFSETS};

/// Blurs `grid` once with the kernel for `blurring`.
///
/// Out-of-range coefficients are handled by [`DomainPolicy::Clamp`].
pub fn blur(grid: &Grid<f32>, blurring: f32) -> Result<Grid<f32>, Error> {
    let blurring = DomainPolicy::default().resolve(blurring)?;
    Ok(blur_with_kernel(grid, &BlurKernel::new(blurring)))
}

/// Scatters every cell of `grid` onto its 3x3 toroidal neighbourhood.
pub fn blur_with_kernel(grid: &Grid<f32>, kernel: &BlurKernel) -> Grid<f32> {
    let mut out = grid.map(|_| 0.0f32);
    scatter(grid, kernel, &mut out);
    out
}

/// Like [`blur_with_kernel`], writing into a caller-owned grid of the same
/// shape. `out` is overwritten.
pub fn blur_into(grid: &Grid<f32>, kernel: &BlurKernel, out: &mut Grid<f32>) -> Result<(), Error> {
    if out.shape() != grid.shape() {
        return Err(Error::ShapeMismatch {
            expected: grid.shape(),
            actual: out.shape(),
        });
    }

    out.fill(0.0);
    scatter(grid, kernel, out);
    Ok(())
}

/// Source cells are visited row-major and offsets `dr`-major, so results are
/// reproducible bit for bit.
fn scatter(src: &Grid<f32>, kernel: &BlurKernel, dst: &mut Grid<f32>) {
    let (rows, cols) = src.shape();
    trace!(rows, cols, blurring = kernel.blurring(), "blur");

    let weights = kernel.weights();
    for (r, src_row) in src.iter_rows().enumerate() {
        for (c, &v) in src_row.iter().enumerate() {
            for (ki, &dr) in OFFSETS.iter().enumerate() {
                let dst_row = dst.row_mut(wrap_offset(r, dr, rows));
                for (kj, &dc) in OFFSETS.iter().enumerate() {
                    dst_row[wrap_offset(c, dc, cols)] += v * weights[ki][kj];
                }
            }
        }
    }
}

/// Reusable blur step for a motion update loop.
///
/// Keeps the kernel of the last coefficient it saw and rebuilds it whenever a
/// call resolves to a different value.
#[derive(Debug, Clone)]
pub struct BlurFilter {
    config: BlurConfig,
    kernel: BlurKernel,
}

impl BlurFilter {
    pub fn new(policy: DomainPolicy) -> Self {
        Self {
            config: BlurConfig {
                domain: policy,
                ..BlurConfig::default()
            },
            kernel: BlurKernel::new(0.0),
        }
    }

    pub fn from_config(config: &BlurConfig) -> Result<Self, Error> {
        let blurring = config.domain.resolve(config.blurring)?;
        Ok(Self {
            config: BlurConfig {
                blurring,
                domain: config.domain,
            },
            kernel: BlurKernel::new(blurring),
        })
    }

    pub fn config(&self) -> &BlurConfig {
        &self.config
    }

    pub fn policy(&self) -> DomainPolicy {
        self.config.domain
    }

    /// Kernel for `blurring` after the domain policy has been applied.
    pub fn kernel_for(&mut self, blurring: f32) -> Result<&BlurKernel, Error> {
        let blurring = self.config.domain.resolve(blurring)?;
        if !self.kernel.same_coefficient(blurring) {
            self.kernel = BlurKernel::new(blurring);
            debug!(
                blurring,
                center = self.kernel.center(),
                adjacent = self.kernel.adjacent(),
                corner = self.kernel.corner(),
                "derived blur kernel"
            );
        }
        Ok(&self.kernel)
    }

    pub fn blur(&mut self, grid: &Grid<f32>, blurring: f32) -> Result<Grid<f32>, Error> {
        let kernel = self.kernel_for(blurring)?;
        Ok(blur_with_kernel(grid, kernel))
    }

    pub fn blur_into(
        &mut self,
        grid: &Grid<f32>,
        blurring: f32,
        out: &mut Grid<f32>,
    ) -> Result<(), Error> {
        let kernel = self.kernel_for(blurring)?;
        blur_into(grid, kernel, out)
    }

    /// Blurs with the configured coefficient.
    pub fn blur_step(&mut self, grid: &Grid<f32>) -> Result<Grid<f32>, Error> {
        self.blur(grid, self.config.blurring)
    }
}

impl Default for BlurFilter {
    fn default() -> Self {
        Self::new(DomainPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use hf_core::{Error, Grid};

    use super::{BlurFilter, blur, blur_into, blur_with_kernel};
    use crate::config::{BlurConfig, DomainPolicy};
    use crate::kernel::BlurKernel;

    fn impulse(rows: usize, cols: usize, r: usize, c: usize) -> Grid<f32> {
        let mut grid = Grid::zeros(rows, cols).expect("valid grid");
        *grid.get_mut(r, c).expect("in bounds") = 1.0;
        grid
    }

    fn ramp(rows: usize, cols: usize) -> Grid<f32> {
        let data = (0..rows * cols).map(|i| ((i * 7) % 13) as f32 * 0.1).collect();
        Grid::from_vec(rows, cols, data).expect("valid grid")
    }

    fn assert_grid_close(actual: &Grid<f32>, expected: &[[f32; 3]; 3]) {
        assert_eq!(actual.shape(), (3, 3));
        for (r, row) in expected.iter().enumerate() {
            for (c, &want) in row.iter().enumerate() {
                let got = *actual.get(r, c).expect("in bounds");
                assert!((got - want).abs() < 1e-6, "({r},{c}): got {got}, want {want}");
            }
        }
    }

    #[test]
    fn impulse_at_origin_on_3x3() {
        let out = blur(&impulse(3, 3, 0, 0), 0.12).expect("in-domain blur");

        assert_grid_close(
            &out,
            &[
                [0.88, 0.02, 0.02],
                [0.02, 0.01, 0.01],
                [0.02, 0.01, 0.01],
            ],
        );
    }

    #[test]
    fn impulse_in_interior_spreads_locally() {
        let out = blur(&impulse(5, 5, 2, 2), 0.6).expect("in-domain blur");
        let k = BlurKernel::new(0.6);

        for r in 0..5 {
            for c in 0..5 {
                let got = *out.get(r, c).expect("in bounds");
                let dr = r as isize - 2;
                let dc = c as isize - 2;
                let want = if dr.abs() <= 1 && dc.abs() <= 1 {
                    k.weight(dr, dc)
                } else {
                    0.0
                };
                assert_eq!(got, want, "({r},{c})");
            }
        }
    }

    #[test]
    fn wraps_diagonal_to_opposite_corner() {
        let out = blur(&impulse(4, 6, 0, 0), 0.5).expect("in-domain blur");
        let k = BlurKernel::new(0.5);

        assert_eq!(*out.get(3, 5).expect("in bounds"), k.corner());
        assert_eq!(*out.get(3, 0).expect("in bounds"), k.adjacent());
        assert_eq!(*out.get(0, 5).expect("in bounds"), k.adjacent());
        assert_eq!(*out.get(1, 5).expect("in bounds"), k.corner());
        assert_eq!(*out.get(2, 2).expect("in bounds"), 0.0);
    }

    #[test]
    fn zero_blurring_is_identity() {
        let grid = ramp(4, 7);
        let out = blur(&grid, 0.0).expect("in-domain blur");
        assert_eq!(out, grid);
    }

    #[test]
    fn full_blurring_empties_source_cell() {
        let out = blur(&impulse(3, 4, 1, 2), 1.0).expect("in-domain blur");

        assert_eq!(*out.get(1, 2).expect("in bounds"), 0.0);
        assert!((out.sum() - 1.0).abs() < 1e-6);
        assert!((out.get(0, 2).expect("in bounds") - 1.0 / 6.0).abs() < 1e-7);
        assert!((out.get(2, 3).expect("in bounds") - 1.0 / 12.0).abs() < 1e-7);
    }

    #[test]
    fn conserves_mass_and_shape() {
        for (rows, cols) in [(1, 1), (1, 5), (2, 2), (3, 3), (6, 4), (17, 9)] {
            let grid = ramp(rows, cols);
            let total = grid.sum();
            for b in [0.0, 0.12, 0.5, 0.9, 1.0] {
                let out = blur(&grid, b).expect("in-domain blur");
                assert_eq!(out.shape(), (rows, cols));
                let rel = (out.sum() - total).abs() / total.max(f32::MIN_POSITIVE);
                assert!(rel < 1e-5, "{rows}x{cols} b={b}: {} vs {total}", out.sum());
            }
        }
    }

    #[test]
    fn narrow_grids_fold_coinciding_neighbours() {
        let single = Grid::from_vec(1, 1, vec![0.4f32]).expect("valid grid");
        let out = blur(&single, 0.3).expect("in-domain blur");
        assert!((out.data()[0] - 0.4).abs() < 1e-6);

        // On a 2x2 torus the up and down neighbours are the same cell.
        let out = blur(&impulse(2, 2, 0, 0), 0.12).expect("in-domain blur");
        let k = BlurKernel::new(0.12);
        assert!((out.data()[0] - k.center()).abs() < 1e-6);
        assert!((out.data()[1] - 2.0 * k.adjacent()).abs() < 1e-6);
        assert!((out.data()[2] - 2.0 * k.adjacent()).abs() < 1e-6);
        assert!((out.data()[3] - 4.0 * k.corner()).abs() < 1e-6);
    }

    #[test]
    fn input_is_left_untouched() {
        let grid = ramp(3, 5);
        let before = grid.clone();
        let _ = blur(&grid, 0.4).expect("in-domain blur");
        assert_eq!(grid, before);
    }

    #[test]
    fn blur_into_matches_and_checks_shape() {
        let grid = ramp(5, 3);
        let k = BlurKernel::new(0.25);
        let mut out = Grid::new_fill(5, 3, 9.0f32).expect("valid grid");

        blur_into(&grid, &k, &mut out).expect("same shape");
        assert_eq!(out, blur_with_kernel(&grid, &k));

        let mut wrong = Grid::zeros(3, 5).expect("valid grid");
        assert_eq!(
            blur_into(&grid, &k, &mut wrong),
            Err(Error::ShapeMismatch {
                expected: (5, 3),
                actual: (3, 5),
            })
        );
    }

    #[test]
    fn out_of_domain_blurring_is_clamped_by_default() {
        let grid = ramp(3, 3);
        assert_eq!(
            blur(&grid, 1.7).expect("clamped"),
            blur(&grid, 1.0).expect("in domain")
        );
        assert_eq!(blur(&grid, -0.2).expect("clamped"), grid);
        assert!(blur(&grid, f32::NAN).is_err());
    }

    #[test]
    fn filter_rebuilds_kernel_when_coefficient_changes() {
        let grid = ramp(4, 4);
        let mut filter = BlurFilter::default();

        let a = filter.blur(&grid, 0.2).expect("in domain");
        let b = filter.blur(&grid, 0.8).expect("in domain");
        let a_again = filter.blur(&grid, 0.2).expect("in domain");

        assert_eq!(a, blur_with_kernel(&grid, &BlurKernel::new(0.2)));
        assert_eq!(b, blur_with_kernel(&grid, &BlurKernel::new(0.8)));
        assert_eq!(a, a_again);
        assert_eq!(filter.kernel_for(0.8).expect("in domain").blurring(), 0.8);
    }

    #[test]
    fn filter_policy_and_config() {
        let grid = ramp(3, 3);

        let mut strict = BlurFilter::new(DomainPolicy::Reject);
        assert_eq!(
            strict.blur(&grid, 1.5),
            Err(Error::InvalidBlurring { value: 1.5 })
        );

        let mut loose = BlurFilter::new(DomainPolicy::Allow);
        assert_eq!(loose.kernel_for(1.5).expect("allowed").center(), -0.5);

        let cfg = BlurConfig {
            blurring: 0.3,
            domain: DomainPolicy::Reject,
        };
        let mut filter = BlurFilter::from_config(&cfg).expect("valid config");
        assert_eq!(filter.policy(), DomainPolicy::Reject);
        assert_eq!(
            filter.blur_step(&grid).expect("in domain"),
            blur(&grid, 0.3).expect("in domain")
        );

        let bad = BlurConfig {
            blurring: 2.0,
            domain: DomainPolicy::Reject,
        };
        assert!(BlurFilter::from_config(&bad).is_err());

        let mut into = Grid::zeros(3, 3).expect("valid grid");
        filter.blur_into(&grid, 0.3, &mut into).expect("same shape");
        assert_eq!(into, blur(&grid, 0.3).expect("in domain"));
    }
}
