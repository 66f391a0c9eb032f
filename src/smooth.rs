//! Smoothing filters for chromatographic signal, a simple centered moving
//! average and a Savitzky-Golay polynomial filter.

use num_traits::{Float, FromPrimitive};
use thiserror::Error;

/// Smooth `data` with a centered boxcar of `window` points into `out`,
/// replacing its contents. The window shrinks symmetrically at the edges.
pub fn moving_average_into<F: Float + FromPrimitive>(data: &[F], window: usize, out: &mut Vec<F>) {
    out.clear();
    if data.is_empty() || window <= 1 {
        out.extend_from_slice(data);
        return;
    }
    let half = window / 2;
    let n = data.len();

    let mut prefix = Vec::with_capacity(n + 1);
    let mut acc = F::zero();
    prefix.push(acc);
    for x in data {
        acc = acc + *x;
        prefix.push(acc);
    }

    for i in 0..n {
        let lo = i.saturating_sub(half);
        let hi = (i + half + 1).min(n);
        let span = F::from_usize(hi - lo).unwrap_or_else(F::one);
        out.push((prefix[hi] - prefix[lo]) / span);
    }
}

/// [`moving_average_into`], allocating the output
pub fn moving_average<F: Float + FromPrimitive>(data: &[F], window: usize) -> Vec<F> {
    let mut out = Vec::with_capacity(data.len());
    moving_average_into(data, window, &mut out);
    out
}

/// All the ways a Savitzky-Golay fit can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SavitzkyGolayError {
    #[error("the window length must be an odd number, received {0}")]
    WindowLengthNotOdd(usize),
    #[error(
        "the window length must be no longer than the data, received a {0} point window over {1} data points"
    )]
    WindowLengthTooLong(usize, usize),
    #[error("the polynomial order {0} must be less than the window length {1}")]
    PolynomialOrderTooLarge(usize, usize),
    #[error("failed to solve for filter coefficients: {0}")]
    FailedToSolveCoefficients(&'static str),
}

#[cfg(feature = "nalgebra")]
mod savgol {
    use log::debug;
    use nalgebra::linalg::SVD;
    use nalgebra::{DMatrix, DVector, RealField};

    #[cfg(feature = "parallelism")]
    use rayon::prelude::*;

    use super::*;
    use crate::chromatogram::Chromatogram;

    /// A Savitzky-Golay smoothing filter, a least-squares polynomial fit
    /// over a sliding window.
    ///
    /// Interior points are smoothed by convolution with a kernel solved
    /// once per invocation; the half-window at each border is re-fit with a
    /// polynomial over the outermost full window rather than padded.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SavitzkyGolayFilter {
        /// The number of points fit at a time, must be odd
        pub window_length: usize,
        /// The order of the fitted polynomial, must be less than
        /// `window_length`
        pub poly_order: usize,
    }

    impl Default for SavitzkyGolayFilter {
        fn default() -> Self {
            Self {
                window_length: 11,
                poly_order: 4,
            }
        }
    }

    impl SavitzkyGolayFilter {
        pub fn new(window_length: usize, poly_order: usize) -> Result<Self, SavitzkyGolayError> {
            if window_length % 2 == 0 {
                return Err(SavitzkyGolayError::WindowLengthNotOdd(window_length));
            }
            if poly_order >= window_length {
                return Err(SavitzkyGolayError::PolynomialOrderTooLarge(
                    poly_order,
                    window_length,
                ));
            }
            Ok(Self {
                window_length,
                poly_order,
            })
        }

        fn check(&self, n: usize) -> Result<(), SavitzkyGolayError> {
            if self.window_length % 2 == 0 {
                Err(SavitzkyGolayError::WindowLengthNotOdd(self.window_length))
            } else if self.poly_order >= self.window_length {
                Err(SavitzkyGolayError::PolynomialOrderTooLarge(
                    self.poly_order,
                    self.window_length,
                ))
            } else if self.window_length > n {
                Err(SavitzkyGolayError::WindowLengthTooLong(
                    self.window_length,
                    n,
                ))
            } else {
                Ok(())
            }
        }

        /// The convolution kernel evaluating the least-squares polynomial
        /// fit at the window center
        fn kernel<F: Float + FromPrimitive + RealField>(
            &self,
        ) -> Result<DVector<F>, SavitzkyGolayError> {
            let half = (self.window_length / 2) as i64;
            let terms = self.poly_order + 1;

            let design = DMatrix::<F>::from_fn(self.window_length, terms, |k, p| {
                let x = F::from_i64(k as i64 - half).unwrap();
                Float::powi(x, p as i32)
            });

            let mut centered = DVector::<F>::zeros(terms);
            centered[0] = F::one();

            let normal = design.transpose() * &design;
            let svd = SVD::new(normal, true, true);
            let solution = svd
                .solve(&centered, F::from(1e-12).unwrap())
                .map_err(SavitzkyGolayError::FailedToSolveCoefficients)?;
            Ok(design * solution)
        }

        /// Least-squares polynomial coefficients over `y` sampled at
        /// `x = 0, 1, ..., y.len() - 1`
        fn polyfit<F: Float + FromPrimitive + RealField>(
            &self,
            y: &[F],
        ) -> Result<DVector<F>, SavitzkyGolayError> {
            let terms = self.poly_order + 1;
            let design = DMatrix::<F>::from_fn(y.len(), terms, |k, p| {
                Float::powi(F::from_usize(k).unwrap(), p as i32)
            });
            let rhs = DVector::from_column_slice(y);
            let svd = SVD::new(design, true, true);
            svd.solve(&rhs, F::from(1e-12).unwrap())
                .map_err(SavitzkyGolayError::FailedToSolveCoefficients)
        }

        fn eval_poly<F: Float + FromPrimitive + RealField>(beta: &DVector<F>, x: F) -> F {
            beta.iter()
                .enumerate()
                .fold(F::zero(), |acc, (p, c)| acc + *c * Float::powi(x, p as i32))
        }

        /// Replace the half-window at one border of `out` with a polynomial
        /// re-fit over the outermost full window of `data`
        fn fit_border<F: Float + FromPrimitive + RealField>(
            &self,
            data: &[F],
            out: &mut [F],
            leading: bool,
        ) -> Result<(), SavitzkyGolayError> {
            let half = self.window_length / 2;
            if half == 0 {
                return Ok(());
            }
            let n = data.len();
            let (window, eval_offset, write_start) = if leading {
                (&data[..self.window_length], 0, 0)
            } else {
                (
                    &data[n - self.window_length..],
                    self.window_length - half,
                    n - half,
                )
            };
            let beta = self.polyfit(window)?;
            for j in 0..half {
                let x = F::from_usize(eval_offset + j).unwrap();
                out[write_start + j] = Self::eval_poly(&beta, x);
            }
            Ok(())
        }

        /// Smooth `data`, returning a new array of the same length.
        ///
        /// Fails when the window is even, the polynomial order is too
        /// large, or `data` has fewer points than the window.
        pub fn smooth<F: Float + FromPrimitive + RealField>(
            &self,
            data: &[F],
        ) -> Result<Vec<F>, SavitzkyGolayError> {
            self.check(data.len())?;
            let kernel = self.kernel::<F>()?;
            let half = self.window_length / 2;
            let n = data.len();

            let mut out = Vec::with_capacity(n);
            for i in 0..n {
                if i < half || i + half >= n {
                    // rewritten by the border fits below
                    out.push(data[i]);
                } else {
                    let acc = kernel
                        .iter()
                        .enumerate()
                        .fold(F::zero(), |acc, (k, c)| acc + *c * data[i + k - half]);
                    out.push(acc);
                }
            }
            self.fit_border(data, &mut out, true)?;
            self.fit_border(data, &mut out, false)?;
            Ok(out)
        }

        /// Smooth a chromatogram's intensities in place.
        ///
        /// A chromatogram with fewer points than the window is left
        /// untouched rather than failing a whole-experiment pass.
        pub fn smooth_chromatogram(
            &self,
            chromatogram: &mut Chromatogram,
        ) -> Result<(), SavitzkyGolayError> {
            if chromatogram.len() < self.window_length {
                debug!(
                    "skipping smoothing of {} point chromatogram, the window needs {}",
                    chromatogram.len(),
                    self.window_length
                );
                return Ok(());
            }
            let signal: Vec<f64> = chromatogram
                .iter()
                .map(|p| p.intensity as f64)
                .collect();
            let smoothed = self.smooth(&signal)?;
            for (peak, y) in chromatogram.iter_mut().zip(smoothed) {
                peak.intensity = y as f32;
            }
            Ok(())
        }
    }

    cfg_if::cfg_if! {
        if #[cfg(feature = "parallelism")] {
            /// Smooth every chromatogram of an experiment in place,
            /// skipping those shorter than the filter window
            pub fn smooth_all(
                chromatograms: &mut [Chromatogram],
                filter: &SavitzkyGolayFilter,
            ) -> Result<(), SavitzkyGolayError> {
                chromatograms
                    .par_iter_mut()
                    .try_for_each(|c| filter.smooth_chromatogram(c))
            }
        } else {
            /// Smooth every chromatogram of an experiment in place,
            /// skipping those shorter than the filter window
            pub fn smooth_all(
                chromatograms: &mut [Chromatogram],
                filter: &SavitzkyGolayFilter,
            ) -> Result<(), SavitzkyGolayError> {
                chromatograms
                    .iter_mut()
                    .try_for_each(|c| filter.smooth_chromatogram(c))
            }
        }
    }
}

#[cfg(feature = "nalgebra")]
pub use savgol::{smooth_all, SavitzkyGolayFilter};

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_moving_average() {
        let data = vec![0.0f64, 0.0, 3.0, 0.0, 0.0];
        let smoothed = moving_average(&data, 3);
        assert_eq!(smoothed, vec![0.0, 1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_moving_average_window_one_is_identity() {
        let data = vec![1.0f32, 5.0, 2.0];
        assert_eq!(moving_average(&data, 1), data);
    }

    #[test]
    fn test_moving_average_preserves_total_of_constant() {
        let data = vec![7.5f64; 20];
        let smoothed = moving_average(&data, 5);
        for y in smoothed {
            assert!((y - 7.5).abs() < 1e-12);
        }
    }

    #[cfg(feature = "nalgebra")]
    mod savgol {
        use super::super::*;
        use crate::chromatogram::Chromatogram;

        #[test]
        fn test_three_point_quadratic_is_identity() {
            // a quadratic through three points reproduces them exactly
            let data = vec![0.0f64, 0.0, 1.0, 0.0, 0.0];
            let filter = SavitzkyGolayFilter::new(3, 2).unwrap();
            let smoothed = filter.smooth(&data).unwrap();
            for (y, expected) in smoothed.iter().zip(data.iter()) {
                assert!((y - expected).abs() < 1e-8, "{y} != {expected}");
            }
        }

        #[test]
        fn test_constant_signal_is_preserved() {
            let data = vec![4.0f64; 9];
            let filter = SavitzkyGolayFilter::new(5, 2).unwrap();
            let smoothed = filter.smooth(&data).unwrap();
            assert_eq!(smoothed.len(), data.len());
            for y in smoothed {
                assert!((y - 4.0).abs() < 1e-8);
            }
        }

        #[test]
        fn test_impulse_response_matches_quadratic_kernel() {
            // the 5 point quadratic kernel is (-3, 12, 17, 12, -3) / 35
            let mut data = vec![0.0f64; 9];
            data[4] = 1.0;
            let filter = SavitzkyGolayFilter::new(5, 2).unwrap();
            let smoothed = filter.smooth(&data).unwrap();
            assert!((smoothed[4] - 17.0 / 35.0).abs() < 1e-8);
            assert!((smoothed[3] - 12.0 / 35.0).abs() < 1e-8);
            assert!((smoothed[5] - 12.0 / 35.0).abs() < 1e-8);
            assert!((smoothed[2] + 3.0 / 35.0).abs() < 1e-8);
            assert!((smoothed[6] + 3.0 / 35.0).abs() < 1e-8);
        }

        #[test]
        fn test_validation() {
            assert_eq!(
                SavitzkyGolayFilter::new(4, 2),
                Err(SavitzkyGolayError::WindowLengthNotOdd(4))
            );
            assert_eq!(
                SavitzkyGolayFilter::new(5, 5),
                Err(SavitzkyGolayError::PolynomialOrderTooLarge(5, 5))
            );
            let filter = SavitzkyGolayFilter::new(5, 2).unwrap();
            assert_eq!(
                filter.smooth(&[1.0f64, 2.0, 3.0]),
                Err(SavitzkyGolayError::WindowLengthTooLong(5, 3))
            );
        }

        #[test_log::test]
        fn test_smooth_all_tolerates_short_chromatograms() {
            let times: Vec<f64> = (0..9).map(|i| i as f64).collect();
            let mut intensities = vec![0.0f32; 9];
            intensities[3] = 1.0;
            intensities[4] = 0.8;
            intensities[5] = 1.2;

            let mut experiment = vec![
                Chromatogram::from_arrays(&times, &intensities),
                Chromatogram::from_arrays(&times, &intensities),
                Chromatogram::from_arrays(&times[..1], &intensities[..1]),
                Chromatogram::default(),
            ];

            let filter = SavitzkyGolayFilter::new(5, 2).unwrap();
            smooth_all(&mut experiment, &filter).unwrap();

            assert_eq!(experiment[0].len(), 9);
            assert_eq!(experiment[1].len(), 9);
            assert_eq!(experiment[2].len(), 1);
            assert_eq!(experiment[3].len(), 0);

            // the two full-length traces smooth identically, the apex shrinks
            assert_eq!(experiment[0].peaks(), experiment[1].peaks());
            assert!(experiment[0][5].intensity < 1.2);
            // the single-point trace is left exactly as it was
            assert_eq!(experiment[2][0].intensity, 0.0);
        }
    }
}
