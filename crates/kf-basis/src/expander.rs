//! State-to-observation expansion.

use crate::config::BasisConfig;
use crate::error::{BasisError, BasisResult};
use kf_core::Real;
use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// Expands raw state vectors into extended observation vectors.
///
/// Constructed once from a validated `BasisConfig`; afterwards `expand` is a
/// pure function. When raw-state passthrough is enabled the first `dims`
/// output coordinates equal the input state, so forecasts in observation
/// space can be read directly as state predictions.
#[derive(Clone, Debug)]
pub struct Expander {
    dims: usize,
    include_original_vars: bool,
    power_order: Option<usize>,
    /// Number of power-basis terms (`power_order^dims`), 0 when disabled
    power_terms: usize,
    output_dims: usize,
}

impl Expander {
    /// Build an expander for `dims`-dimensional states.
    ///
    /// Fails when `dims` is zero, when a reserved basis family (trig,
    /// Hermite) is configured, or when the power order is zero / too large
    /// to enumerate. If no basis term is enabled at all, raw-state
    /// passthrough is forced so the observation space is never empty.
    pub fn new(dims: usize, config: &BasisConfig) -> BasisResult<Self> {
        if dims == 0 {
            return Err(BasisError::InvalidDims);
        }
        if config.trig_order.is_some() {
            return Err(BasisError::UnsupportedBasis { family: "trig" });
        }
        if config.hermite_order.is_some() {
            return Err(BasisError::UnsupportedBasis { family: "hermite" });
        }

        let power_terms = match config.power_order {
            None => 0,
            Some(0) => {
                return Err(BasisError::InvalidOrder {
                    what: "power_order must be at least 1",
                });
            }
            Some(p) => {
                let dims_u32 =
                    u32::try_from(dims).map_err(|_| BasisError::InvalidOrder {
                        what: "power basis term count overflows",
                    })?;
                p.checked_pow(dims_u32).ok_or(BasisError::InvalidOrder {
                    what: "power basis term count overflows",
                })?
            }
        };

        let mut include_original_vars = config.include_original_vars;
        let mut output_dims = if include_original_vars { dims } else { 0 } + power_terms;

        // No basis term enabled: fall back to the raw state so the
        // observation space is never degenerate.
        if output_dims == 0 {
            include_original_vars = true;
            output_dims = dims;
        }

        debug!(dims, output_dims, power_terms, "observation basis built");

        Ok(Self {
            dims,
            include_original_vars,
            power_order: config.power_order,
            power_terms,
            output_dims,
        })
    }

    /// Phase-space dimension of the raw states.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Length of the extended observation vector.
    pub fn output_dims(&self) -> usize {
        self.output_dims
    }

    /// Whether the raw state occupies the leading output coordinates.
    pub fn includes_original_vars(&self) -> bool {
        self.include_original_vars
    }

    /// Expand a batch of states (one column per sample) into a batch of
    /// extended observations with the same column count.
    pub fn expand(&self, states: &DMatrix<Real>) -> BasisResult<DMatrix<Real>> {
        if states.nrows() != self.dims {
            return Err(BasisError::DimensionMismatch {
                what: "state rows vs basis dims",
                expected: self.dims,
                got: states.nrows(),
            });
        }

        let mut out = DMatrix::zeros(self.output_dims, states.ncols());

        for j in 0..states.ncols() {
            let state = states.column(j);
            let mut index = 0;

            if self.include_original_vars {
                for i in 0..self.dims {
                    out[(index, j)] = state[i];
                    index += 1;
                }
            }

            if let Some(p) = self.power_order {
                // Each counter value decodes, mixed-radix base p with the
                // least significant digit belonging to dimension 0, into one
                // multi-index of per-dimension exponents.
                for counter in 0..self.power_terms {
                    let mut val: Real = 1.0;
                    let mut temp = counter;

                    for dim in 0..self.dims {
                        let deg = temp % p;
                        temp /= p;
                        val *= state[dim].powi(deg as i32);
                    }

                    out[(index, j)] = val;
                    index += 1;
                }
            }
        }

        Ok(out)
    }

    /// Expand a single state vector.
    pub fn expand_state(&self, state: &DVector<Real>) -> BasisResult<DVector<Real>> {
        let batch = DMatrix::from_column_slice(state.len(), 1, state.as_slice());
        let expanded = self.expand(&batch)?;
        Ok(expanded.column(0).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state2(x: Real, y: Real) -> DMatrix<Real> {
        DMatrix::from_column_slice(2, 1, &[x, y])
    }

    #[test]
    fn raw_passthrough_occupies_leading_coordinates() {
        let exp = Expander::new(2, &BasisConfig::with_power_order(2)).unwrap();
        let out = exp.expand(&state2(1.5, -0.5)).unwrap();

        assert_eq!(out[(0, 0)], 1.5);
        assert_eq!(out[(1, 0)], -0.5);
    }

    #[test]
    fn output_dims_counts_power_terms() {
        // dims=2, order=3: 2 raw + 3^2 power terms
        let exp = Expander::new(2, &BasisConfig::with_power_order(3)).unwrap();
        assert_eq!(exp.output_dims(), 2 + 9);

        // Without raw passthrough only the power terms remain
        let cfg = BasisConfig {
            include_original_vars: false,
            power_order: Some(3),
            ..BasisConfig::default()
        };
        let exp = Expander::new(2, &cfg).unwrap();
        assert_eq!(exp.output_dims(), 9);
    }

    #[test]
    fn empty_basis_falls_back_to_raw_state() {
        let cfg = BasisConfig {
            include_original_vars: false,
            ..BasisConfig::default()
        };
        let exp = Expander::new(3, &cfg).unwrap();
        assert_eq!(exp.output_dims(), 3);
        assert!(exp.includes_original_vars());

        let states = DMatrix::from_column_slice(3, 1, &[1.0, 2.0, 3.0]);
        let out = exp.expand(&states).unwrap();
        assert_eq!(out, states);
    }

    #[test]
    fn power_terms_follow_mixed_radix_order() {
        // dims=2, order=2 over state (x, y): counters 0..4 decode to
        // exponent pairs (0,0), (1,0), (0,1), (1,1) -> 1, x, y, x*y
        let cfg = BasisConfig {
            include_original_vars: false,
            power_order: Some(2),
            ..BasisConfig::default()
        };
        let exp = Expander::new(2, &cfg).unwrap();
        let out = exp.expand(&state2(3.0, 5.0)).unwrap();

        assert_eq!(out[(0, 0)], 1.0);
        assert_eq!(out[(1, 0)], 3.0);
        assert_eq!(out[(2, 0)], 5.0);
        assert_eq!(out[(3, 0)], 15.0);
    }

    #[test]
    fn power_enumeration_covers_every_multi_index_once() {
        // dims=2, order=3 over (2, 3): features must be exactly
        // {2^a * 3^b : a, b in 0..3}, in counter order.
        let cfg = BasisConfig {
            include_original_vars: false,
            power_order: Some(3),
            ..BasisConfig::default()
        };
        let exp = Expander::new(2, &cfg).unwrap();
        let out = exp.expand(&state2(2.0, 3.0)).unwrap();

        assert_eq!(out.nrows(), 9);
        for counter in 0..9usize {
            let a = counter % 3;
            let b = counter / 3;
            let expected = (2.0 as Real).powi(a as i32) * (3.0 as Real).powi(b as i32);
            assert_eq!(out[(counter, 0)], expected);
        }
    }

    #[test]
    fn reserved_families_are_rejected() {
        let cfg = BasisConfig {
            trig_order: Some(2),
            ..BasisConfig::default()
        };
        let err = Expander::new(2, &cfg).unwrap_err();
        assert!(matches!(
            err,
            BasisError::UnsupportedBasis { family: "trig" }
        ));

        let cfg = BasisConfig {
            hermite_order: Some(2),
            ..BasisConfig::default()
        };
        let err = Expander::new(2, &cfg).unwrap_err();
        assert!(matches!(
            err,
            BasisError::UnsupportedBasis { family: "hermite" }
        ));
    }

    #[test]
    fn zero_dims_and_zero_order_are_rejected() {
        assert!(matches!(
            Expander::new(0, &BasisConfig::default()),
            Err(BasisError::InvalidDims)
        ));
        assert!(matches!(
            Expander::new(2, &BasisConfig::with_power_order(0)),
            Err(BasisError::InvalidOrder { .. })
        ));
    }

    #[test]
    fn expand_rejects_wrong_row_count() {
        let exp = Expander::new(2, &BasisConfig::default()).unwrap();
        let states = DMatrix::from_column_slice(3, 1, &[1.0, 2.0, 3.0]);
        assert!(matches!(
            exp.expand(&states),
            Err(BasisError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn expand_is_bit_identical_across_calls() {
        let exp = Expander::new(2, &BasisConfig::with_power_order(4)).unwrap();
        let states = state2(1.234_567_89, -9.876_543_21);

        let a = exp.expand(&states).unwrap();
        let b = exp.expand(&states).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn batch_size_is_preserved(k in 1usize..40) {
            let exp = Expander::new(2, &BasisConfig::with_power_order(2)).unwrap();
            let states = DMatrix::from_fn(2, k, |i, j| (i + 2 * j) as Real * 0.25 - 3.0);
            let out = exp.expand(&states).unwrap();

            prop_assert_eq!(out.ncols(), k);
            prop_assert_eq!(out.nrows(), exp.output_dims());
        }

        #[test]
        fn leading_coordinates_equal_state(x in -1e3f64..1e3, y in -1e3f64..1e3) {
            let exp = Expander::new(2, &BasisConfig::with_power_order(3)).unwrap();
            let out = exp.expand(&state2(x, y)).unwrap();

            prop_assert_eq!(out[(0, 0)], x);
            prop_assert_eq!(out[(1, 0)], y);
        }
    }
}
