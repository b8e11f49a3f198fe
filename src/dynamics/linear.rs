use nalgebra::{Complex, DMatrix, DVector};

use crate::error::{Error, Result};

/// Reject time steps the forward-Euler update cannot use.
pub(crate) fn check_time_step(dt: f64) -> Result<()> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidTimeStep(dt))
    }
}

// ---------------------------------------------------------------------------
// Discrete state-space integrator
// ---------------------------------------------------------------------------

/// `xdot = A x + B u`, advanced with explicit forward Euler.
///
/// A and B are fixed for the lifetime of the system. The state vector is
/// mutated in place by [`LinearSystem::update`]; the most recent increment
/// and input stay readable afterwards.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    a: DMatrix<f64>,
    b: DMatrix<f64>,
    x: DVector<f64>,
    xdot: DVector<f64>,
    u: DVector<f64>,
}

impl LinearSystem {
    /// System starting at the zero state.
    pub fn new(a: DMatrix<f64>, b: DMatrix<f64>) -> Result<Self> {
        let n = a.nrows();
        Self::with_state(a, b, DVector::zeros(n))
    }

    pub fn with_state(a: DMatrix<f64>, b: DMatrix<f64>, x0: DVector<f64>) -> Result<Self> {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(Error::dimension("A columns", n, a.ncols()));
        }
        if b.nrows() != n {
            return Err(Error::dimension("B rows", n, b.nrows()));
        }
        if x0.len() != n {
            return Err(Error::dimension("initial state", n, x0.len()));
        }
        let m = b.ncols();
        Ok(Self {
            a,
            b,
            x: x0,
            xdot: DVector::zeros(n),
            u: DVector::zeros(m),
        })
    }

    /// Advance one step: `xdot = dt (A x + B u)`, `x += xdot`.
    ///
    /// `None` applies a zero input.
    pub fn update(&mut self, dt: f64, u: Option<&DVector<f64>>) -> Result<()> {
        check_time_step(dt)?;
        let u = match u {
            Some(u) if u.len() != self.n_inputs() => {
                return Err(Error::dimension("input", self.n_inputs(), u.len()));
            }
            Some(u) => u.clone(),
            None => DVector::zeros(self.n_inputs()),
        };

        self.xdot = (&self.a * &self.x + &self.b * &u) * dt;
        self.x += &self.xdot;
        self.u = u;
        Ok(())
    }

    pub fn n_states(&self) -> usize {
        self.a.nrows()
    }

    pub fn n_inputs(&self) -> usize {
        self.b.ncols()
    }

    pub fn a(&self) -> &DMatrix<f64> {
        &self.a
    }

    pub fn b(&self) -> &DMatrix<f64> {
        &self.b
    }

    pub fn state(&self) -> &DVector<f64> {
        &self.x
    }

    /// State increment of the most recent step.
    pub fn xdot(&self) -> &DVector<f64> {
        &self.xdot
    }

    /// Input applied on the most recent step.
    pub fn input(&self) -> &DVector<f64> {
        &self.u
    }

    pub fn set_state(&mut self, x: DVector<f64>) -> Result<()> {
        if x.len() != self.n_states() {
            return Err(Error::dimension("state", self.n_states(), x.len()));
        }
        self.x = x;
        Ok(())
    }

    /// Zero the state, the last increment and the last input.
    pub fn reset(&mut self) {
        self.x.fill(0.0);
        self.xdot.fill(0.0);
        self.u.fill(0.0);
    }

    /// Continuous LTI view of this system for frequency-domain analysis.
    ///
    /// C defaults to identity (full-state output) and D to zeros.
    pub fn lti(&self, c: Option<DMatrix<f64>>, d: Option<DMatrix<f64>>) -> Result<Lti> {
        let n = self.n_states();
        let c = c.unwrap_or_else(|| DMatrix::identity(n, n));
        let d = d.unwrap_or_else(|| DMatrix::zeros(c.nrows(), self.n_inputs()));
        Lti::new(self.a.clone(), self.b.clone(), c, d)
    }
}

// ---------------------------------------------------------------------------
// Continuous LTI view
// ---------------------------------------------------------------------------

/// `xdot = A x + B u`, `y = C x + D u`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lti {
    pub a: DMatrix<f64>,
    pub b: DMatrix<f64>,
    pub c: DMatrix<f64>,
    pub d: DMatrix<f64>,
}

impl Lti {
    pub fn new(a: DMatrix<f64>, b: DMatrix<f64>, c: DMatrix<f64>, d: DMatrix<f64>) -> Result<Self> {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(Error::dimension("A columns", n, a.ncols()));
        }
        if b.nrows() != n {
            return Err(Error::dimension("B rows", n, b.nrows()));
        }
        if c.ncols() != n {
            return Err(Error::dimension("C columns", n, c.ncols()));
        }
        if d.nrows() != c.nrows() {
            return Err(Error::dimension("D rows", c.nrows(), d.nrows()));
        }
        if d.ncols() != b.ncols() {
            return Err(Error::dimension("D columns", b.ncols(), d.ncols()));
        }
        Ok(Self { a, b, c, d })
    }

    /// Poles of the system (eigenvalues of A).
    pub fn eigenvalues(&self) -> DVector<Complex<f64>> {
        self.a.complex_eigenvalues()
    }

    /// All poles strictly in the left half plane.
    pub fn is_stable(&self) -> bool {
        self.eigenvalues().iter().all(|z| z.re < 0.0)
    }

    /// Transfer matrix `C (jw I - A)^-1 B + D` at angular frequency `omega`.
    ///
    /// `None` when `jw` coincides with a pole.
    pub fn frequency_response(&self, omega: f64) -> Option<DMatrix<Complex<f64>>> {
        let n = self.a.nrows();
        let to_complex = |m: &DMatrix<f64>| m.map(|v| Complex::new(v, 0.0));

        let jw_minus_a = DMatrix::from_fn(n, n, |i, j| {
            let diag = if i == j { omega } else { 0.0 };
            Complex::new(-self.a[(i, j)], diag)
        });
        let resolvent = jw_minus_a.try_inverse()?;
        Some(to_complex(&self.c) * resolvent * to_complex(&self.b) + to_complex(&self.d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn damped_oscillator() -> LinearSystem {
        // x1' = x2, x2' = -4 x1 - 0.8 x2 + u
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, -4.0, -0.8]);
        let b = DMatrix::from_row_slice(2, 1, &[0.0, 1.0]);
        LinearSystem::with_state(a, b, DVector::from_vec(vec![1.0, 0.0])).unwrap()
    }

    #[test]
    fn mismatched_b_rows_fail_at_construction() {
        let a = DMatrix::<f64>::identity(3, 3);
        let b = DMatrix::<f64>::zeros(2, 1);
        let err = LinearSystem::new(a, b).unwrap_err();
        assert!(matches!(err, Error::Dimension { context: "B rows", expected: 3, found: 2 }));
    }

    #[test]
    fn non_square_a_fails() {
        let err = LinearSystem::new(DMatrix::zeros(2, 3), DMatrix::zeros(2, 1)).unwrap_err();
        assert!(matches!(err, Error::Dimension { .. }));
    }

    #[test]
    fn wrong_input_length_fails_update() {
        let mut sys = damped_oscillator();
        let u = DVector::from_vec(vec![1.0, 2.0]);
        assert!(matches!(sys.update(0.01, Some(&u)), Err(Error::Dimension { .. })));
        // State untouched by the failed step.
        assert_eq!(sys.state()[0], 1.0);
    }

    #[test]
    fn bad_time_step_is_rejected() {
        let mut sys = damped_oscillator();
        assert!(matches!(sys.update(0.0, None), Err(Error::InvalidTimeStep(_))));
        assert!(matches!(sys.update(f64::NAN, None), Err(Error::InvalidTimeStep(_))));
    }

    #[test]
    fn euler_step_matches_hand_calculation() {
        let a = DMatrix::from_row_slice(2, 2, &[-1.0, 0.0, 0.0, -2.0]);
        let b = DMatrix::from_row_slice(2, 1, &[1.0, 0.5]);
        let mut sys = LinearSystem::with_state(a, b, DVector::from_vec(vec![1.0, 1.0])).unwrap();
        sys.update(0.1, Some(&DVector::from_vec(vec![2.0]))).unwrap();
        // xdot = 0.1 * ([-1, -2] + [2, 1]) = [0.1, -0.1]
        assert_relative_eq!(sys.xdot()[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(sys.xdot()[1], -0.1, epsilon = 1e-12);
        assert_relative_eq!(sys.state()[0], 1.1, epsilon = 1e-12);
        assert_relative_eq!(sys.state()[1], 0.9, epsilon = 1e-12);
        assert_eq!(sys.input()[0], 2.0);
    }

    #[test]
    fn zero_state_stays_at_equilibrium() {
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, -4.0, -0.8]);
        let b = DMatrix::from_row_slice(2, 1, &[0.0, 1.0]);
        let mut sys = LinearSystem::new(a, b).unwrap();
        for _ in 0..1000 {
            sys.update(0.015, None).unwrap();
        }
        assert_eq!(sys.state().norm(), 0.0);
    }

    #[test]
    fn stable_system_decays() {
        // Diagonal stable A: Euler with dt*|lambda| < 1 contracts monotonically.
        let a = DMatrix::from_row_slice(3, 3, &[-0.5, 0.0, 0.0, 0.0, -2.0, 0.0, 0.0, 0.0, -10.0]);
        let b = DMatrix::zeros(3, 1);
        let x0 = DVector::from_vec(vec![1.0, -2.0, 3.0]);
        let mut sys = LinearSystem::with_state(a, b, x0).unwrap();
        let mut prev = sys.state().norm();
        for _ in 0..2000 {
            sys.update(0.015, None).unwrap();
            let norm = sys.state().norm();
            assert!(norm <= prev, "norm grew from {prev} to {norm}");
            prev = norm;
        }
        assert!(prev < 1e-3, "state should have decayed, norm = {prev}");
    }

    #[test]
    fn unstable_system_grows() {
        let a = DMatrix::from_row_slice(2, 2, &[0.3, 0.0, 0.0, -1.0]);
        let b = DMatrix::zeros(2, 1);
        let mut sys = LinearSystem::with_state(a, b, DVector::from_vec(vec![0.01, 1.0])).unwrap();
        for _ in 0..2000 {
            sys.update(0.015, None).unwrap();
        }
        assert!(sys.state()[0] > 0.5, "unstable mode should grow, got {}", sys.state()[0]);
    }

    #[test]
    fn oscillator_poles_and_stability() {
        let lti = damped_oscillator().lti(None, None).unwrap();
        assert!(lti.is_stable());
        for z in lti.eigenvalues().iter() {
            assert_relative_eq!(z.re, -0.4, epsilon = 1e-9);
            assert_relative_eq!(z.im.abs(), (4.0_f64 - 0.16).sqrt(), epsilon = 1e-9);
        }
    }

    #[test]
    fn dc_gain_matches_static_solution() {
        // Position output only: G(0) = 1/4.
        let c = DMatrix::from_row_slice(1, 2, &[1.0, 0.0]);
        let lti = damped_oscillator().lti(Some(c), None).unwrap();
        let g = lti.frequency_response(0.0).unwrap();
        assert_relative_eq!(g[(0, 0)].re, 0.25, epsilon = 1e-12);
        assert_relative_eq!(g[(0, 0)].im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn lti_rejects_bad_output_matrix() {
        let c = DMatrix::zeros(1, 3);
        assert!(damped_oscillator().lti(Some(c), None).is_err());
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut sys = damped_oscillator();
        sys.update(0.01, Some(&DVector::from_vec(vec![1.0]))).unwrap();
        sys.reset();
        assert_eq!(sys.state().norm(), 0.0);
        assert_eq!(sys.xdot().norm(), 0.0);
        assert_eq!(sys.input().norm(), 0.0);
    }
}
