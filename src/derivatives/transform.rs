use nalgebra::{DMatrix, DVector};

use crate::derivatives::DerivativeSet;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Vector layouts
// ---------------------------------------------------------------------------

/// Lateral derivative vector: rate derivatives of Y, L', N', then their
/// control derivatives, then the inertia terms.
const LATERAL_LAYOUT: [(&str, &str); 18] = [
    ("Y", "v"),
    ("Y", "p"),
    ("Y", "r"),
    ("Lprime", "v"),
    ("Lprime", "p"),
    ("Lprime", "r"),
    ("Nprime", "v"),
    ("Nprime", "p"),
    ("Nprime", "r"),
    ("Y", "delta_a"),
    ("Y", "delta_r"),
    ("Lprime", "delta_a"),
    ("Lprime", "delta_r"),
    ("Nprime", "delta_a"),
    ("Nprime", "delta_r"),
    ("I", "x"),
    ("I", "z"),
    ("I", "xz"),
];

/// Longitudinal derivative vector: X and Z rate derivatives, M including
/// `wdot`, then the control derivatives of X, Z, M.
const LONGITUDINAL_LAYOUT: [(&str, &str); 16] = [
    ("X", "u"),
    ("X", "w"),
    ("X", "q"),
    ("Z", "u"),
    ("Z", "w"),
    ("Z", "q"),
    ("M", "u"),
    ("M", "w"),
    ("M", "wdot"),
    ("M", "q"),
    ("X", "delta_e"),
    ("X", "delta_th"),
    ("Z", "delta_e"),
    ("Z", "delta_th"),
    ("M", "delta_e"),
    ("M", "delta_th"),
];

/// The two independent derivative groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisGroup {
    Lateral,
    Longitudinal,
}

impl AxisGroup {
    /// Ordered `(axis, variable)` keys of this group's derivative vector.
    pub fn layout(self) -> &'static [(&'static str, &'static str)] {
        match self {
            AxisGroup::Lateral => &LATERAL_LAYOUT,
            AxisGroup::Longitudinal => &LONGITUDINAL_LAYOUT,
        }
    }

    /// Canonical stability-to-body transform at trim angle of attack `alpha` (rad).
    pub fn stability_to_body(self, alpha: f64) -> DMatrix<f64> {
        match self {
            AxisGroup::Lateral => lateral_stability_to_body(alpha),
            AxisGroup::Longitudinal => longitudinal_stability_to_body(alpha),
        }
    }

    /// Body-to-stability transform, the numerical inverse of the canonical one.
    pub fn body_to_stability(self, alpha: f64) -> Result<DMatrix<f64>> {
        self.stability_to_body(alpha)
            .try_inverse()
            .ok_or(Error::SingularTransform { alpha })
    }

    pub fn is_complete(self, set: &DerivativeSet) -> bool {
        self.layout().iter().all(|(axis, var)| set.contains(axis, var))
    }

    pub fn to_vector(self, set: &DerivativeSet) -> Result<DVector<f64>> {
        let values = self
            .layout()
            .iter()
            .map(|(axis, var)| set.get(axis, var))
            .collect::<Result<Vec<_>>>()?;
        Ok(DVector::from_vec(values))
    }

    pub fn from_vector(self, values: &DVector<f64>) -> DerivativeSet {
        let mut set = DerivativeSet::new();
        for ((axis, var), value) in self.layout().iter().zip(values.iter()) {
            set.set(axis, var, *value);
        }
        set
    }

    pub fn to_stability_axis(self, body: &DerivativeSet, alpha: f64) -> Result<DerivativeSet> {
        let body_vec = self.to_vector(body)?;
        let stab_vec = self.body_to_stability(alpha)? * body_vec;
        Ok(self.from_vector(&stab_vec))
    }

    pub fn to_body_axis(self, stability: &DerivativeSet, alpha: f64) -> Result<DerivativeSet> {
        let stab_vec = self.to_vector(stability)?;
        let body_vec = self.stability_to_body(alpha) * stab_vec;
        Ok(self.from_vector(&body_vec))
    }
}

// ---------------------------------------------------------------------------
// Public transforms
// ---------------------------------------------------------------------------

/// Lateral body-axis derivatives to stability axis.
pub fn lateral_to_stability_axis(body: &DerivativeSet, alpha: f64) -> Result<DerivativeSet> {
    AxisGroup::Lateral.to_stability_axis(body, alpha)
}

/// Lateral stability-axis derivatives to body axis.
pub fn lateral_to_body_axis(stability: &DerivativeSet, alpha: f64) -> Result<DerivativeSet> {
    AxisGroup::Lateral.to_body_axis(stability, alpha)
}

/// Longitudinal body-axis derivatives to stability axis.
pub fn longitudinal_to_stability_axis(body: &DerivativeSet, alpha: f64) -> Result<DerivativeSet> {
    AxisGroup::Longitudinal.to_stability_axis(body, alpha)
}

/// Longitudinal stability-axis derivatives to body axis.
pub fn longitudinal_to_body_axis(stability: &DerivativeSet, alpha: f64) -> Result<DerivativeSet> {
    AxisGroup::Longitudinal.to_body_axis(stability, alpha)
}

// ---------------------------------------------------------------------------
// Transform matrices
// ---------------------------------------------------------------------------

fn block_diagonal(blocks: &[DMatrix<f64>]) -> DMatrix<f64> {
    let n: usize = blocks.iter().map(|b| b.nrows()).sum();
    let mut out = DMatrix::zeros(n, n);
    let mut offset = 0;
    for block in blocks {
        let k = block.nrows();
        out.view_mut((offset, offset), (k, k)).copy_from(block);
        offset += k;
    }
    out
}

/// Pairwise rotation between two equally sized derivative groups `[a | b]`,
/// each of `k` entries.
fn coupled_pair(k: usize, cosa: f64, sina: f64) -> DMatrix<f64> {
    let eye = DMatrix::<f64>::identity(k, k);
    let mut out = DMatrix::zeros(2 * k, 2 * k);
    out.view_mut((0, 0), (k, k)).copy_from(&(&eye * cosa));
    out.view_mut((0, k), (k, k)).copy_from(&(&eye * -sina));
    out.view_mut((k, 0), (k, k)).copy_from(&(&eye * sina));
    out.view_mut((k, k), (k, k)).copy_from(&(&eye * cosa));
    out
}

fn lateral_stability_to_body(alpha: f64) -> DMatrix<f64> {
    let (sina, cosa) = alpha.sin_cos();
    let (c2, s2, sc) = (cosa * cosa, sina * sina, sina * cosa);

    // Side force: only the p, r derivatives rotate.
    #[rustfmt::skip]
    let y_vpr = DMatrix::from_row_slice(3, 3, &[
        1.0, 0.0,  0.0,
        0.0, cosa, -sina,
        0.0, sina, cosa,
    ]);
    let y_delta = DMatrix::identity(2, 2);

    // L' and N' rotate into each other, and their p, r columns rotate too.
    #[rustfmt::skip]
    let ln_vpr = DMatrix::from_row_slice(6, 6, &[
        cosa, 0.0, 0.0, -sina, 0.0, 0.0,
        0.0,  c2,  -sc, 0.0,   -sc, s2,
        0.0,  sc,  c2,  0.0,   -s2, -sc,
        sina, 0.0, 0.0, cosa,  0.0, 0.0,
        0.0,  sc,  -s2, 0.0,   c2,  -sc,
        0.0,  s2,  sc,  0.0,   sc,  c2,
    ]);
    let ln_delta = coupled_pair(2, cosa, sina);

    #[rustfmt::skip]
    let inertia = DMatrix::from_row_slice(3, 3, &[
        c2,  s2, 2.0 * sc,
        s2,  c2, -2.0 * sc,
        -sc, sc, c2 - s2,
    ]);

    block_diagonal(&[y_vpr, ln_vpr, y_delta, ln_delta, inertia])
}

fn longitudinal_stability_to_body(alpha: f64) -> DMatrix<f64> {
    let (sina, cosa) = alpha.sin_cos();
    let (c2, s2, sc) = (cosa * cosa, sina * sina, sina * cosa);

    // X and Z rotate into each other, and their u, w columns rotate too.
    #[rustfmt::skip]
    let xz_uwq = DMatrix::from_row_slice(6, 6, &[
        c2,  -sc, 0.0,  -sc, s2,  0.0,
        sc,  c2,  0.0,  -s2, -sc, 0.0,
        0.0, 0.0, cosa, 0.0, 0.0, -sina,
        sc,  -s2, 0.0,  c2,  -sc, 0.0,
        s2,  sc,  0.0,  sc,  c2,  0.0,
        0.0, 0.0, sina, 0.0, 0.0, cosa,
    ]);
    let xz_delta = coupled_pair(2, cosa, sina);

    #[rustfmt::skip]
    let m_uwwdotq = DMatrix::from_row_slice(4, 4, &[
        cosa, -sina, 0.0,  0.0,
        sina, cosa,  0.0,  0.0,
        0.0,  0.0,   cosa, 0.0,
        0.0,  0.0,   0.0,  1.0,
    ]);
    let m_delta = DMatrix::identity(2, 2);

    block_diagonal(&[xz_uwq, m_uwwdotq, xz_delta, m_delta])
}
