/// Simplified hydrogen-atom wavefunctions Ψ(n,l,m) = R(n,l,r)·Y(l,m,θ,φ)
/// All distances are in units of the Bohr radius a₀.

use log::{debug, warn};
use ndarray::{Array3, Zip};
use num_complex::Complex64;
use std::f64::consts::PI;
use std::fmt;

use crate::error::{OrbitalError, Result};
use crate::grid::SphericalGrid;

/// Represents quantum numbers (n, l, m)
/// n: Principal quantum number (1, 2, 3, ...)
/// l: Azimuthal quantum number (0 to n-1)
/// m: Magnetic quantum number (-l to l)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantumNumbers {
    pub n: u32,
    pub l: u32,
    pub m: i32,
}

impl QuantumNumbers {
    pub fn new(n: u32, l: u32, m: i32) -> Result<Self> {
        let qn = Self::unchecked(n, l, m);
        if qn.is_valid() {
            Ok(qn)
        } else {
            Err(OrbitalError::InvalidQuantumNumbers { n, l, m })
        }
    }

    /// Builds a triple without checking it. The evaluator accepts these and
    /// falls back to approximate or zero factors.
    pub fn unchecked(n: u32, l: u32, m: i32) -> Self {
        QuantumNumbers { n, l, m }
    }

    pub fn is_valid(&self) -> bool {
        self.n >= 1 && self.l < self.n && self.m.unsigned_abs() <= self.l
    }

    /// Re-applies the slider constraint chain n -> l -> m.
    pub fn clamped(n: u32, l: u32, m: i32, n_max: u32) -> Self {
        let n = n.clamp(1, n_max.max(1));
        let l = l.min(n - 1);
        let m = m.clamp(-(l as i32), l as i32);
        QuantumNumbers { n, l, m }
    }

    /// Spectroscopic label such as "1s" or "2p". Unknown letters render as '?'.
    pub fn label(&self) -> String {
        match orbital_letter(self.l) {
            Some(c) => format!("{}{}", self.n, c),
            None => format!("{}?", self.n),
        }
    }
}

impl fmt::Display for QuantumNumbers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}, l={}, m={}", self.n, self.l, self.m)
    }
}

pub fn orbital_letter(l: u32) -> Option<char> {
    match l {
        0 => Some('s'),
        1 => Some('p'),
        2 => Some('d'),
        3 => Some('f'),
        4 => Some('g'),
        _ => None,
    }
}

/// Radial factor lookup over the tabulated (n, l) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadialCase {
    /// (1,0): 2·e^(−r)
    OneS,
    /// (2,0): (2−r)·e^(−r/2) / (2√2)
    TwoS,
    /// (2,1): r·e^(−r/2) / (2√6)
    TwoP,
    /// (3,2): r²·e^(−r/3) / (81√30)
    ThreeD,
    /// Anything else: e^(−r). Not a hydrogenic radial function.
    Fallback,
}

impl RadialCase {
    pub fn for_pair(n: u32, l: u32) -> Self {
        match (n, l) {
            (1, 0) => RadialCase::OneS,
            (2, 0) => RadialCase::TwoS,
            (2, 1) => RadialCase::TwoP,
            (3, 2) => RadialCase::ThreeD,
            _ => RadialCase::Fallback,
        }
    }

    pub fn is_tabulated(self) -> bool {
        self != RadialCase::Fallback
    }

    pub fn value(self, r: f64) -> f64 {
        match self {
            RadialCase::OneS => 2.0 * (-r).exp(),
            RadialCase::TwoS => (2.0 - r) * (-r / 2.0).exp() / (2.0 * 2.0_f64.sqrt()),
            RadialCase::TwoP => r * (-r / 2.0).exp() / (2.0 * 6.0_f64.sqrt()),
            RadialCase::ThreeD => r * r * (-r / 3.0).exp() / (81.0 * 30.0_f64.sqrt()),
            RadialCase::Fallback => (-r).exp(),
        }
    }
}

/// Angular factor lookup over the tabulated (l, m) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngularCase {
    /// l = 0, any m: 1/√(4π)
    S,
    /// (1,0): √(3/4π)·cos θ
    P0,
    /// (1,1): −√(3/8π)·sin θ·e^(iφ)
    P1,
    /// (2,0): √(5/16π)·(3cos²θ − 1)
    D0,
    /// (2,1): −√(15/8π)·sin θ·cos θ·e^(iφ)
    D1,
    /// Everything else evaluates to zero.
    Zero,
}

impl AngularCase {
    pub fn for_pair(l: u32, m: i32) -> Self {
        match (l, m) {
            (0, _) => AngularCase::S,
            (1, 0) => AngularCase::P0,
            (1, 1) => AngularCase::P1,
            (2, 0) => AngularCase::D0,
            (2, 1) => AngularCase::D1,
            _ => AngularCase::Zero,
        }
    }

    pub fn is_tabulated(self) -> bool {
        self != AngularCase::Zero
    }

    pub fn value(self, theta: f64, phi: f64) -> Complex64 {
        let (sin_t, cos_t) = theta.sin_cos();
        match self {
            AngularCase::S => Complex64::new(1.0 / (4.0 * PI).sqrt(), 0.0),
            AngularCase::P0 => Complex64::new((3.0 / (4.0 * PI)).sqrt() * cos_t, 0.0),
            AngularCase::P1 => {
                -(3.0 / (8.0 * PI)).sqrt() * sin_t * Complex64::from_polar(1.0, phi)
            }
            AngularCase::D0 => {
                Complex64::new((5.0 / (16.0 * PI)).sqrt() * (3.0 * cos_t * cos_t - 1.0), 0.0)
            }
            AngularCase::D1 => {
                -(15.0 / (8.0 * PI)).sqrt() * sin_t * cos_t * Complex64::from_polar(1.0, phi)
            }
            AngularCase::Zero => Complex64::new(0.0, 0.0),
        }
    }
}

/// Which approximation produces Ψ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Model {
    /// Hand-tabulated closed forms with explicit fallbacks.
    #[default]
    Tabulated,
    /// R = e^(−r/n)·(r/n)^l with the full spherical harmonic Y_l^m.
    General,
}

impl Model {
    pub fn from_query(value: Option<&str>) -> Self {
        match value.unwrap_or("tabulated").to_lowercase().as_str() {
            "general" => Model::General,
            _ => Model::Tabulated,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Model::Tabulated => "tabulated",
            Model::General => "general",
        }
    }

    /// Ψ at a single point in spherical coordinates.
    pub fn psi(self, qn: QuantumNumbers, r: f64, theta: f64, phi: f64) -> Complex64 {
        match self {
            Model::Tabulated => {
                let radial = RadialCase::for_pair(qn.n, qn.l);
                let angular = AngularCase::for_pair(qn.l, qn.m);
                angular.value(theta, phi) * radial.value(r)
            }
            Model::General => {
                spherical_harmonic(theta, phi, qn.l, qn.m) * general_radial(r, qn.n, qn.l)
            }
        }
    }

    /// Ψ at every lattice point of `grid`.
    pub fn evaluate(self, qn: QuantumNumbers, grid: &SphericalGrid) -> Array3<Complex64> {
        self.report_cases(qn);
        Zip::from(&grid.r)
            .and(&grid.theta)
            .and(&grid.phi)
            .map_collect(|&r, &theta, &phi| self.psi(qn, r, theta, phi))
    }

    fn report_cases(self, qn: QuantumNumbers) {
        match self {
            Model::Tabulated => {
                let radial = RadialCase::for_pair(qn.n, qn.l);
                let angular = AngularCase::for_pair(qn.l, qn.m);
                debug!("evaluating ({qn}) with {radial:?} x {angular:?}");
                if !radial.is_tabulated() {
                    warn!("no tabulated radial part for n={}, l={}; using e^(-r)", qn.n, qn.l);
                }
                if !angular.is_tabulated() {
                    warn!("no tabulated angular part for l={}, m={}; field is zero", qn.l, qn.m);
                }
            }
            Model::General => {
                debug!("evaluating ({qn}) with the general model");
                if !qn.is_valid() {
                    warn!("quantum numbers ({qn}) violate l < n or |m| <= l");
                }
            }
        }
    }
}

/// Ψ over the grid with the tabulated model.
pub fn evaluate(qn: QuantumNumbers, grid: &SphericalGrid) -> Array3<Complex64> {
    Model::Tabulated.evaluate(qn, grid)
}

/// Radial term of the general model: e^(−r/n)·(r/n)^l
pub fn general_radial(r: f64, n: u32, l: u32) -> f64 {
    let n_f = n.max(1) as f64;
    let rho = r / n_f;
    (-rho).exp() * rho.powi(l as i32)
}

/// Complex spherical harmonic Y_lm(theta, phi) with Condon-Shortley phase.
/// Returns zero when |m| > l.
pub fn spherical_harmonic(theta: f64, phi: f64, l: u32, m: i32) -> Complex64 {
    let m_abs = m.unsigned_abs();
    if m_abs > l {
        return Complex64::new(0.0, 0.0);
    }

    let l_f = l as f64;
    let legendre = associated_legendre(theta.cos(), l, m_abs);
    let norm = ((2.0 * l_f + 1.0) / (4.0 * PI)).sqrt()
        * (factorial(l - m_abs) / factorial(l + m_abs)).sqrt();

    let positive = norm * legendre * Complex64::from_polar(1.0, m_abs as f64 * phi);
    if m >= 0 {
        positive
    } else {
        // Y_l^{-m} = (-1)^m conj(Y_l^m)
        let sign = if m_abs % 2 == 0 { 1.0 } else { -1.0 };
        sign * positive.conj()
    }
}

/// Factorial as f64 (exact for the small arguments used here)
pub fn factorial(n: u32) -> f64 {
    (1..=n).map(|k| k as f64).product()
}

/// Double factorial n!! = n * (n-2) * (n-4) * ... * 1 or 2
pub fn factorial_double(n: u32) -> f64 {
    let mut result = 1.0;
    let mut i = n as i64;

    while i > 0 {
        result *= i as f64;
        i -= 2;
    }

    result
}

/// Associated Legendre polynomial P^m_n(x), Condon-Shortley phase included
pub fn associated_legendre(x: f64, n: u32, m: u32) -> f64 {
    if m > n {
        return 0.0;
    }

    if m == 0 {
        return legendre_polynomial(x, n);
    }

    let m_f = m as f64;
    let sign = if m % 2 == 0 { 1.0 } else { -1.0 };
    let pmm = sign * (1.0 - x * x).max(0.0).powf(m_f / 2.0) * factorial_double(2 * m - 1);

    if n == m {
        return pmm;
    }

    let pm1m = x * (2.0 * m_f + 1.0) * pmm;

    if n == m + 1 {
        return pm1m;
    }

    let mut pmn = pmm;
    let mut pm1n = pm1m;

    for i in (m + 2)..=n {
        let i_f = i as f64;
        let pn = ((2.0 * i_f - 1.0) * x * pm1n - (i_f + m_f - 1.0) * pmn) / (i_f - m_f);
        pmn = pm1n;
        pm1n = pn;
    }

    pm1n
}

/// Legendre polynomial P_n(x)
pub fn legendre_polynomial(x: f64, n: u32) -> f64 {
    match n {
        0 => 1.0,
        1 => x,
        _ => {
            let mut p0 = 1.0;
            let mut p1 = x;

            for i in 2..=n {
                let i_f = i as f64;
                let p_new = ((2.0 * i_f - 1.0) * x * p1 - (i_f - 1.0) * p0) / i_f;
                p0 = p1;
                p1 = p_new;
            }

            p1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const TOL: f64 = 1e-12;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= TOL * (1.0 + b.abs())
    }

    #[test]
    fn test_quantum_numbers() {
        assert!(QuantumNumbers::new(1, 0, 0).is_ok());
        assert!(QuantumNumbers::new(2, 1, -1).is_ok());
        assert!(QuantumNumbers::new(2, 1, 0).is_ok());
        assert!(QuantumNumbers::new(2, 1, 1).is_ok());

        assert!(QuantumNumbers::new(0, 0, 0).is_err());
        assert!(QuantumNumbers::new(2, 2, 0).is_err());
        assert!(QuantumNumbers::new(2, 1, 2).is_err());
    }

    #[test]
    fn test_clamped_follows_constraint_chain() {
        assert_eq!(QuantumNumbers::clamped(0, 3, 5, 5), QuantumNumbers::unchecked(1, 0, 0));
        assert_eq!(QuantumNumbers::clamped(9, 7, -9, 5), QuantumNumbers::unchecked(5, 4, -4));
        assert_eq!(QuantumNumbers::clamped(3, 1, 1, 5), QuantumNumbers::unchecked(3, 1, 1));
    }

    #[test]
    fn test_labels() {
        assert_eq!(QuantumNumbers::unchecked(1, 0, 0).label(), "1s");
        assert_eq!(QuantumNumbers::unchecked(2, 1, 0).label(), "2p");
        assert_eq!(QuantumNumbers::unchecked(3, 2, 1).label(), "3d");
        assert_eq!(QuantumNumbers::unchecked(5, 4, 0).label(), "5g");
        assert_eq!(QuantumNumbers::unchecked(7, 5, 0).label(), "7?");
    }

    #[test]
    fn test_radial_table_matches_closed_forms() {
        for &r in &[0.0, 1.0, 2.0, 5.0] {
            let e = f64::exp;
            assert!(close(RadialCase::for_pair(1, 0).value(r), 2.0 * e(-r)));
            assert!(close(
                RadialCase::for_pair(2, 0).value(r),
                (1.0 / (2.0 * 2.0_f64.sqrt())) * (2.0 - r) * e(-r / 2.0)
            ));
            assert!(close(
                RadialCase::for_pair(2, 1).value(r),
                (1.0 / (2.0 * 6.0_f64.sqrt())) * r * e(-r / 2.0)
            ));
            assert!(close(
                RadialCase::for_pair(3, 2).value(r),
                (1.0 / (81.0 * 30.0_f64.sqrt())) * r * r * e(-r / 3.0)
            ));
            assert!(close(RadialCase::for_pair(4, 3).value(r), e(-r)));
        }
    }

    #[test]
    fn test_radial_fallback_is_explicit() {
        assert_eq!(RadialCase::for_pair(4, 3), RadialCase::Fallback);
        assert_eq!(RadialCase::for_pair(3, 0), RadialCase::Fallback);
        assert!(!RadialCase::Fallback.is_tabulated());
        assert!(RadialCase::TwoP.is_tabulated());
    }

    #[test]
    fn test_angular_table_matches_closed_forms() {
        for &(theta, phi) in &[(0.0, 0.0), (FRAC_PI_2, FRAC_PI_2), (1.1, -2.3)] {
            let (s, c) = (f64::sin(theta), f64::cos(theta));
            let e_iphi = Complex64::new(f64::cos(phi), f64::sin(phi));

            let y00 = AngularCase::for_pair(0, 0).value(theta, phi);
            assert!(close(y00.re, 1.0 / (4.0 * PI).sqrt()) && y00.im == 0.0);

            let y10 = AngularCase::for_pair(1, 0).value(theta, phi);
            assert!(close(y10.re, (3.0 / (4.0 * PI)).sqrt() * c));

            let y11 = AngularCase::for_pair(1, 1).value(theta, phi);
            let expected = -(3.0 / (8.0 * PI)).sqrt() * s * e_iphi;
            assert!((y11 - expected).norm() < TOL);

            let y20 = AngularCase::for_pair(2, 0).value(theta, phi);
            assert!(close(y20.re, (5.0 / (16.0 * PI)).sqrt() * (3.0 * c * c - 1.0)));

            let y21 = AngularCase::for_pair(2, 1).value(theta, phi);
            let expected = -(15.0 / (8.0 * PI)).sqrt() * s * c * e_iphi;
            assert!((y21 - expected).norm() < TOL);
        }
    }

    #[test]
    fn test_angular_fallback_is_zero() {
        assert_eq!(AngularCase::for_pair(0, 3), AngularCase::S);
        assert_eq!(AngularCase::for_pair(1, -1), AngularCase::Zero);
        assert_eq!(AngularCase::for_pair(3, 0), AngularCase::Zero);
        assert_eq!(AngularCase::Zero.value(0.4, 0.2), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_general_harmonic_agrees_with_table() {
        for &(l, m) in &[(0u32, 0i32), (1, 0), (1, 1), (2, 0), (2, 1)] {
            for &(theta, phi) in &[(0.3, 0.0), (FRAC_PI_2, FRAC_PI_2), (2.5, -1.2)] {
                let general = spherical_harmonic(theta, phi, l, m);
                let table = AngularCase::for_pair(l, m).value(theta, phi);
                assert!((general - table).norm() < 1e-12, "l={l} m={m}");
            }
        }
    }

    #[test]
    fn test_negative_m_harmonic_is_conjugate_symmetric() {
        let (theta, phi) = (0.7, 1.9);
        let plus = spherical_harmonic(theta, phi, 2, 1);
        let minus = spherical_harmonic(theta, phi, 2, -1);
        assert!((minus - (-plus.conj())).norm() < TOL);
        assert_eq!(spherical_harmonic(theta, phi, 1, 2), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_general_radial() {
        assert!(close(general_radial(0.0, 1, 0), 1.0));
        assert!(close(general_radial(4.0, 2, 1), (-2.0f64).exp() * 2.0));
        assert_eq!(general_radial(0.0, 2, 1), 0.0);
    }

    #[test]
    fn test_two_p_models_differ() {
        let qn = QuantumNumbers::unchecked(2, 1, 0);
        let tab = Model::Tabulated.psi(qn, 2.0, 0.0, 0.0);
        let gen = Model::General.psi(qn, 2.0, 0.0, 0.0);
        assert!((tab - gen).norm() > 1e-3);
    }

    #[test]
    fn test_model_from_query() {
        assert_eq!(Model::from_query(None), Model::Tabulated);
        assert_eq!(Model::from_query(Some("General")), Model::General);
        assert_eq!(Model::from_query(Some("other")), Model::Tabulated);
        assert_eq!(Model::General.as_str(), "general");
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(1), 1.0);
        assert_eq!(factorial(5), 120.0);
        assert_eq!(factorial_double(5), 15.0);
        assert_eq!(factorial_double(6), 48.0);
    }

    #[test]
    fn test_legendre() {
        let x = 0.3;
        assert!(close(legendre_polynomial(x, 2), 0.5 * (3.0 * x * x - 1.0)));
        assert!(close(associated_legendre(x, 1, 1), -(1.0 - x * x).sqrt()));
        assert!(close(associated_legendre(x, 2, 2), 3.0 * (1.0 - x * x)));
        assert_eq!(associated_legendre(x, 1, 2), 0.0);
    }

    #[test]
    fn test_evaluate_on_grid() {
        let grid = SphericalGrid::build(4.0, 5).unwrap();
        let qn = QuantumNumbers::unchecked(1, 0, 0);
        let psi = evaluate(qn, &grid);
        assert_eq!(psi.shape(), grid.r.shape());
        let centre = psi[[2, 2, 2]];
        assert!(close(centre.re, 2.0 / (4.0 * PI).sqrt()));
        assert_eq!(centre.im, 0.0);
    }

    #[test]
    fn test_unsupported_pair_degrades_gracefully() {
        let grid = SphericalGrid::build(4.0, 5).unwrap();
        let psi = evaluate(QuantumNumbers::unchecked(4, 3, 0), &grid);
        assert!(psi.iter().all(|v| v.re.is_finite() && v.im.is_finite()));
        assert!(psi.iter().all(|v| v.norm() == 0.0));

        // l = 0 keeps the constant angular part, so the e^(-r) fallback shows through
        let psi = evaluate(QuantumNumbers::unchecked(4, 0, 0), &grid);
        let expected = (-grid.r[[0, 0, 0]]).exp() / (4.0 * PI).sqrt();
        assert!(close(psi[[0, 0, 0]].re, expected));
    }
}
