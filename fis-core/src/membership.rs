//! # Funções de Pertinência
//!
//! Biblioteca de formas escalares puras. Cada forma recebe um valor e um
//! vetor de coeficientes e não guarda estado.
//!
//! ## Papéis
//!
//! - **Convencionais**: antecedentes de qualquer sistema e consequentes Mamdani
//! - **Sugeno**: `Constant` e `Linear`, avaliadas sobre o vetor de entradas
//! - **Tsukamoto**: formas monótonas avaliadas de forma inversa, isto é,
//!   recebem a força da regra e devolvem o ponto do universo de saída
//!
//! ```text
//!  Triangular [a,b,c]        Trapezoidal [a,b,c,d]      S [a,b]
//!      /\                       ____                        ___
//!     /  \                     /    \                      /
//!  __/    \__               __/      \__               ___/
//!    a  b  c                  a  b  c  d                  a  b
//! ```

use std::f32::consts::PI;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Igualdade com tolerância relativa
#[inline]
pub(crate) fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= f32::EPSILON * a.abs().max(b.abs()).max(1.0)
}

/// Argumentos disponíveis para uma forma
#[derive(Debug, Clone, Copy)]
pub struct ShapeInput<'a> {
    /// Valor avaliado: entrada crisp, ponto do universo ou força da regra (Tsukamoto)
    pub x: f32,
    /// Vetor completo de entradas (consequentes Sugeno)
    pub inputs: &'a [f32],
    /// Limites da variável dona da função
    pub min: f32,
    pub max: f32,
}

impl<'a> ShapeInput<'a> {
    pub fn scalar(x: f32) -> Self {
        Self {
            x,
            inputs: &[],
            min: f32::NEG_INFINITY,
            max: f32::INFINITY,
        }
    }
}

/// Assinatura de uma forma definida pelo usuário
pub type CustomShapeFn = Arc<dyn Fn(&ShapeInput<'_>, &[f32]) -> f32 + Send + Sync>;

/// Forma definida pelo usuário
#[derive(Clone)]
pub struct CustomShape {
    name: String,
    func: CustomShapeFn,
}

impl CustomShape {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&ShapeInput<'_>, &[f32]) -> f32 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn call(&self, input: &ShapeInput<'_>, coefficients: &[f32]) -> f32 {
        (self.func)(input, coefficients)
    }
}

impl fmt::Debug for CustomShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomShape").field("name", &self.name).finish()
    }
}

/// Papel de uma forma embutida
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeRole {
    Conventional,
    Sugeno,
    Tsukamoto,
}

/// Formas embutidas
///
/// Os aliases de serde seguem os nomes clássicos (`trimf`, `gaussmf`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// `[c]` — valor constante (antecedente ou consequente Sugeno)
    #[serde(alias = "constantmf")]
    Constant,
    /// `[a, b, c]`
    #[serde(alias = "trimf")]
    Triangular,
    /// `[a, b, c, d]`
    #[serde(alias = "trapmf")]
    Trapezoidal,
    /// `[a, b, c]` — largura, inclinação, centro
    #[serde(alias = "gbellmf")]
    GeneralizedBell,
    /// `[σ, c]`
    #[serde(alias = "gaussmf")]
    Gaussian,
    /// `[σ1, c1, σ2, c2]`
    #[serde(alias = "gauss2mf")]
    Gaussian2,
    /// `[a, c]`
    #[serde(alias = "sigmf")]
    Sigmoid,
    /// `[a1, c1, a2, c2]` — |sig1 − sig2|
    #[serde(alias = "dsigmf")]
    DiffSigmoid,
    /// `[a1, c1, a2, c2]` — sig1 · sig2
    #[serde(alias = "psigmf")]
    ProdSigmoid,
    /// `[a, b, c, d]`
    #[serde(alias = "pimf")]
    Pi,
    /// `[a, b]`
    #[serde(alias = "smf")]
    S,
    /// `[a, b]`
    #[serde(alias = "zmf")]
    Z,
    /// `[a]`
    #[serde(alias = "singletonmf")]
    Singleton,
    /// `[i, e]` — ponto de inflexão, ponto final
    #[serde(alias = "concavemf")]
    Concave,
    /// `[w, c]`
    #[serde(alias = "spikemf")]
    Spike,
    /// `[a, b]`
    #[serde(alias = "linsmf")]
    LinearS,
    /// `[a, b]`
    #[serde(alias = "linzmf")]
    LinearZ,
    /// `[start, end]`
    #[serde(alias = "rectmf")]
    Rectangle,
    /// `[c, w]`
    #[serde(alias = "cosmf")]
    Cosine,
    /// `[c1, .., cn, c0]` — Σ ci·xi + c0
    #[serde(alias = "linearmf")]
    Linear,
    #[serde(alias = "tlinsmf")]
    TLinearS,
    #[serde(alias = "tlinzmf")]
    TLinearZ,
    #[serde(alias = "tconcavemf")]
    TConcave,
    #[serde(alias = "tsigmf")]
    TSigmoid,
    #[serde(alias = "tsmf")]
    TS,
    #[serde(alias = "tzmf")]
    TZ,
}

impl ShapeKind {
    pub fn role(self) -> ShapeRole {
        match self {
            Self::Linear => ShapeRole::Sugeno,
            Self::TLinearS
            | Self::TLinearZ
            | Self::TConcave
            | Self::TSigmoid
            | Self::TS
            | Self::TZ => ShapeRole::Tsukamoto,
            _ => ShapeRole::Conventional,
        }
    }

    /// Número mínimo de coeficientes
    pub fn coefficient_count(self, n_inputs: usize) -> usize {
        match self {
            Self::Constant | Self::Singleton => 1,
            Self::Triangular | Self::GeneralizedBell => 3,
            Self::Trapezoidal
            | Self::Gaussian2
            | Self::DiffSigmoid
            | Self::ProdSigmoid
            | Self::Pi => 4,
            Self::Linear => n_inputs + 1,
            _ => 2,
        }
    }

    /// Largura nula em formas que dividem pela largura (σ, `a` do sino, spike, cosseno)
    pub fn has_zero_width(self, p: &[f32]) -> bool {
        match self {
            Self::Gaussian | Self::GeneralizedBell | Self::Spike => p[0] == 0.0,
            Self::Gaussian2 => p[0] == 0.0 || p[2] == 0.0,
            Self::Cosine => p[1] == 0.0,
            _ => false,
        }
    }

    /// Avalia uma forma convencional em `x`
    pub fn eval(self, x: f32, p: &[f32]) -> f32 {
        match self {
            Self::Constant => p[0],
            Self::Triangular => triangular(x, p[0], p[1], p[2]),
            Self::Trapezoidal => trapezoidal(x, p[0], p[1], p[2], p[3]),
            Self::GeneralizedBell => generalized_bell(x, p[0], p[1], p[2]),
            Self::Gaussian => gaussian(x, p[0], p[1]),
            Self::Gaussian2 => {
                let f1 = if x <= p[1] { gaussian(x, p[0], p[1]) } else { 1.0 };
                let f2 = if x >= p[3] { gaussian(x, p[2], p[3]) } else { 1.0 };
                f1 * f2
            }
            Self::Sigmoid => sigmoid(x, p[0], p[1]),
            Self::DiffSigmoid => (sigmoid(x, p[0], p[1]) - sigmoid(x, p[2], p[3])).abs(),
            Self::ProdSigmoid => (sigmoid(x, p[0], p[1]) * sigmoid(x, p[2], p[3])).abs(),
            Self::Pi => (s_shape(x, p[0], p[1]) * z_shape(x, p[2], p[3])).abs(),
            Self::S => s_shape(x, p[0], p[1]),
            Self::Z => z_shape(x, p[0], p[1]),
            Self::Singleton => {
                if approx_eq(x, p[0]) {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Concave => concave(x, p[0], p[1]),
            Self::Spike => (-(10.0 * (x - p[1]) / p[0]).abs()).exp(),
            Self::LinearS => linear_s(x, p[0], p[1]),
            Self::LinearZ => linear_z(x, p[0], p[1]),
            Self::Rectangle => {
                if x >= p[0] && x <= p[1] {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Cosine => cosine(x, p[0], p[1]),
            // Consequentes fora do papel convencional
            Self::Linear => linear(&[x], p),
            _ => self.inverse(x, f32::NEG_INFINITY, f32::INFINITY, p),
        }
    }

    /// Avalia um consequente Sugeno sobre o vetor de entradas
    pub fn eval_sugeno(self, inputs: &[f32], p: &[f32]) -> f32 {
        match self {
            Self::Linear => linear(inputs, p),
            _ => p[0],
        }
    }

    /// Inversa de uma forma Tsukamoto: ponto do universo `[min, max]` com pertinência `w`
    pub fn inverse(self, w: f32, min: f32, max: f32, p: &[f32]) -> f32 {
        let (a, b) = (p[0], p[1]);
        match self {
            Self::TLinearS => a + (b - a) * w,
            Self::TLinearZ => b - (b - a) * w,
            // a = ponto de inflexão, b = ponto final
            Self::TConcave => (a - b) / w + 2.0 * b - a,
            Self::TSigmoid => {
                if approx_eq(w, 1.0) {
                    if a >= 0.0 { max } else { min }
                } else if approx_eq(w, 0.0) {
                    if a >= 0.0 { min } else { max }
                } else {
                    b - ((1.0 / w) - 1.0).ln() / a
                }
            }
            Self::TS => {
                let half = 0.5 * (b - a) * (b - a);
                let lower = a + (w * half).sqrt();
                let upper = b - ((1.0 - w) * half).sqrt();
                closest(w, lower, upper, |t| s_shape(t, a, b))
            }
            Self::TZ => {
                let half = 0.5 * (b - a) * (b - a);
                let lower = a + ((1.0 - w) * half).sqrt();
                let upper = b - (w * half).sqrt();
                closest(w, lower, upper, |t| z_shape(t, a, b))
            }
            _ => self.eval(w, p),
        }
    }
}

/// Escolhe o candidato cuja pertinência está mais próxima de `w`
fn closest(w: f32, lower: f32, upper: f32, shape: impl Fn(f32) -> f32) -> f32 {
    if (w - shape(lower)).abs() < (w - shape(upper)).abs() {
        lower
    } else {
        upper
    }
}

pub fn triangular(x: f32, a: f32, b: f32, c: f32) -> f32 {
    let left = if b > a {
        (x - a) / (b - a)
    } else if x >= a {
        1.0
    } else {
        0.0
    };
    let right = if c > b {
        (c - x) / (c - b)
    } else if x <= c {
        1.0
    } else {
        0.0
    };
    left.min(right).max(0.0)
}

pub fn trapezoidal(x: f32, a: f32, b: f32, c: f32, d: f32) -> f32 {
    let left = if b > a {
        (x - a) / (b - a)
    } else if x >= a {
        1.0
    } else {
        0.0
    };
    let right = if d > c {
        (d - x) / (d - c)
    } else if x <= d {
        1.0
    } else {
        0.0
    };
    left.min(1.0).min(right).max(0.0)
}

pub fn generalized_bell(x: f32, a: f32, b: f32, c: f32) -> f32 {
    1.0 / (1.0 + ((x - c) / a).abs().powf(2.0 * b))
}

pub fn gaussian(x: f32, sigma: f32, c: f32) -> f32 {
    let t = (x - c) / sigma;
    (-0.5 * t * t).exp()
}

pub fn sigmoid(x: f32, a: f32, c: f32) -> f32 {
    1.0 / (1.0 + (-a * (x - c)).exp())
}

pub fn s_shape(x: f32, a: f32, b: f32) -> f32 {
    if x <= a {
        0.0
    } else if x >= b {
        1.0
    } else if x <= 0.5 * (a + b) {
        let t = (x - a) / (b - a);
        2.0 * t * t
    } else {
        let t = (x - b) / (b - a);
        1.0 - 2.0 * t * t
    }
}

pub fn z_shape(x: f32, a: f32, b: f32) -> f32 {
    if x <= a {
        1.0
    } else if x >= b {
        0.0
    } else if x <= 0.5 * (a + b) {
        let t = (x - a) / (b - a);
        1.0 - 2.0 * t * t
    } else {
        let t = (x - b) / (b - a);
        2.0 * t * t
    }
}

pub fn concave(x: f32, i: f32, e: f32) -> f32 {
    if i <= e && x < e {
        (e - i) / (2.0 * e - i - x)
    } else if i > e && x > e {
        (i - e) / (-2.0 * e + i + x)
    } else {
        1.0
    }
}

pub fn linear_s(x: f32, a: f32, b: f32) -> f32 {
    if a < b {
        ((x - a) / (b - a)).clamp(0.0, 1.0)
    } else if approx_eq(a, b) {
        if x < a { 0.0 } else { 1.0 }
    } else {
        0.0
    }
}

pub fn linear_z(x: f32, a: f32, b: f32) -> f32 {
    if a < b {
        ((b - x) / (b - a)).clamp(0.0, 1.0)
    } else if approx_eq(a, b) {
        if x < a { 1.0 } else { 0.0 }
    } else {
        0.0
    }
}

pub fn cosine(x: f32, c: f32, w: f32) -> f32 {
    if x < c - 0.5 * w || x > c + 0.5 * w {
        0.0
    } else {
        0.5 * (1.0 + (2.0 / w * PI * (x - c)).cos())
    }
}

/// `Σ pᵢ·xᵢ + p[n]`
pub fn linear(inputs: &[f32], p: &[f32]) -> f32 {
    let n = inputs.len();
    inputs.iter().zip(p).map(|(x, c)| x * c).sum::<f32>() + p.get(n).copied().unwrap_or(0.0)
}

/// Forma de uma função de pertinência: embutida ou definida pelo usuário
#[derive(Debug, Clone)]
pub enum MembershipShape {
    Builtin(ShapeKind),
    Custom(CustomShape),
}

impl From<ShapeKind> for MembershipShape {
    fn from(kind: ShapeKind) -> Self {
        Self::Builtin(kind)
    }
}

impl From<CustomShape> for MembershipShape {
    fn from(custom: CustomShape) -> Self {
        Self::Custom(custom)
    }
}

/// Função de pertinência ligada a uma variável
#[derive(Debug, Clone)]
pub struct MembershipFunction {
    pub(crate) shape: MembershipShape,
    pub(crate) coefficients: Vec<f32>,
    pub(crate) height: f32,
    pub(crate) owner: usize,
}

impl MembershipFunction {
    pub fn shape(&self) -> &MembershipShape {
        &self.shape
    }

    pub fn coefficients(&self) -> &[f32] {
        &self.coefficients
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Índice da entrada ou saída dona desta função
    pub fn owner(&self) -> usize {
        self.owner
    }

    /// `height · shape(x)` para formas convencionais
    #[inline]
    pub fn degree(&self, x: f32, min: f32, max: f32) -> f32 {
        let y = match &self.shape {
            MembershipShape::Builtin(kind) => kind.eval(x, &self.coefficients),
            MembershipShape::Custom(custom) => custom.call(
                &ShapeInput {
                    x,
                    inputs: &[],
                    min,
                    max,
                },
                &self.coefficients,
            ),
        };
        self.height * y
    }

    /// Valor `zi` de um consequente Sugeno
    pub fn sugeno_value(&self, inputs: &[f32], min: f32, max: f32) -> f32 {
        match &self.shape {
            MembershipShape::Builtin(kind) => kind.eval_sugeno(inputs, &self.coefficients),
            MembershipShape::Custom(custom) => custom.call(
                &ShapeInput {
                    x: inputs.first().copied().unwrap_or(0.0),
                    inputs,
                    min,
                    max,
                },
                &self.coefficients,
            ),
        }
    }

    /// Valor `zi` de um consequente Tsukamoto para a força `w`
    pub fn tsukamoto_value(&self, w: f32, inputs: &[f32], min: f32, max: f32) -> f32 {
        match &self.shape {
            MembershipShape::Builtin(kind) => kind.inverse(w, min, max, &self.coefficients),
            MembershipShape::Custom(custom) => custom.call(
                &ShapeInput {
                    x: w,
                    inputs,
                    min,
                    max,
                },
                &self.coefficients,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_triangular() {
        assert_eq!(triangular(5.0, 0.0, 5.0, 10.0), 1.0);
        assert!(close(triangular(2.5, 0.0, 5.0, 10.0), 0.5));
        assert_eq!(triangular(11.0, 0.0, 5.0, 10.0), 0.0);
    }

    #[test]
    fn test_triangular_degenerate_shoulders() {
        // [0, 0, 5]: ombro esquerdo
        assert_eq!(triangular(0.0, 0.0, 0.0, 5.0), 1.0);
        assert_eq!(triangular(5.0, 0.0, 0.0, 5.0), 0.0);
        // [5, 10, 10]: ombro direito
        assert_eq!(triangular(10.0, 5.0, 10.0, 10.0), 1.0);
        assert_eq!(triangular(5.0, 5.0, 10.0, 10.0), 0.0);
    }

    #[test]
    fn test_trapezoidal_plateau() {
        assert_eq!(trapezoidal(3.0, 0.0, 2.0, 4.0, 6.0), 1.0);
        assert!(close(trapezoidal(1.0, 0.0, 2.0, 4.0, 6.0), 0.5));
        assert!(close(trapezoidal(5.0, 0.0, 2.0, 4.0, 6.0), 0.5));
    }

    #[test]
    fn test_gaussian_and_bell_peak_at_center() {
        assert_eq!(gaussian(3.0, 1.0, 3.0), 1.0);
        assert!(close(gaussian(4.0, 1.0, 3.0), (-0.5f32).exp()));
        assert_eq!(generalized_bell(3.0, 2.0, 4.0, 3.0), 1.0);
        assert!(close(generalized_bell(5.0, 2.0, 4.0, 3.0), 0.5));
    }

    #[test]
    fn test_zero_width_detection() {
        assert!(ShapeKind::Gaussian.has_zero_width(&[0.0, 3.0]));
        assert!(ShapeKind::GeneralizedBell.has_zero_width(&[0.0, 4.0, 3.0]));
        assert!(ShapeKind::Gaussian2.has_zero_width(&[1.0, 2.0, 0.0, 6.0]));
        assert!(ShapeKind::Cosine.has_zero_width(&[5.0, 0.0]));
        assert!(ShapeKind::Spike.has_zero_width(&[0.0, 5.0]));
        assert!(!ShapeKind::Gaussian.has_zero_width(&[1.0, 3.0]));
        assert!(!ShapeKind::Triangular.has_zero_width(&[0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_gaussian2_flat_between_centers() {
        let p = [1.0, 2.0, 1.0, 6.0];
        assert_eq!(ShapeKind::Gaussian2.eval(4.0, &p), 1.0);
        assert!(ShapeKind::Gaussian2.eval(0.0, &p) < 1.0);
        assert!(ShapeKind::Gaussian2.eval(8.0, &p) < 1.0);
    }

    #[test]
    fn test_sigmoid_variants() {
        assert!(close(sigmoid(5.0, 2.0, 5.0), 0.5));
        let d = ShapeKind::DiffSigmoid.eval(5.0, &[5.0, 2.0, 5.0, 8.0]);
        assert!(d > 0.9);
        let p = ShapeKind::ProdSigmoid.eval(5.0, &[5.0, 2.0, -5.0, 8.0]);
        assert!(p > 0.9);
    }

    #[test]
    fn test_s_z_pi_shapes() {
        assert_eq!(s_shape(0.0, 1.0, 3.0), 0.0);
        assert!(close(s_shape(2.0, 1.0, 3.0), 0.5));
        assert_eq!(s_shape(4.0, 1.0, 3.0), 1.0);
        assert!(close(z_shape(2.0, 1.0, 3.0), 0.5));
        assert!(close(s_shape(1.5, 1.0, 3.0) + z_shape(1.5, 1.0, 3.0), 1.0));
        assert_eq!(ShapeKind::Pi.eval(5.0, &[1.0, 4.0, 6.0, 9.0]), 1.0);
        assert_eq!(ShapeKind::Pi.eval(0.0, &[1.0, 4.0, 6.0, 9.0]), 0.0);
    }

    #[test]
    fn test_linear_s_and_z_are_complementary() {
        for i in 0..=10 {
            let x = i as f32;
            assert!(close(linear_s(x, 2.0, 8.0) + linear_z(x, 2.0, 8.0), 1.0));
        }
        assert_eq!(linear_z(2.0, 2.0, 8.0), 1.0);
        assert_eq!(linear_z(8.0, 2.0, 8.0), 0.0);
    }

    #[test]
    fn test_singleton_rectangle_cosine_spike() {
        assert_eq!(ShapeKind::Singleton.eval(2.0, &[2.0]), 1.0);
        assert_eq!(ShapeKind::Singleton.eval(2.1, &[2.0]), 0.0);
        assert_eq!(ShapeKind::Rectangle.eval(2.0, &[1.0, 3.0]), 1.0);
        assert_eq!(ShapeKind::Rectangle.eval(3.5, &[1.0, 3.0]), 0.0);
        assert!(close(cosine(5.0, 5.0, 4.0), 1.0));
        assert_eq!(cosine(8.0, 5.0, 4.0), 0.0);
        assert_eq!(ShapeKind::Spike.eval(1.0, &[2.0, 1.0]), 1.0);
    }

    #[test]
    fn test_concave() {
        assert!(close(concave(0.0, 0.0, 4.0), 0.5));
        assert_eq!(concave(5.0, 0.0, 4.0), 1.0);
    }

    #[test]
    fn test_sugeno_linear() {
        // z = 2·x1 − x2 + 3
        assert!(close(linear(&[1.0, 4.0], &[2.0, -1.0, 3.0]), 1.0));
        assert!(close(ShapeKind::Constant.eval_sugeno(&[9.0, 9.0], &[7.5]), 7.5));
    }

    #[test]
    fn test_tsukamoto_linear_inverses() {
        assert!(close(ShapeKind::TLinearS.inverse(0.25, 0.0, 10.0, &[0.0, 8.0]), 2.0));
        assert!(close(ShapeKind::TLinearZ.inverse(0.25, 0.0, 10.0, &[0.0, 8.0]), 6.0));
        // consistência com as formas diretas
        let x = ShapeKind::TLinearZ.inverse(0.4, 0.0, 10.0, &[2.0, 8.0]);
        assert!(close(linear_z(x, 2.0, 8.0), 0.4));
    }

    #[test]
    fn test_tsukamoto_s_z_inverses() {
        for w in [0.1f32, 0.3, 0.5, 0.7, 0.9] {
            let xs = ShapeKind::TS.inverse(w, 0.0, 10.0, &[2.0, 8.0]);
            assert!(close(s_shape(xs, 2.0, 8.0), w), "TS w={} x={}", w, xs);
            let xz = ShapeKind::TZ.inverse(w, 0.0, 10.0, &[2.0, 8.0]);
            assert!(close(z_shape(xz, 2.0, 8.0), w), "TZ w={} x={}", w, xz);
        }
    }

    #[test]
    fn test_tsukamoto_sigmoid_and_concave_inverses() {
        let x = ShapeKind::TSigmoid.inverse(0.8, 0.0, 10.0, &[1.5, 5.0]);
        assert!(close(sigmoid(x, 1.5, 5.0), 0.8));
        assert_eq!(ShapeKind::TSigmoid.inverse(1.0, 0.0, 10.0, &[1.5, 5.0]), 10.0);
        assert_eq!(ShapeKind::TSigmoid.inverse(1.0, 0.0, 10.0, &[-1.5, 5.0]), 0.0);

        let x = ShapeKind::TConcave.inverse(0.5, 0.0, 10.0, &[0.0, 4.0]);
        assert!(close(concave(x, 0.0, 4.0), 0.5));
    }

    #[test]
    fn test_coefficient_counts() {
        assert_eq!(ShapeKind::Triangular.coefficient_count(2), 3);
        assert_eq!(ShapeKind::Pi.coefficient_count(2), 4);
        assert_eq!(ShapeKind::Linear.coefficient_count(3), 4);
        assert_eq!(ShapeKind::TS.coefficient_count(3), 2);
    }

    #[test]
    fn test_serde_aliases() {
        let k: ShapeKind = serde_json::from_str("\"trimf\"").unwrap();
        assert_eq!(k, ShapeKind::Triangular);
        let k: ShapeKind = serde_json::from_str("\"t_linear_s\"").unwrap();
        assert_eq!(k, ShapeKind::TLinearS);
    }

    #[test]
    fn test_custom_shape_height() {
        let custom = CustomShape::new("half", |input: &ShapeInput<'_>, _p: &[f32]| {
            if input.x > 0.0 { 1.0 } else { 0.0 }
        });
        let mf = MembershipFunction {
            shape: custom.into(),
            coefficients: vec![],
            height: 0.5,
            owner: 0,
        };
        assert_eq!(mf.degree(1.0, 0.0, 2.0), 0.5);
        assert_eq!(mf.degree(-1.0, -2.0, 2.0), 0.0);
    }
}
