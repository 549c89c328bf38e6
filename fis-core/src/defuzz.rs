//! # Defuzzificação
//!
//! Métodos Mamdani operam sobre `eval_points + 1` amostras igualmente espaçadas
//! da curva agregada. Métodos ponderados operam sobre os acumuladores
//! `Σ zi·wi` e `Σ wi`.
//!
//! Ativação total nula produz `NaN`, nunca um valor legítimo.

use serde::{Deserialize, Serialize};

use crate::engine::FisType;
use crate::membership::approx_eq;

/// Método de defuzzificação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzMethod {
    Centroid,
    Bisector,
    /// Middle of maximum
    Mom,
    /// Largest of maximum
    Lom,
    /// Smallest of maximum
    Som,
    WeightedAverage,
    WeightedSum,
}

impl DefuzzMethod {
    /// Método padrão para cada tipo de sistema
    pub fn default_for(kind: FisType) -> Self {
        match kind {
            FisType::Mamdani => Self::Centroid,
            FisType::Sugeno | FisType::Tsukamoto => Self::WeightedAverage,
        }
    }

    pub fn is_allowed_for(self, kind: FisType) -> bool {
        match kind {
            FisType::Mamdani => self.is_sampled(),
            FisType::Sugeno => matches!(self, Self::WeightedAverage | Self::WeightedSum),
            FisType::Tsukamoto => self == Self::WeightedAverage,
        }
    }

    /// Opera sobre a curva amostrada
    pub fn is_sampled(self) -> bool {
        matches!(
            self,
            Self::Centroid | Self::Bisector | Self::Mom | Self::Lom | Self::Som
        )
    }

    /// Aplica um método amostrado
    pub fn apply_sampled(self, samples: &Samples<'_>) -> f32 {
        match self {
            Self::Centroid => centroid(samples),
            Self::Bisector => bisector(samples),
            Self::Mom => middle_of_maximum(samples),
            Self::Lom => largest_of_maximum(samples),
            Self::Som => smallest_of_maximum(samples),
            Self::WeightedAverage | Self::WeightedSum => f32::NAN,
        }
    }

    /// Aplica um método ponderado
    pub fn apply_weighted(self, zi_wi: f32, wi: f32) -> f32 {
        match self {
            _ if wi <= 0.0 => f32::NAN,
            Self::WeightedAverage => zi_wi / wi,
            Self::WeightedSum => zi_wi,
            _ => f32::NAN,
        }
    }
}

/// Curva agregada amostrada: `ys[k] = f(x0 + k·res)`
#[derive(Debug, Clone, Copy)]
pub struct Samples<'a> {
    pub ys: &'a [f32],
    pub x0: f32,
    pub res: f32,
}

impl Samples<'_> {
    #[inline]
    pub fn x(&self, k: usize) -> f32 {
        self.x0 + self.res * k as f32
    }

    pub fn area(&self) -> f32 {
        self.ys.iter().sum()
    }

    fn is_empty(&self) -> bool {
        self.area() <= 0.0
    }
}

pub fn centroid(s: &Samples<'_>) -> f32 {
    let (num, den) = s
        .ys
        .iter()
        .enumerate()
        .fold((0.0f32, 0.0f32), |(num, den), (k, &y)| (num + s.x(k) * y, den + y));
    if den > 0.0 { num / den } else { f32::NAN }
}

/// Varredura com dois ponteiros a partir das extremidades
///
/// Avança o lado cuja área acumulada, somada à próxima amostra, é menor. Cada
/// amostra é visitada uma única vez; os ponteiros se encontram numa amostra `m`
/// e o resultado é interpolado dentro dela pelo desequilíbrio de área restante.
pub fn bisector(s: &Samples<'_>) -> f32 {
    let ys = s.ys;
    if ys.is_empty() || s.is_empty() {
        return f32::NAN;
    }

    let (mut l, mut r) = (0usize, ys.len() - 1);
    let (mut area_l, mut area_r) = (0.0f32, 0.0f32);
    while l < r {
        if area_l + ys[l] <= area_r + ys[r] {
            area_l += ys[l];
            l += 1;
        } else {
            area_r += ys[r];
            r -= 1;
        }
    }

    let y_m = ys[l];
    let offset = if y_m > 0.0 {
        ((area_r - area_l) / (2.0 * y_m)).clamp(-0.5, 0.5)
    } else {
        0.0
    };
    s.x(l) + s.res * offset
}

pub fn largest_of_maximum(s: &Samples<'_>) -> f32 {
    if s.is_empty() {
        return f32::NAN;
    }
    let mut y_max = -1.0f32;
    let mut x_largest = s.x(0);
    for (k, &y) in s.ys.iter().enumerate() {
        if y >= y_max {
            y_max = y;
            x_largest = s.x(k);
        }
    }
    x_largest
}

pub fn smallest_of_maximum(s: &Samples<'_>) -> f32 {
    if s.is_empty() {
        return f32::NAN;
    }
    let mut y_max = -1.0f32;
    let mut x_smallest = s.x(0);
    for (k, &y) in s.ys.iter().enumerate() {
        if y > y_max {
            y_max = y;
            x_smallest = s.x(k);
        }
    }
    x_smallest
}

/// Ponto médio do primeiro platô que atinge o máximo
pub fn middle_of_maximum(s: &Samples<'_>) -> f32 {
    if s.is_empty() {
        return f32::NAN;
    }
    let mut y_max = -1.0f32;
    let (mut x_smallest, mut x_largest) = (s.x(0), s.x(0));
    let mut on_plateau = false;
    for (k, &y) in s.ys.iter().enumerate() {
        let x = s.x(k);
        if y > y_max && !approx_eq(y, y_max) {
            y_max = y;
            x_smallest = x;
            x_largest = x;
            on_plateau = true;
        } else if approx_eq(y, y_max) {
            if on_plateau {
                x_largest = x;
            }
        } else {
            on_plateau = false;
        }
    }
    0.5 * (x_smallest + x_largest)
}
