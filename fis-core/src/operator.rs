//! # Operadores Fuzzy
//!
//! Cinco operadores binários saturados em `[0, 1]`, os únicos blocos usados
//! para AND, OR, implicação e agregação.
//!
//! | Operador | Fórmula        | AND/Implicação | OR/Agregação |
//! |----------|----------------|:--------------:|:------------:|
//! | `Min`    | `min(a, b)`    | ✓              |              |
//! | `Prod`   | `a·b`          | ✓              |              |
//! | `Max`    | `max(a, b)`    |                | ✓            |
//! | `ProbOr` | `a + b − a·b`  |                | ✓            |
//! | `Sum`    | `a + b`        |                | ✓            |

use serde::{Deserialize, Serialize};

use crate::error::{FisError, FisResult};

/// Satura em `[0, 1]`
#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Operador fuzzy binário
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuzzyOperator {
    Min,
    Max,
    Prod,
    ProbOr,
    Sum,
}

impl FuzzyOperator {
    #[inline]
    pub fn apply(self, a: f32, b: f32) -> f32 {
        let y = match self {
            Self::Min => a.min(b),
            Self::Max => a.max(b),
            Self::Prod => a * b,
            Self::ProbOr => a + b - a * b,
            Self::Sum => a + b,
        };
        clamp01(y)
    }

    /// Válido como AND ou implicação (t-norma)
    pub fn is_t_norm(self) -> bool {
        matches!(self, Self::Min | Self::Prod)
    }

    /// Válido como OR ou agregação (s-norma)
    pub fn is_s_norm(self) -> bool {
        matches!(self, Self::Max | Self::ProbOr | Self::Sum)
    }
}

/// Parâmetro configurável do motor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    And(FuzzyOperator),
    Or(FuzzyOperator),
    Implication(FuzzyOperator),
    Aggregation(FuzzyOperator),
    EvalPoints(usize),
}

/// Menor número de pontos de avaliação aceito
pub const MIN_EVAL_POINTS: usize = 20;

/// Pontos de avaliação padrão
pub const DEFAULT_EVAL_POINTS: usize = 100;

/// Conjunto de operadores de uma instância
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operators {
    pub and: FuzzyOperator,
    pub or: FuzzyOperator,
    pub implication: FuzzyOperator,
    pub aggregation: FuzzyOperator,
}

impl Default for Operators {
    fn default() -> Self {
        Self {
            and: FuzzyOperator::Min,
            or: FuzzyOperator::Max,
            implication: FuzzyOperator::Min,
            aggregation: FuzzyOperator::Max,
        }
    }
}

impl Operators {
    /// Aplica um parâmetro de operador; `EvalPoints` não pertence a este conjunto
    pub fn set(&mut self, param: Parameter) -> FisResult<()> {
        match param {
            Parameter::And(op) if op.is_t_norm() => self.and = op,
            Parameter::Implication(op) if op.is_t_norm() => self.implication = op,
            Parameter::Or(op) if op.is_s_norm() => self.or = op,
            Parameter::Aggregation(op) if op.is_s_norm() => self.aggregation = op,
            other => {
                return Err(FisError::InvalidParameter(format!(
                    "{:?} is not an accepted operator choice",
                    other
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [FuzzyOperator; 5] = [
        FuzzyOperator::Min,
        FuzzyOperator::Max,
        FuzzyOperator::Prod,
        FuzzyOperator::ProbOr,
        FuzzyOperator::Sum,
    ];

    #[test]
    fn test_individual_operators() {
        assert_eq!(FuzzyOperator::Min.apply(0.3, 0.7), 0.3);
        assert_eq!(FuzzyOperator::Max.apply(0.3, 0.7), 0.7);
        assert!((FuzzyOperator::Prod.apply(0.5, 0.4) - 0.2).abs() < 1e-6);
        assert!((FuzzyOperator::ProbOr.apply(0.5, 0.4) - 0.7).abs() < 1e-6);
        assert!((FuzzyOperator::Sum.apply(0.5, 0.4) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_sum_saturates() {
        assert_eq!(FuzzyOperator::Sum.apply(0.8, 0.7), 1.0);
    }

    #[test]
    fn test_saturation_over_unit_grid() {
        for op in ALL {
            for i in 0..=20 {
                for j in 0..=20 {
                    let y = op.apply(i as f32 / 20.0, j as f32 / 20.0);
                    assert!((0.0..=1.0).contains(&y), "{:?} produced {}", op, y);
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_operands_are_clamped() {
        assert_eq!(FuzzyOperator::Max.apply(1.5, 0.2), 1.0);
        assert_eq!(FuzzyOperator::Min.apply(-0.5, 0.2), 0.0);
    }

    #[test]
    fn test_operator_roles() {
        let mut ops = Operators::default();
        assert!(ops.set(Parameter::And(FuzzyOperator::Prod)).is_ok());
        assert!(ops.set(Parameter::Or(FuzzyOperator::Sum)).is_ok());
        assert!(ops.set(Parameter::Aggregation(FuzzyOperator::ProbOr)).is_ok());
        assert!(ops.set(Parameter::Implication(FuzzyOperator::Max)).is_err());
        assert!(ops.set(Parameter::Or(FuzzyOperator::Min)).is_err());
        assert_eq!(ops.and, FuzzyOperator::Prod);
        assert_eq!(ops.implication, FuzzyOperator::Min);
    }
}
