//! Variáveis de entrada e saída

use serde::{Deserialize, Serialize};

use crate::error::{FisError, FisResult};

/// Variável crisp com universo `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Io {
    pub min: f32,
    pub max: f32,
    #[serde(default)]
    pub value: f32,
}

impl Io {
    /// Cria uma variável; o valor inicial é `min`
    pub fn new(min: f32, max: f32) -> FisResult<Self> {
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return Err(FisError::InvalidParameter(format!(
                "variable range [{}, {}] must be finite with min < max",
                min, max
            )));
        }
        Ok(Self {
            min,
            max,
            value: min,
        })
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    #[inline]
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    pub(crate) fn validate(&self) -> FisResult<()> {
        Self::new(self.min, self.max).map(|_| ())
    }
}

/// Lado de uma função de pertinência
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MfSide {
    Input,
    Output,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_at_min() {
        let io = Io::new(-1.0, 3.0).unwrap();
        assert_eq!(io.value, -1.0);
        assert_eq!(io.span(), 4.0);
    }

    #[test]
    fn test_rejects_empty_range() {
        assert!(Io::new(2.0, 2.0).is_err());
        assert!(Io::new(0.0, f32::INFINITY).is_err());
    }

    #[test]
    fn test_clamp() {
        let io = Io::new(0.0, 10.0).unwrap();
        assert_eq!(io.clamp(12.0), 10.0);
        assert_eq!(io.clamp(-3.0), 0.0);
    }
}
