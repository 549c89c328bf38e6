//! # Codificação de Regras — Stream de Tokens
//!
//! Uma base de regras é um array plano de inteiros com sinal. Os cinco menores
//! valores representáveis do tipo são sentinelas:
//!
//! ```text
//! BEGIN     = MIN
//! RULES_END = MIN + 1
//! AND       = MIN + 2
//! OR        = MIN + 3
//! THEN      = MIN + 4
//! ```
//!
//! Qualquer outro valor é posicional: tag de entrada/saída (>= 0) ou referência
//! a função de pertinência (`mf + 1` para IS, `-(mf + 1)` para IS NOT).
//!
//! ```text
//! BEGIN  in mf AND in mf THEN out mf AND out mf  in mf THEN out mf  RULES_END
//!        └──── antecedente ────┘    └─ consequentes ┘
//! ```

use std::fmt;

use crate::error::{RuleError, RuleResult};

/// Inteiro com sinal utilizável como token de regra
///
/// Implementado para `i8`, `i16`, `i32` e `i64`. O tipo precisa comportar
/// `±(max(entradas, saídas, mfs) + 4)`.
pub trait RuleToken: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    const BEGIN: Self;
    const RULES_END: Self;
    const AND: Self;
    const OR: Self;
    const THEN: Self;

    fn to_i64(self) -> i64;

    fn from_i64(value: i64) -> Option<Self>;
}

macro_rules! impl_rule_token {
    ($($t:ty),*) => {
        $(
            impl RuleToken for $t {
                const BEGIN: Self = <$t>::MIN;
                const RULES_END: Self = <$t>::MIN + 1;
                const AND: Self = <$t>::MIN + 2;
                const OR: Self = <$t>::MIN + 3;
                const THEN: Self = <$t>::MIN + 4;

                #[inline]
                fn to_i64(self) -> i64 {
                    self as i64
                }

                #[inline]
                fn from_i64(value: i64) -> Option<Self> {
                    <$t>::try_from(value).ok()
                }
            }
        )*
    };
}

impl_rule_token!(i8, i16, i32, i64);

/// Token decodificado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Begin,
    RulesEnd,
    And,
    Or,
    Then,
    /// Valor posicional (tag ou referência de MF)
    Value(i64),
}

impl Token {
    /// Decodifica um token bruto
    #[inline]
    pub fn decode<T: RuleToken>(raw: T) -> Self {
        if raw == T::BEGIN {
            Self::Begin
        } else if raw == T::RULES_END {
            Self::RulesEnd
        } else if raw == T::AND {
            Self::And
        } else if raw == T::OR {
            Self::Or
        } else if raw == T::THEN {
            Self::Then
        } else {
            Self::Value(raw.to_i64())
        }
    }

    /// Codifica de volta para o tipo bruto
    pub fn encode<T: RuleToken>(self) -> RuleResult<T> {
        match self {
            Self::Begin => Ok(T::BEGIN),
            Self::RulesEnd => Ok(T::RULES_END),
            Self::And => Ok(T::AND),
            Self::Or => Ok(T::OR),
            Self::Then => Ok(T::THEN),
            Self::Value(v) => encode_value(v),
        }
    }

    /// Verdadeiro para os cinco sentinelas
    pub fn is_sentinel(self) -> bool {
        !matches!(self, Self::Value(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin => write!(f, "BEGIN"),
            Self::RulesEnd => write!(f, "RULES_END"),
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
            Self::Then => write!(f, "THEN"),
            Self::Value(v) => write!(f, "{}", v),
        }
    }
}

/// Valor posicional não pode colidir com a faixa reservada
fn encode_value<T: RuleToken>(value: i64) -> RuleResult<T> {
    let overflow = || RuleError::TagOverflow {
        tag: value.unsigned_abs() as usize,
    };
    let raw = T::from_i64(value).ok_or_else(overflow)?;
    if Token::decode(raw).is_sentinel() {
        return Err(overflow());
    }
    Ok(raw)
}

/// Codifica uma tag de entrada/saída
pub fn encode_tag<T: RuleToken>(tag: usize) -> RuleResult<T> {
    let value = i64::try_from(tag).map_err(|_| RuleError::TagOverflow { tag })?;
    encode_value(value).map_err(|_| RuleError::TagOverflow { tag })
}

/// Referência a uma função de pertinência dentro de uma cláusula
///
/// `index` é a posição (base zero) na tabela de MFs de entrada ou de saída.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MfRef {
    pub index: usize,
    pub negated: bool,
}

impl MfRef {
    /// `IS mf`
    pub const fn is(index: usize) -> Self {
        Self { index, negated: false }
    }

    /// `IS NOT mf`
    pub const fn is_not(index: usize) -> Self {
        Self { index, negated: true }
    }

    /// Decodifica `±(mf + 1)`. Zero não é uma referência válida.
    pub fn decode(value: i64) -> Option<Self> {
        if value == 0 {
            return None;
        }
        let index = usize::try_from(value.unsigned_abs() - 1).ok()?;
        Some(Self {
            index,
            negated: value < 0,
        })
    }

    /// Valor com sinal correspondente
    pub fn to_value(self) -> i64 {
        let v = self.index as i64 + 1;
        if self.negated { -v } else { v }
    }

    pub fn encode<T: RuleToken>(self) -> RuleResult<T> {
        encode_value(self.to_value()).map_err(|_| RuleError::TagOverflow { tag: self.index })
    }
}

/// Atalho para `MfRef::is`
pub const fn is(index: usize) -> MfRef {
    MfRef::is(index)
}

/// Atalho para `MfRef::is_not`
pub const fn is_not(index: usize) -> MfRef {
    MfRef::is_not(index)
}
