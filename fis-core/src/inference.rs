//! # Máquina de Estados de Inferência
//!
//! O stream de regras é percorrido por uma máquina de dois estados. Cada passo
//! lê uma janela de tokens a partir da posição corrente e devolve uma
//! [`Transition`]: o próximo estado, o efeito semântico e quantos tokens foram
//! consumidos.
//!
//! ```text
//!                 in mf (AND|OR in mf)*  THEN
//!  BEGIN ──▶ Antecedent ─────────────────────▶ Consequent
//!               ▲  │ RULES_END                   │ out mf (AND out mf)*
//!               │  ▼                             │
//!               │ fim                            │
//!               └────────────────────────────────┘
//!                    token seguinte não é AND
//! ```
//!
//! Esta camada só conhece a gramática e os limites de tags. Posse e existência
//! das funções de pertinência são verificadas pelo motor.

use fis_rules::{Connector, MfRef, RuleToken, Token};

use crate::error::{FisError, FisResult};

/// Estado da máquina
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InferenceState {
    #[default]
    Antecedent,
    Consequent,
}

/// Efeito de uma transição
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// `[AND|OR] input IS [NOT] mf`
    Clause {
        /// `None` na primeira cláusula de uma regra
        combine: Option<Connector>,
        input: usize,
        mf: MfRef,
        /// A cláusula foi seguida de THEN
        closes_antecedent: bool,
    },
    /// `output IS [NOT] mf`
    Consequent {
        output: usize,
        mf: MfRef,
        /// O token seguinte não é AND
        closes_rule: bool,
    },
    /// RULES_END
    End,
}

/// Resultado de um passo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: InferenceState,
    pub effect: Effect,
    pub consumed: usize,
}

/// Quantidade de entradas e saídas endereçáveis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagBounds {
    pub inputs: usize,
    pub outputs: usize,
}

fn token_at<T: RuleToken>(tokens: &[T], pos: usize) -> FisResult<Token> {
    tokens
        .get(pos)
        .map(|raw| Token::decode(*raw))
        .ok_or_else(|| FisError::malformed(pos, "stream truncated before RULES_END"))
}

fn read_tag<T: RuleToken>(tokens: &[T], pos: usize, limit: usize, what: &str) -> FisResult<usize> {
    match token_at(tokens, pos)? {
        Token::Value(v) if v >= 0 && (v as u64) < limit as u64 => Ok(v as usize),
        Token::Value(v) => Err(FisError::malformed(
            pos,
            format!("{} tag {} out of range (0..{})", what, v, limit),
        )),
        other => Err(FisError::malformed(
            pos,
            format!("expected {} tag, found {}", what, other),
        )),
    }
}

fn read_mf<T: RuleToken>(tokens: &[T], pos: usize) -> FisResult<MfRef> {
    match token_at(tokens, pos)? {
        Token::Value(v) => MfRef::decode(v)
            .ok_or_else(|| FisError::malformed(pos, "membership reference 0 is reserved")),
        other => Err(FisError::malformed(
            pos,
            format!("expected membership reference, found {}", other),
        )),
    }
}

/// Executa um passo a partir de `pos`
pub fn step<T: RuleToken>(
    state: InferenceState,
    tokens: &[T],
    pos: usize,
    bounds: TagBounds,
) -> FisResult<Transition> {
    match state {
        InferenceState::Antecedent => {
            let (combine, start) = match token_at(tokens, pos)? {
                Token::RulesEnd => {
                    return Ok(Transition {
                        next: InferenceState::Antecedent,
                        effect: Effect::End,
                        consumed: 1,
                    });
                }
                Token::And => (Some(Connector::And), pos + 1),
                Token::Or => (Some(Connector::Or), pos + 1),
                Token::Value(_) => (None, pos),
                other => {
                    return Err(FisError::malformed(
                        pos,
                        format!("unexpected {} in antecedent", other),
                    ));
                }
            };

            let input = read_tag(tokens, start, bounds.inputs, "input")?;
            let mf = read_mf(tokens, start + 1)?;
            let after = start + 2;

            let (closes_antecedent, next, consumed) = match token_at(tokens, after)? {
                Token::Then => (true, InferenceState::Consequent, after + 1 - pos),
                Token::And | Token::Or => (false, InferenceState::Antecedent, after - pos),
                other => {
                    return Err(FisError::malformed(
                        after,
                        format!("expected AND, OR or THEN, found {}", other),
                    ));
                }
            };

            Ok(Transition {
                next,
                effect: Effect::Clause {
                    combine,
                    input,
                    mf,
                    closes_antecedent,
                },
                consumed,
            })
        }
        InferenceState::Consequent => {
            let output = read_tag(tokens, pos, bounds.outputs, "output")?;
            let mf = read_mf(tokens, pos + 1)?;

            // AND continua a lista de consequentes; qualquer outro token fecha a regra
            let more = matches!(tokens.get(pos + 2).map(|t| Token::decode(*t)), Some(Token::And));
            let (next, consumed) = if more {
                (InferenceState::Consequent, 3)
            } else {
                (InferenceState::Antecedent, 2)
            };

            Ok(Transition {
                next,
                effect: Effect::Consequent {
                    output,
                    mf,
                    closes_rule: !more,
                },
                consumed,
            })
        }
    }
}

/// Iterador de efeitos sobre um stream completo
///
/// Verifica o BEGIN inicial e o conectivo antes da primeira cláusula. Produz
/// `(posição, efeito)` e termina após `Effect::End` ou no primeiro erro.
/// Tokens após RULES_END são ignorados.
#[derive(Debug)]
pub struct RuleCursor<'a, T> {
    tokens: &'a [T],
    bounds: TagBounds,
    pos: usize,
    state: InferenceState,
    rule_open: bool,
    started: bool,
    done: bool,
}

impl<'a, T: RuleToken> RuleCursor<'a, T> {
    pub fn new(tokens: &'a [T], bounds: TagBounds) -> Self {
        Self {
            tokens,
            bounds,
            pos: 0,
            state: InferenceState::Antecedent,
            rule_open: false,
            started: false,
            done: false,
        }
    }

    pub fn state(&self) -> InferenceState {
        self.state
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    fn advance(&mut self) -> FisResult<Option<(usize, Effect)>> {
        if !self.started {
            self.started = true;
            match self.tokens.first().map(|t| Token::decode(*t)) {
                Some(Token::Begin) => self.pos = 1,
                Some(other) => {
                    return Err(FisError::malformed(0, format!("expected BEGIN, found {}", other)));
                }
                None => return Err(FisError::malformed(0, "empty rule stream")),
            }
        }

        let at = self.pos;
        let transition = step(self.state, self.tokens, at, self.bounds)?;

        match transition.effect {
            Effect::End => self.done = true,
            Effect::Clause { combine, .. } => {
                if combine.is_some() && !self.rule_open {
                    return Err(FisError::malformed(
                        at,
                        "connector before the first clause of a rule",
                    ));
                }
                self.rule_open = true;
            }
            Effect::Consequent { closes_rule, .. } => {
                if closes_rule {
                    self.rule_open = false;
                }
            }
        }

        self.state = transition.next;
        self.pos += transition.consumed;
        Ok(Some((at, transition.effect)))
    }
}

impl<T: RuleToken> Iterator for RuleCursor<'_, T> {
    type Item = FisResult<(usize, Effect)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(item) => item.map(Ok),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
