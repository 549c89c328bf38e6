//! Construção de regras sem macros
//!
//! ```rust
//! use fis_rules::{Rule, RuleSet, is, is_not};
//!
//! const SERVICE: usize = 0;
//! const FOOD: usize = 1;
//! const TIP: usize = 0;
//! const POOR: usize = 0;
//! const RANCID: usize = 3;
//! const CHEAP: usize = 0;
//!
//! let rules = RuleSet::builder()
//!     .rule(Rule::when(SERVICE, is(POOR)).or(FOOD, is(RANCID)).then(TIP, is(CHEAP)))
//!     .rule(Rule::when(SERVICE, is_not(POOR)).then(TIP, is_not(CHEAP)))
//!     .build::<i16>()
//!     .unwrap();
//!
//! assert_eq!(rules.rule_count(), 2);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RuleError, RuleResult};
use crate::token::{MfRef, RuleToken, Token, encode_tag};

/// Conectivo entre cláusulas do antecedente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Connector {
    And,
    Or,
}

/// `input IS [NOT] mf`, precedida do conectivo que a liga à anterior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause {
    /// `None` apenas na primeira cláusula
    pub connector: Option<Connector>,
    pub tag: usize,
    pub mf: MfRef,
}

/// `output IS [NOT] mf`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consequent {
    pub tag: usize,
    pub mf: MfRef,
}

/// Uma sentença `IF ... THEN ...`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rule {
    antecedent: Vec<Clause>,
    consequents: Vec<Consequent>,
}

impl Rule {
    /// Primeira cláusula do antecedente
    pub fn when(input: usize, mf: MfRef) -> Self {
        Self {
            antecedent: vec![Clause {
                connector: None,
                tag: input,
                mf,
            }],
            consequents: Vec::new(),
        }
    }

    pub fn and(self, input: usize, mf: MfRef) -> Self {
        self.clause(Connector::And, input, mf)
    }

    pub fn or(self, input: usize, mf: MfRef) -> Self {
        self.clause(Connector::Or, input, mf)
    }

    /// Adiciona uma cláusula ao antecedente
    pub fn clause(mut self, connector: Connector, input: usize, mf: MfRef) -> Self {
        let connector = if self.antecedent.is_empty() {
            None
        } else {
            Some(connector)
        };
        self.antecedent.push(Clause {
            connector,
            tag: input,
            mf,
        });
        self
    }

    pub fn then(mut self, output: usize, mf: MfRef) -> Self {
        self.consequents.push(Consequent { tag: output, mf });
        self
    }

    /// Consequente paralelo (regra multi-saída)
    pub fn also(self, output: usize, mf: MfRef) -> Self {
        self.then(output, mf)
    }

    pub fn antecedent(&self) -> &[Clause] {
        &self.antecedent
    }

    pub fn consequents(&self) -> &[Consequent] {
        &self.consequents
    }

    /// Emite os tokens desta sentença (sem BEGIN / RULES_END)
    pub fn encode_into<T: RuleToken>(&self, out: &mut Vec<T>) -> RuleResult<()> {
        if self.antecedent.is_empty() {
            return Err(RuleError::EmptyRule("rule has no antecedent".into()));
        }
        if self.consequents.is_empty() {
            return Err(RuleError::EmptyRule("rule has no consequent".into()));
        }

        for (i, clause) in self.antecedent.iter().enumerate() {
            out.push(encode_tag(clause.tag)?);
            out.push(clause.mf.encode()?);
            let next = match self.antecedent.get(i + 1).and_then(|c| c.connector) {
                Some(Connector::And) => T::AND,
                Some(Connector::Or) => T::OR,
                None => T::THEN,
            };
            out.push(next);
        }

        for (i, consequent) in self.consequents.iter().enumerate() {
            if i > 0 {
                out.push(T::AND);
            }
            out.push(encode_tag(consequent.tag)?);
            out.push(consequent.mf.encode()?);
        }

        Ok(())
    }
}

/// Base de regras codificada
///
/// Serializa como o vetor bruto de tokens, o mesmo layout das tabelas
/// constantes usadas em firmware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet<T> {
    tokens: Vec<T>,
}

impl RuleSet<i16> {
    /// A largura final é escolhida em [`RuleSetBuilder::build`]
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }
}

impl<T: RuleToken> RuleSet<T> {
    /// Codifica uma lista de regras
    pub fn encode(rules: &[Rule]) -> RuleResult<Self> {
        let mut tokens = vec![T::BEGIN];
        for rule in rules {
            rule.encode_into(&mut tokens)?;
        }
        tokens.push(T::RULES_END);
        Ok(Self { tokens })
    }

    /// Envolve uma tabela existente sem validar
    ///
    /// A validação acontece na inferência, onde os limites do sistema são conhecidos.
    pub fn from_tokens(tokens: Vec<T>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[T] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<T> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Número de sentenças (tokens THEN antes de RULES_END)
    pub fn rule_count(&self) -> usize {
        self.decoded()
            .take_while(|t| *t != Token::RulesEnd)
            .filter(|t| *t == Token::Then)
            .count()
    }

    pub fn decoded(&self) -> impl Iterator<Item = Token> + '_ {
        self.tokens.iter().map(|&t| Token::decode(t))
    }
}

impl<T> AsRef<[T]> for RuleSet<T> {
    fn as_ref(&self) -> &[T] {
        &self.tokens
    }
}

impl<T: RuleToken> fmt::Display for RuleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for token in self.decoded() {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// Acumula regras antes da codificação
#[derive(Debug, Clone, Default)]
pub struct RuleSetBuilder {
    rules: Vec<Rule>,
}

impl RuleSetBuilder {
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn build<T: RuleToken>(&self) -> RuleResult<RuleSet<T>> {
        RuleSet::encode(&self.rules)
    }
}
