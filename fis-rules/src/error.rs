//! Erros de codificação e parsing de regras

use thiserror::Error;

pub type RuleResult<T> = Result<T, RuleError>;

/// Tipo de nome que não pôde ser resolvido
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Input,
    Output,
    Term,
}

impl std::fmt::Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
            Self::Term => write!(f, "term"),
        }
    }
}

/// Erros do módulo de regras
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuleError {
    /// Caractere inesperado no texto da regra
    #[error("Lex error at {line}:{col}: {message}")]
    LexError {
        message: String,
        line: usize,
        col: usize,
    },

    /// Sequência de tokens inválida
    #[error("Parse error at {line}:{col}: {message}")]
    ParseError {
        message: String,
        line: usize,
        col: usize,
    },

    /// Nome de variável ou termo desconhecido
    #[error("Unknown {kind} '{name}' (line {line})")]
    UnknownName {
        kind: NameKind,
        name: String,
        line: usize,
    },

    /// Tag não cabe no tipo inteiro escolhido para o stream
    #[error("Tag {tag} does not fit the rule token type")]
    TagOverflow { tag: usize },

    /// Regra sem antecedente ou sem consequente
    #[error("Empty rule: {0}")]
    EmptyRule(String),
}
