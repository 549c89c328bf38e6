//! Erros do motor de inferência

use fis_rules::RuleError;
use thiserror::Error;

pub type FisResult<T> = Result<T, FisError>;

/// Erros do FIS
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FisError {
    /// Operador, método ou valor incompatível com o sistema
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operação invocada antes da configuração necessária
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// Stream de regras inválido; nenhum acumulador foi alterado
    #[error("Malformed rule stream at token {position}: {reason}")]
    MalformedRuleStream { position: usize, reason: String },

    /// Nenhuma regra ativou a saída indicada
    #[error("No activation on output {0}")]
    NoActivation(usize),

    /// Erro de codificação ou parsing de regras
    #[error("Rule error: {0}")]
    Rules(#[from] RuleError),

    /// Erro ao carregar/salvar configuração
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FisError {
    pub(crate) fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRuleStream {
            position,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for FisError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
