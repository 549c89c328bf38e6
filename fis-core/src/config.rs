//! # Configuração JSON
//!
//! Descreve um sistema completo com nomes: variáveis, termos, operadores e
//! regras em texto. [`FisConfig::build`] produz um [`FisSystem`] pronto para
//! avaliação por nome.
//!
//! ```json
//! {
//!   "type": "mamdani",
//!   "inputs": [{ "name": "service", "min": 0, "max": 10, "terms": [
//!     { "name": "poor", "shape": "trimf", "coefficients": [0, 0, 5] }
//!   ]}],
//!   "outputs": [{ "name": "tip", "min": 0, "max": 30, "terms": [
//!     { "name": "cheap", "shape": "trimf", "coefficients": [0, 5, 10] }
//!   ]}],
//!   "rules": ["IF service IS poor THEN tip IS cheap"]
//! }
//! ```

use std::collections::{HashMap, HashSet};

use fis_rules::{NameTable, RuleSet, parse_rules};
use serde::{Deserialize, Serialize};

use crate::defuzz::DefuzzMethod;
use crate::engine::{Fis, FisType};
use crate::error::{FisError, FisResult};
use crate::io::{Io, MfSide};
use crate::membership::ShapeKind;
use crate::operator::{FuzzyOperator, Parameter};

fn default_height() -> f32 {
    1.0
}

/// Termo linguístico: uma função de pertinência com nome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermConfig {
    pub name: String,
    pub shape: ShapeKind,
    pub coefficients: Vec<f32>,
    #[serde(default = "default_height")]
    pub height: f32,
}

/// Variável de entrada ou saída com seus termos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableConfig {
    pub name: String,
    pub min: f32,
    pub max: f32,
    #[serde(default)]
    pub terms: Vec<TermConfig>,
}

/// Descrição completa de um sistema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FisConfig {
    #[serde(rename = "type")]
    pub kind: FisType,
    pub inputs: Vec<VariableConfig>,
    pub outputs: Vec<VariableConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub and: Option<FuzzyOperator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub or: Option<FuzzyOperator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implication: Option<FuzzyOperator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<FuzzyOperator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_points: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defuzz: Option<DefuzzMethod>,
    /// Regras na gramática `IF ... THEN ...`
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_weights: Option<Vec<f32>>,
}

fn check_unique<'a>(what: &str, names: impl IntoIterator<Item = &'a str>) -> FisResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(FisError::Config(format!("duplicate {} name '{}'", what, name)));
        }
    }
    Ok(())
}

impl FisConfig {
    pub fn from_json(json: &str) -> FisResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> FisResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Monta o motor, a tabela de nomes e a base de regras codificada
    pub fn build(&self) -> FisResult<FisSystem> {
        check_unique("input", self.inputs.iter().map(|v| v.name.as_str()))?;
        check_unique("output", self.outputs.iter().map(|v| v.name.as_str()))?;
        for var in self.inputs.iter().chain(&self.outputs) {
            check_unique("term", var.terms.iter().map(|t| t.name.as_str()))?;
        }

        let to_io = |v: &VariableConfig| Io::new(v.min, v.max);
        let inputs = self.inputs.iter().map(to_io).collect::<FisResult<Vec<_>>>()?;
        let outputs = self.outputs.iter().map(to_io).collect::<FisResult<Vec<_>>>()?;
        let n_input_mfs = self.inputs.iter().map(|v| v.terms.len()).sum();
        let n_output_mfs = self.outputs.iter().map(|v| v.terms.len()).sum();

        let mut engine = Fis::setup(self.kind, inputs, outputs, n_input_mfs, n_output_mfs)?;

        let operators = [
            self.and.map(Parameter::And),
            self.or.map(Parameter::Or),
            self.implication.map(Parameter::Implication),
            self.aggregation.map(Parameter::Aggregation),
            self.eval_points.map(Parameter::EvalPoints),
        ];
        for param in operators.into_iter().flatten() {
            engine.set_parameter(param)?;
        }
        if let Some(method) = self.defuzz {
            engine.set_defuzz_method(method)?;
        }

        let mut names = NameTable::new();
        let sides = [
            (MfSide::Input, &self.inputs),
            (MfSide::Output, &self.outputs),
        ];
        for (side, vars) in sides {
            // tags de MF são globais por lado, na ordem de declaração
            let mut mf_tag = 0;
            for (io_tag, var) in vars.iter().enumerate() {
                match side {
                    MfSide::Input => names.add_input(var.name.as_str(), io_tag),
                    MfSide::Output => names.add_output(var.name.as_str(), io_tag),
                };
                for term in &var.terms {
                    engine.set_membership_function(
                        side,
                        io_tag,
                        mf_tag,
                        term.shape,
                        &term.coefficients,
                        term.height,
                    )?;
                    match side {
                        MfSide::Input => names.add_input_term(io_tag, term.name.as_str(), mf_tag),
                        MfSide::Output => names.add_output_term(io_tag, term.name.as_str(), mf_tag),
                    };
                    mf_tag += 1;
                }
            }
        }

        let source = self.rules.join("\n");
        let rules: RuleSet<i16> = RuleSet::encode(&parse_rules(&source, &names)?)?;

        if let Some(weights) = &self.rule_weights {
            engine.set_rule_weights(weights.clone())?;
        }

        tracing::debug!(
            rules = rules.rule_count(),
            tokens = rules.len(),
            "FIS built from configuration"
        );

        Ok(FisSystem {
            engine,
            rules,
            names,
            input_names: self.inputs.iter().map(|v| v.name.clone()).collect(),
            output_names: self.outputs.iter().map(|v| v.name.clone()).collect(),
        })
    }
}

/// Motor, regras e nomes de um sistema configurado
#[derive(Debug, Clone)]
pub struct FisSystem {
    engine: Fis,
    rules: RuleSet<i16>,
    names: NameTable,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl FisSystem {
    pub fn engine(&self) -> &Fis {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Fis {
        &mut self.engine
    }

    pub fn rules(&self) -> &RuleSet<i16> {
        &self.rules
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Avalia um ciclo completo; entradas omitidas mantêm o valor anterior
    ///
    /// Saídas sem ativação aparecem como `NaN`.
    pub fn evaluate(&mut self, inputs: &[(&str, f32)]) -> FisResult<HashMap<String, f32>> {
        let mut tagged = Vec::with_capacity(inputs.len());
        for (name, value) in inputs {
            let tag = self
                .input_names
                .iter()
                .position(|n| n == name)
                .ok_or_else(|| FisError::InvalidParameter(format!("unknown input '{}'", name)))?;
            if value.is_nan() {
                return Err(FisError::InvalidParameter(format!("input '{}' is NaN", name)));
            }
            tagged.push((tag, *value));
        }
        for (tag, value) in tagged {
            self.engine.set_input(tag, value)?;
        }

        self.engine.fuzzify()?;
        self.engine.run_inference(self.rules.tokens())?;
        self.engine.defuzzify()?;

        self.output_names
            .iter()
            .enumerate()
            .map(|(tag, name)| Ok((name.clone(), self.engine.get_output(tag)?)))
            .collect()
    }
}
