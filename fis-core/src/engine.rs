//! # Motor FIS
//!
//! Uma instância de [`Fis`] possui as variáveis, as tabelas de funções de
//! pertinência, os operadores e o estado de ciclo. Um ciclo completo é:
//!
//! ```text
//! set_input → fuzzify → run_inference → defuzzify → get_output
//! ```
//!
//! Toda configuração inválida é rejeitada sem alterar o estado anterior.

use fis_rules::{Connector, RuleToken};
use serde::{Deserialize, Serialize};

use crate::defuzz::{DefuzzMethod, Samples};
use crate::error::{FisError, FisResult};
use crate::inference::{Effect, RuleCursor, TagBounds};
use crate::io::{Io, MfSide};
use crate::membership::{MembershipFunction, MembershipShape, ShapeKind, ShapeRole};
use crate::operator::{DEFAULT_EVAL_POINTS, FuzzyOperator, MIN_EVAL_POINTS, Operators, Parameter, clamp01};

/// Estilo de inferência
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FisType {
    Mamdani,
    Sugeno,
    Tsukamoto,
}

/// Ativação Mamdani de uma função de saída
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Activation {
    /// Consequentes `IS`
    pub direct: f32,
    /// Consequentes `IS NOT`
    pub negated: f32,
}

/// Acumuladores Sugeno/Tsukamoto de uma saída
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WeightedSums {
    pub zi_wi: f32,
    pub wi: f32,
}

/// Ponto da região agregada de uma saída Mamdani
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionPoint {
    pub x: f32,
    pub y: f32,
}

/// Estado de rascunho de um ciclo; os vetores são reaproveitados
#[derive(Debug, Clone, Default)]
struct CycleState {
    input_values: Vec<f32>,
    input_degrees: Vec<f32>,
    output_activation: Vec<Activation>,
    weighted: Vec<WeightedSums>,
    rule_strengths: Vec<f32>,
    samples: Vec<f32>,
    fuzzified: bool,
    inferred: bool,
}

impl CycleState {
    fn reset_inference(&mut self) {
        self.output_activation.fill(Activation::default());
        self.weighted.fill(WeightedSums::default());
        self.rule_strengths.clear();
        self.inferred = false;
    }
}

/// Sistema de inferência fuzzy
#[derive(Debug, Clone)]
pub struct Fis {
    kind: FisType,
    inputs: Vec<Io>,
    outputs: Vec<Io>,
    input_mfs: Vec<Option<MembershipFunction>>,
    output_mfs: Vec<Option<MembershipFunction>>,
    operators: Operators,
    eval_points: usize,
    defuzz: DefuzzMethod,
    rule_weights: Option<Vec<f32>>,
    cycle: CycleState,
}

impl Fis {
    /// Cria um sistema com `n_input_mfs` e `n_output_mfs` posições de funções de pertinência
    pub fn setup(
        kind: FisType,
        inputs: Vec<Io>,
        outputs: Vec<Io>,
        n_input_mfs: usize,
        n_output_mfs: usize,
    ) -> FisResult<Self> {
        if inputs.is_empty() || outputs.is_empty() {
            return Err(FisError::InvalidParameter(
                "a FIS needs at least one input and one output".into(),
            ));
        }
        if n_input_mfs == 0 || n_output_mfs == 0 {
            return Err(FisError::InvalidParameter(
                "membership function tables cannot be empty".into(),
            ));
        }
        for io in inputs.iter().chain(outputs.iter()) {
            io.validate()?;
        }

        let cycle = CycleState {
            input_values: inputs.iter().map(|io| io.clamp(io.value)).collect(),
            input_degrees: vec![0.0; n_input_mfs],
            output_activation: vec![Activation::default(); n_output_mfs],
            weighted: vec![WeightedSums::default(); outputs.len()],
            rule_strengths: Vec::new(),
            samples: Vec::with_capacity(DEFAULT_EVAL_POINTS + 1),
            fuzzified: false,
            inferred: false,
        };

        tracing::debug!(
            kind = ?kind,
            inputs = inputs.len(),
            outputs = outputs.len(),
            input_mfs = n_input_mfs,
            output_mfs = n_output_mfs,
            "FIS configured"
        );

        Ok(Self {
            kind,
            inputs,
            outputs,
            input_mfs: vec![None; n_input_mfs],
            output_mfs: vec![None; n_output_mfs],
            operators: Operators::default(),
            eval_points: DEFAULT_EVAL_POINTS,
            defuzz: DefuzzMethod::default_for(kind),
            rule_weights: None,
            cycle,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // CONFIGURAÇÃO
    // ═══════════════════════════════════════════════════════════════════════

    pub fn set_parameter(&mut self, param: Parameter) -> FisResult<()> {
        match param {
            Parameter::EvalPoints(n) if n < MIN_EVAL_POINTS => {
                tracing::warn!(eval_points = n, "Rejected evaluation points");
                Err(FisError::InvalidParameter(format!(
                    "eval points must be >= {}, got {}",
                    MIN_EVAL_POINTS, n
                )))
            }
            Parameter::EvalPoints(n) => {
                self.eval_points = n;
                tracing::debug!(eval_points = n, "Parameter set");
                Ok(())
            }
            other => {
                if let Err(err) = self.operators.set(other) {
                    tracing::warn!(parameter = ?other, "Rejected operator");
                    return Err(err);
                }
                tracing::debug!(parameter = ?other, "Parameter set");
                Ok(())
            }
        }
    }

    pub fn set_defuzz_method(&mut self, method: DefuzzMethod) -> FisResult<()> {
        if !method.is_allowed_for(self.kind) {
            tracing::warn!(method = ?method, kind = ?self.kind, "Rejected defuzzification method");
            return Err(FisError::InvalidParameter(format!(
                "{:?} is not available for {:?} systems",
                method, self.kind
            )));
        }
        self.defuzz = method;
        tracing::debug!(method = ?method, "Defuzzification method set");
        Ok(())
    }

    fn shape_allowed(&self, side: MfSide, shape: &MembershipShape) -> bool {
        let kind = match shape {
            MembershipShape::Custom(_) => return true,
            MembershipShape::Builtin(kind) => *kind,
        };
        match (side, self.kind) {
            (MfSide::Input, _) | (MfSide::Output, FisType::Mamdani) => {
                kind.role() == ShapeRole::Conventional
            }
            (MfSide::Output, FisType::Sugeno) => {
                matches!(kind, ShapeKind::Constant | ShapeKind::Linear)
            }
            (MfSide::Output, FisType::Tsukamoto) => kind.role() == ShapeRole::Tsukamoto,
        }
    }

    /// Liga uma forma à posição `mf_tag` da tabela do lado `side`
    pub fn set_membership_function(
        &mut self,
        side: MfSide,
        io_tag: usize,
        mf_tag: usize,
        shape: impl Into<MembershipShape>,
        coefficients: &[f32],
        height: f32,
    ) -> FisResult<()> {
        let shape = shape.into();
        let (n_io, n_slots) = match side {
            MfSide::Input => (self.inputs.len(), self.input_mfs.len()),
            MfSide::Output => (self.outputs.len(), self.output_mfs.len()),
        };

        let reject = |reason: String| {
            tracing::warn!(side = ?side, io = io_tag, mf = mf_tag, "{}", reason);
            Err(FisError::InvalidParameter(reason))
        };

        if io_tag >= n_io {
            return reject(format!("{:?} tag {} out of range (0..{})", side, io_tag, n_io));
        }
        if mf_tag >= n_slots {
            return reject(format!(
                "{:?} membership slot {} out of range (0..{})",
                side, mf_tag, n_slots
            ));
        }
        if !self.shape_allowed(side, &shape) {
            return reject(format!(
                "shape {:?} cannot be used on the {:?} side of a {:?} system",
                shape, side, self.kind
            ));
        }
        if let MembershipShape::Builtin(kind) = &shape {
            let needed = kind.coefficient_count(self.inputs.len());
            if coefficients.len() < needed {
                return reject(format!(
                    "{:?} needs {} coefficients, got {}",
                    kind,
                    needed,
                    coefficients.len()
                ));
            }
        }
        if !height.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return reject("height and coefficients must be finite".to_string());
        }
        if matches!(&shape, MembershipShape::Builtin(kind) if kind.has_zero_width(coefficients)) {
            return reject(format!("{:?} width must be non-zero", shape));
        }

        let mf = MembershipFunction {
            shape,
            coefficients: coefficients.to_vec(),
            height: clamp01(height),
            owner: io_tag,
        };
        tracing::debug!(side = ?side, io = io_tag, mf = mf_tag, "Membership function bound");
        match side {
            MfSide::Input => self.input_mfs[mf_tag] = Some(mf),
            MfSide::Output => self.output_mfs[mf_tag] = Some(mf),
        }
        Ok(())
    }

    /// Peso por regra; regras além do fim do vetor usam peso 1
    pub fn set_rule_weights(&mut self, weights: Vec<f32>) -> FisResult<()> {
        if let Some(pos) = weights.iter().position(|w| !w.is_finite()) {
            tracing::warn!(rule = pos, "Rejected rule weights");
            return Err(FisError::InvalidParameter(format!(
                "rule weight {} is not finite",
                pos
            )));
        }
        tracing::debug!(rules = weights.len(), "Rule weights set");
        self.rule_weights = Some(weights);
        Ok(())
    }

    pub fn clear_rule_weights(&mut self) {
        self.rule_weights = None;
    }

    #[inline]
    fn rule_weight(&self, rule: usize) -> f32 {
        self.rule_weights
            .as_ref()
            .and_then(|w| w.get(rule))
            .map_or(1.0, |w| clamp01(*w))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ENTRADAS E SAÍDAS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn set_input(&mut self, tag: usize, value: f32) -> FisResult<()> {
        let n = self.inputs.len();
        let input = self
            .inputs
            .get_mut(tag)
            .ok_or_else(|| FisError::InvalidParameter(format!("input tag {} out of range (0..{})", tag, n)))?;
        if value.is_nan() {
            return Err(FisError::InvalidParameter(format!("input {} is NaN", tag)));
        }
        input.value = value;
        Ok(())
    }

    pub fn input(&self, tag: usize) -> FisResult<f32> {
        self.inputs
            .get(tag)
            .map(|io| io.value)
            .ok_or_else(|| FisError::InvalidParameter(format!("input tag {} out of range", tag)))
    }

    /// Valor bruto da saída; `NaN` quando nenhuma regra a ativou
    pub fn get_output(&self, tag: usize) -> FisResult<f32> {
        self.outputs
            .get(tag)
            .map(|io| io.value)
            .ok_or_else(|| FisError::InvalidParameter(format!("output tag {} out of range", tag)))
    }

    /// Valor da saída, com ativação nula reportada como `NoActivation`
    pub fn output(&self, tag: usize) -> FisResult<f32> {
        let value = self.get_output(tag)?;
        if value.is_nan() {
            return Err(FisError::NoActivation(tag));
        }
        Ok(value)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // CICLO
    // ═══════════════════════════════════════════════════════════════════════

    /// Satura as entradas em `[min, max]` e recalcula o grau de cada função de entrada
    pub fn fuzzify(&mut self) -> FisResult<()> {
        if let Some(slot) = self.input_mfs.iter().position(Option::is_none) {
            return Err(FisError::NotConfigured(format!(
                "input membership function {} is not bound",
                slot
            )));
        }

        for (io, value) in self.inputs.iter_mut().zip(self.cycle.input_values.iter_mut()) {
            io.value = io.clamp(io.value);
            *value = io.value;
        }
        for (degree, mf) in self
            .cycle
            .input_degrees
            .iter_mut()
            .zip(self.input_mfs.iter().flatten())
        {
            let io = &self.inputs[mf.owner];
            *degree = mf.degree(io.value, io.min, io.max);
        }
        self.cycle.fuzzified = true;
        Ok(())
    }

    /// Confere posse e existência das funções referenciadas por um efeito
    fn check_effect(&self, position: usize, effect: &Effect) -> FisResult<()> {
        let (table, io, mf, mf_pos, side) = match *effect {
            Effect::Clause {
                combine, input, mf, ..
            } => {
                let mf_pos = position + if combine.is_some() { 2 } else { 1 };
                (&self.input_mfs, input, mf, mf_pos, "input")
            }
            Effect::Consequent { output, mf, .. } => {
                if mf.negated && self.kind != FisType::Mamdani {
                    return Err(FisError::malformed(
                        position + 1,
                        format!("negated consequents require a Mamdani system, not {:?}", self.kind),
                    ));
                }
                (&self.output_mfs, output, mf, position + 1, "output")
            }
            Effect::End => return Ok(()),
        };
        match table.get(mf.index).and_then(Option::as_ref) {
            None => Err(FisError::malformed(
                mf_pos,
                format!("{} membership function {} is not bound", side, mf.index),
            )),
            Some(def) if def.owner != io => Err(FisError::malformed(
                mf_pos,
                format!(
                    "{} membership function {} belongs to {} {}, not {}",
                    side, mf.index, side, def.owner, io
                ),
            )),
            Some(_) => Ok(()),
        }
    }

    fn bounds(&self) -> TagBounds {
        TagBounds {
            inputs: self.inputs.len(),
            outputs: self.outputs.len(),
        }
    }

    /// Avalia o stream de regras e devolve o número de regras fechadas
    ///
    /// O stream é validado por completo antes de qualquer acumulador ser
    /// alterado; um stream malformado deixa o estado do ciclo intacto.
    pub fn run_inference<T: RuleToken>(&mut self, rules: &[T]) -> FisResult<usize> {
        if !self.cycle.fuzzified {
            return Err(FisError::NotConfigured(
                "fuzzify must run before inference".into(),
            ));
        }
        if self.output_mfs.iter().any(Option::is_none) {
            return Err(FisError::NotConfigured(
                "every output membership function must be bound".into(),
            ));
        }

        for item in RuleCursor::new(rules, self.bounds()) {
            let checked = item.and_then(|(position, effect)| self.check_effect(position, &effect));
            if let Err(err) = checked {
                tracing::warn!(error = %err, "Malformed rule stream");
                return Err(err);
            }
        }

        self.cycle.reset_inference();

        let ops = self.operators;
        let mut strength = 0.0f32;
        let mut closed = 0usize;

        for item in RuleCursor::new(rules, self.bounds()) {
            let (_, effect) = item?;
            match effect {
                Effect::Clause {
                    combine,
                    mf,
                    closes_antecedent,
                    ..
                } => {
                    let fx = clamp01(self.cycle.input_degrees[mf.index]);
                    let degree = if mf.negated { 1.0 - fx } else { fx };
                    strength = match combine {
                        None => FuzzyOperator::Sum.apply(0.0, degree),
                        Some(Connector::And) => ops.and.apply(strength, degree),
                        Some(Connector::Or) => ops.or.apply(strength, degree),
                    };
                    if closes_antecedent {
                        let rule = self.cycle.rule_strengths.len();
                        strength *= self.rule_weight(rule);
                        self.cycle.rule_strengths.push(strength);
                        tracing::trace!(rule, strength, "Rule strength");
                    }
                }
                Effect::Consequent {
                    output,
                    mf,
                    closes_rule,
                } => {
                    self.apply_consequent(output, mf.index, mf.negated, strength);
                    if closes_rule {
                        closed += 1;
                        strength = 0.0;
                    }
                }
                Effect::End => break,
            }
        }

        self.cycle.inferred = true;
        let fired = self.cycle.rule_strengths.iter().filter(|w| **w > 0.0).count();
        tracing::debug!(rules = closed, fired, "Inference complete");
        Ok(closed)
    }

    fn apply_consequent(&mut self, output: usize, mf_index: usize, negated: bool, strength: f32) {
        let Some(mf) = self.output_mfs[mf_index].as_ref() else {
            return;
        };
        let io = &self.outputs[output];
        match self.kind {
            FisType::Mamdani => {
                let activation = &mut self.cycle.output_activation[mf_index];
                let slot = if negated {
                    &mut activation.negated
                } else {
                    &mut activation.direct
                };
                *slot = self.operators.aggregation.apply(*slot, strength);
            }
            FisType::Sugeno | FisType::Tsukamoto if strength > 0.0 => {
                let zi = if self.kind == FisType::Sugeno {
                    mf.sugeno_value(&self.cycle.input_values, io.min, io.max)
                } else {
                    let zi = mf.tsukamoto_value(strength, &self.cycle.input_values, io.min, io.max);
                    if zi.is_finite() { io.clamp(zi) } else { zi }
                };
                let sums = &mut self.cycle.weighted[output];
                sums.zi_wi += zi * strength;
                sums.wi += strength;
            }
            _ => {}
        }
    }

    /// Curva agregada de uma saída Mamdani no ponto `x`
    pub fn aggregate_output_curve(&self, output: usize, x: f32) -> FisResult<f32> {
        self.require_mamdani_output(output)?;
        Ok(self.curve_at(output, x))
    }

    fn curve_at(&self, output: usize, x: f32) -> f32 {
        let io = &self.outputs[output];
        let ops = &self.operators;
        let mut y = 0.0f32;
        for (mf, activation) in self.output_mfs.iter().zip(&self.cycle.output_activation) {
            let Some(mf) = mf.as_ref().filter(|mf| mf.owner == output) else {
                continue;
            };
            let mu = clamp01(mf.degree(x, io.min, io.max));
            y = ops.aggregation.apply(y, ops.implication.apply(activation.direct, mu));
            y = ops.aggregation.apply(y, ops.implication.apply(activation.negated, 1.0 - mu));
        }
        y
    }

    fn require_mamdani_output(&self, output: usize) -> FisResult<()> {
        if self.kind != FisType::Mamdani {
            return Err(FisError::InvalidParameter(format!(
                "{:?} systems have no aggregated output region",
                self.kind
            )));
        }
        if output >= self.outputs.len() {
            return Err(FisError::InvalidParameter(format!(
                "output tag {} out of range",
                output
            )));
        }
        Ok(())
    }

    #[inline]
    fn resolution(&self, output: usize) -> f32 {
        self.outputs[output].span() / self.eval_points as f32
    }

    /// Amostras `eval_points + 1` da região agregada de uma saída
    pub fn aggregated_region(&self, output: usize) -> FisResult<Vec<RegionPoint>> {
        self.require_mamdani_output(output)?;
        let min = self.outputs[output].min;
        let res = self.resolution(output);
        Ok((0..=self.eval_points)
            .map(|k| {
                let x = min + res * k as f32;
                RegionPoint {
                    x,
                    y: self.curve_at(output, x),
                }
            })
            .collect())
    }

    /// Converte o resultado da inferência em valores crisp
    pub fn defuzzify(&mut self) -> FisResult<()> {
        if !self.cycle.inferred {
            return Err(FisError::NotConfigured(
                "defuzzify requires a successful inference".into(),
            ));
        }

        let mut ys = std::mem::take(&mut self.cycle.samples);
        for output in 0..self.outputs.len() {
            let value = if self.kind == FisType::Mamdani {
                let min = self.outputs[output].min;
                let res = self.resolution(output);
                ys.clear();
                ys.extend((0..=self.eval_points).map(|k| self.curve_at(output, min + res * k as f32)));
                self.defuzz.apply_sampled(&Samples { ys: &ys, x0: min, res })
            } else {
                let sums = self.cycle.weighted[output];
                self.defuzz.apply_weighted(sums.zi_wi, sums.wi)
            };

            let io = &mut self.outputs[output];
            io.value = if value.is_finite() { io.clamp(value) } else { value };
            tracing::debug!(output, value = io.value, "Output defuzzified");
        }
        self.cycle.samples = ys;
        Ok(())
    }

    /// `set_input` para todas as entradas, seguido de um ciclo completo
    pub fn evaluate<T: RuleToken>(&mut self, rules: &[T], inputs: &[f32]) -> FisResult<usize> {
        if inputs.len() != self.inputs.len() {
            return Err(FisError::InvalidParameter(format!(
                "expected {} inputs, got {}",
                self.inputs.len(),
                inputs.len()
            )));
        }
        if inputs.iter().any(|x| x.is_nan()) {
            return Err(FisError::InvalidParameter("inputs must not be NaN".into()));
        }
        for (io, x) in self.inputs.iter_mut().zip(inputs) {
            io.value = *x;
        }
        self.fuzzify()?;
        let rules = self.run_inference(rules)?;
        self.defuzzify()?;
        Ok(rules)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // INSPEÇÃO
    // ═══════════════════════════════════════════════════════════════════════

    pub fn kind(&self) -> FisType {
        self.kind
    }

    pub fn inputs(&self) -> &[Io] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Io] {
        &self.outputs
    }

    pub fn operators(&self) -> Operators {
        self.operators
    }

    pub fn eval_points(&self) -> usize {
        self.eval_points
    }

    pub fn defuzz_method(&self) -> DefuzzMethod {
        self.defuzz
    }

    pub fn rule_weights(&self) -> Option<&[f32]> {
        self.rule_weights.as_deref()
    }

    pub fn membership_function(&self, side: MfSide, mf_tag: usize) -> Option<&MembershipFunction> {
        let table = match side {
            MfSide::Input => &self.input_mfs,
            MfSide::Output => &self.output_mfs,
        };
        table.get(mf_tag).and_then(Option::as_ref)
    }

    /// Força de cada regra do último ciclo, já ponderada
    pub fn rule_strengths(&self) -> &[f32] {
        &self.cycle.rule_strengths
    }

    pub fn input_degree(&self, mf_tag: usize) -> Option<f32> {
        self.cycle.input_degrees.get(mf_tag).copied()
    }

    pub fn output_activation(&self, mf_tag: usize) -> Option<Activation> {
        self.cycle.output_activation.get(mf_tag).copied()
    }

    pub fn weighted_sums(&self, output: usize) -> Option<WeightedSums> {
        self.cycle.weighted.get(output).copied()
    }
}
