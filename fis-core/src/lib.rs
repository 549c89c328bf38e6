//! # 🌫️ fis-core — Motor de Inferência Fuzzy
//!
//! Sistemas Mamdani, Sugeno e Tsukamoto avaliados sobre bases de regras
//! codificadas como streams de tokens ([`fis_rules`]).
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌───────────────┐   ┌─────────────┐
//! │  inputs  │ → │ fuzzify  │ → │ run_inference │ → │  defuzzify  │ → outputs
//! │  crisp   │   │  μ(x)    │   │ Antecedent ⇄  │   │ centroid,   │
//! │          │   │          │   │ Consequent    │   │ wtaver, ... │
//! └──────────┘   └──────────┘   └───────────────┘   └─────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```rust
//! use fis_core::{Fis, FisType, Io, MfSide, ShapeKind};
//! use fis_rules::{Rule, RuleSet, is};
//!
//! let mut fis = Fis::setup(
//!     FisType::Mamdani,
//!     vec![Io::new(0.0, 10.0).unwrap()],
//!     vec![Io::new(0.0, 30.0).unwrap()],
//!     1,
//!     1,
//! )
//! .unwrap();
//! fis.set_membership_function(MfSide::Input, 0, 0, ShapeKind::Triangular, &[0.0, 5.0, 10.0], 1.0)
//!     .unwrap();
//! fis.set_membership_function(MfSide::Output, 0, 0, ShapeKind::Triangular, &[10.0, 15.0, 20.0], 1.0)
//!     .unwrap();
//!
//! let rules = RuleSet::builder()
//!     .rule(Rule::when(0, is(0)).then(0, is(0)))
//!     .build::<i16>()
//!     .unwrap();
//!
//! let fired = fis.evaluate(rules.tokens(), &[5.0]).unwrap();
//! assert_eq!(fired, 1);
//! assert!((fis.output(0).unwrap() - 15.0).abs() < 0.5);
//! ```

pub mod config;
pub mod defuzz;
pub mod engine;
pub mod error;
pub mod inference;
pub mod io;
pub mod membership;
pub mod operator;

pub use config::{FisConfig, FisSystem, TermConfig, VariableConfig};
pub use defuzz::DefuzzMethod;
pub use engine::{Activation, Fis, FisType, RegionPoint, WeightedSums};
pub use error::{FisError, FisResult};
pub use inference::{Effect, InferenceState, RuleCursor, TagBounds, Transition, step};
pub use io::{Io, MfSide};
pub use membership::{CustomShape, MembershipFunction, MembershipShape, ShapeInput, ShapeKind};
pub use operator::{FuzzyOperator, Operators, Parameter};
