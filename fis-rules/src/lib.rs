//! # 📜 fis-rules — Codificação de Regras Fuzzy
//!
//! Representa bases de regras `IF ... THEN ...` como um stream plano de
//! inteiros com sinal, delimitado por sentinelas. É o "formato de arquivo"
//! consumido pela máquina de inferência do `fis-core`.
//!
//! ## Três formas de produzir o mesmo stream
//!
//! ```text
//! ┌───────────────────┐  ┌───────────────────┐  ┌───────────────────┐
//! │ Tabela constante  │  │  Rule builder     │  │  Texto IF/THEN    │
//! │  [i16; N]         │  │  Rule::when(..)   │  │  parse_rules(..)  │
//! └─────────┬─────────┘  └─────────┬─────────┘  └─────────┬─────────┘
//!           └──────────────────────┼──────────────────────┘
//!                                  ↓
//!                     BEGIN  in mf THEN out mf ... RULES_END
//! ```
//!
//! ## Exemplo
//!
//! ```rust
//! use fis_rules::{NameTable, RuleSet, parse_rules};
//!
//! let mut names = NameTable::new();
//! names.add_input("service", 0).add_input_term(0, "poor", 0);
//! names.add_output("tip", 0).add_output_term(0, "cheap", 0);
//!
//! let rules = parse_rules("IF service IS poor THEN tip IS cheap", &names).unwrap();
//! let set: RuleSet<i16> = RuleSet::encode(&rules).unwrap();
//!
//! assert_eq!(set.tokens(), &[i16::MIN, 0, 1, i16::MIN + 4, 0, 1, i16::MIN + 1]);
//! ```

pub mod builder;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use builder::{Clause, Connector, Consequent, Rule, RuleSet, RuleSetBuilder};
pub use error::{NameKind, RuleError, RuleResult};
pub use parser::{NameTable, TagResolver, parse_rules};
pub use token::{MfRef, RuleToken, Token, encode_tag, is, is_not};
