//! Parser da gramática textual de regras
//!
//! ```text
//! rules      := rule*
//! rule       := IF clause ((AND | OR) clause)* THEN clause (AND clause)* [END | ;]
//! clause     := name IS [NOT] term
//! ```
//!
//! Os nomes são resolvidos para tags através de um [`TagResolver`]; o resultado
//! é a mesma lista de [`Rule`] que o builder produz.

use std::collections::HashMap;

use crate::builder::{Connector, Rule};
use crate::error::{NameKind, RuleError, RuleResult};
use crate::lexer::{Lexeme, Spanned, tokenize};
use crate::token::MfRef;

/// Resolve nomes de variáveis e termos para tags
pub trait TagResolver {
    fn input(&self, name: &str) -> Option<usize>;

    fn output(&self, name: &str) -> Option<usize>;

    /// Índice na tabela de MFs de entrada do termo `term` da entrada `input`
    fn input_term(&self, input: usize, term: &str) -> Option<usize>;

    /// Índice na tabela de MFs de saída do termo `term` da saída `output`
    fn output_term(&self, output: usize, term: &str) -> Option<usize>;
}

/// Tabela de nomes baseada em `HashMap`
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    inputs: HashMap<String, usize>,
    outputs: HashMap<String, usize>,
    input_terms: HashMap<(usize, String), usize>,
    output_terms: HashMap<(usize, String), usize>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_input(&mut self, name: impl Into<String>, tag: usize) -> &mut Self {
        self.inputs.insert(name.into(), tag);
        self
    }

    pub fn add_output(&mut self, name: impl Into<String>, tag: usize) -> &mut Self {
        self.outputs.insert(name.into(), tag);
        self
    }

    pub fn add_input_term(&mut self, input: usize, term: impl Into<String>, mf: usize) -> &mut Self {
        self.input_terms.insert((input, term.into()), mf);
        self
    }

    pub fn add_output_term(&mut self, output: usize, term: impl Into<String>, mf: usize) -> &mut Self {
        self.output_terms.insert((output, term.into()), mf);
        self
    }

    /// Pares (nome, tag) das saídas, ordenados por tag
    pub fn outputs(&self) -> Vec<(&str, usize)> {
        let mut out: Vec<_> = self.outputs.iter().map(|(n, &t)| (n.as_str(), t)).collect();
        out.sort_by_key(|&(_, t)| t);
        out
    }
}

impl TagResolver for NameTable {
    fn input(&self, name: &str) -> Option<usize> {
        self.inputs.get(name).copied()
    }

    fn output(&self, name: &str) -> Option<usize> {
        self.outputs.get(name).copied()
    }

    fn input_term(&self, input: usize, term: &str) -> Option<usize> {
        self.input_terms.get(&(input, term.to_string())).copied()
    }

    fn output_term(&self, output: usize, term: &str) -> Option<usize> {
        self.output_terms.get(&(output, term.to_string())).copied()
    }
}

/// Faz o parsing de zero ou mais regras
pub fn parse_rules<R: TagResolver>(source: &str, resolver: &R) -> RuleResult<Vec<Rule>> {
    let tokens = tokenize(source)?;
    Parser::new(tokens, resolver).parse()
}

#[derive(Clone, Copy)]
enum Side {
    Input,
    Output,
}

struct Parser<'a, R> {
    tokens: Vec<Spanned>,
    pos: usize,
    resolver: &'a R,
}

impl<'a, R: TagResolver> Parser<'a, R> {
    fn new(tokens: Vec<Spanned>, resolver: &'a R) -> Self {
        Self {
            tokens,
            pos: 0,
            resolver,
        }
    }

    fn parse(&mut self) -> RuleResult<Vec<Rule>> {
        let mut rules = Vec::new();

        while !self.is_at_end() {
            if matches!(self.peek(), Some(Lexeme::Semi | Lexeme::End)) {
                self.advance();
                continue;
            }
            rules.push(self.parse_rule()?);
        }

        Ok(rules)
    }

    fn parse_rule(&mut self) -> RuleResult<Rule> {
        self.expect(Lexeme::If, "IF")?;

        let (tag, mf) = self.parse_clause(Side::Input)?;
        let mut rule = Rule::when(tag, mf);

        loop {
            let connector = match self.peek() {
                Some(Lexeme::And) => Connector::And,
                Some(Lexeme::Or) => Connector::Or,
                Some(Lexeme::Then) => {
                    self.advance();
                    break;
                }
                _ => return Err(self.error("expected AND, OR or THEN")),
            };
            self.advance();
            let (tag, mf) = self.parse_clause(Side::Input)?;
            rule = rule.clause(connector, tag, mf);
        }

        let (tag, mf) = self.parse_clause(Side::Output)?;
        rule = rule.then(tag, mf);

        loop {
            match self.peek() {
                Some(Lexeme::And) => {
                    self.advance();
                    let (tag, mf) = self.parse_clause(Side::Output)?;
                    rule = rule.also(tag, mf);
                }
                Some(Lexeme::End | Lexeme::Semi) => {
                    self.advance();
                    break;
                }
                Some(Lexeme::If) | None => break,
                _ => return Err(self.error("expected AND, END or a new rule")),
            }
        }

        Ok(rule)
    }

    fn parse_clause(&mut self, side: Side) -> RuleResult<(usize, MfRef)> {
        let line = self.line();
        let name = self.expect_ident("variable name")?;
        self.expect(Lexeme::Is, "IS")?;

        let negated = if matches!(self.peek(), Some(Lexeme::Not)) {
            self.advance();
            true
        } else {
            false
        };

        let term = self.expect_ident("term name")?;

        let (tag, index) = match side {
            Side::Input => {
                let tag = self
                    .resolver
                    .input(&name)
                    .ok_or_else(|| unknown(NameKind::Input, &name, line))?;
                let index = self
                    .resolver
                    .input_term(tag, &term)
                    .ok_or_else(|| unknown(NameKind::Term, &term, line))?;
                (tag, index)
            }
            Side::Output => {
                let tag = self
                    .resolver
                    .output(&name)
                    .ok_or_else(|| unknown(NameKind::Output, &name, line))?;
                let index = self
                    .resolver
                    .output_term(tag, &term)
                    .ok_or_else(|| unknown(NameKind::Term, &term, line))?;
                (tag, index)
            }
        };

        Ok((tag, MfRef { index, negated }))
    }

    // ===== Helpers =====

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Lexeme> {
        self.tokens.get(self.pos).map(|t| &t.lexeme)
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    fn line(&self) -> usize {
        self.position().0
    }

    fn position(&self) -> (usize, usize) {
        match self.tokens.get(self.pos).or_else(|| self.tokens.last()) {
            Some(t) => (t.line, t.col),
            None => (1, 1),
        }
    }

    fn expect(&mut self, lexeme: Lexeme, what: &str) -> RuleResult<()> {
        if self.peek() == Some(&lexeme) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&format!("expected {}", what)))
        }
    }

    fn expect_ident(&mut self, what: &str) -> RuleResult<String> {
        match self.peek() {
            Some(Lexeme::Ident(name)) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error(&format!("expected {}", what))),
        }
    }

    fn error(&self, message: &str) -> RuleError {
        let (line, col) = self.position();
        let found = match self.peek() {
            Some(lexeme) => format!("{:?}", lexeme),
            None => "end of input".to_string(),
        };
        RuleError::ParseError {
            message: format!("{}, found {}", message, found),
            line,
            col,
        }
    }
}

fn unknown(kind: NameKind, name: &str, line: usize) -> RuleError {
    RuleError::UnknownName {
        kind,
        name: name.to_string(),
        line,
    }
}
