//! Lexer da gramática textual de regras
//!
//! Palavras-chave não diferenciam maiúsculas; `#` inicia comentário até o fim da linha.

use logos::Logos;

use crate::error::{RuleError, RuleResult};

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"#[^\n]*")]
pub enum Lexeme {
    #[token("if", ignore(ascii_case))]
    If,
    #[token("then", ignore(ascii_case))]
    Then,
    #[token("and", ignore(ascii_case))]
    And,
    #[token("or", ignore(ascii_case))]
    Or,
    #[token("is", ignore(ascii_case))]
    Is,
    #[token("not", ignore(ascii_case))]
    Not,
    #[token("end", ignore(ascii_case))]
    End,
    #[token(";")]
    Semi,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_\-]*", |lex| lex.slice().to_string())]
    Ident(String),
}

/// Lexema com posição (linha/coluna a partir de 1)
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub lexeme: Lexeme,
    pub line: usize,
    pub col: usize,
}

pub fn tokenize(source: &str) -> RuleResult<Vec<Spanned>> {
    let line_starts: Vec<usize> = std::iter::once(0)
        .chain(source.match_indices('\n').map(|(i, _)| i + 1))
        .collect();

    let mut out = Vec::new();
    let mut lex = Lexeme::lexer(source);

    while let Some(result) = lex.next() {
        let span = lex.span();
        let line = line_starts.partition_point(|&start| start <= span.start);
        let col = span.start - line_starts[line - 1] + 1;

        match result {
            Ok(lexeme) => out.push(Spanned { lexeme, line, col }),
            Err(_) => {
                return Err(RuleError::LexError {
                    message: format!("Unexpected character: '{}'", &source[span]),
                    line,
                    col,
                });
            }
        }
    }

    Ok(out)
}
