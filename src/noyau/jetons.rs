// src/noyau/jetons.rs

use std::fmt;

use super::erreur::{Erreur, Result};
use super::tables::Tables;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokKind {
    Number,
    Variable,
    Constant,
    BinaryOp,
    UnaryFn,
    BinaryFn,
    Bracket,
}

/// Jeton : genre + texte source (jamais vide). Immuable une fois construit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tok {
    kind: TokKind,
    text: String,
}

impl Tok {
    pub fn new(kind: TokKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> TokKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_open_bracket(&self) -> bool {
        self.kind == TokKind::Bracket && self.text == "("
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, TokKind::UnaryFn | TokKind::BinaryFn)
    }
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Tokenize avec les tables standard.
pub fn tokenize(s: &str) -> Result<Vec<Tok>> {
    tokenize_with(s, &Tables::standard())
}

/// Tokenize une chaîne en jetons.
///
/// - espaces ignorés partout
/// - moins unaire : un '-' en tête ou juste après '(' reçoit un 0 devant ("-x" => "0-x")
/// - x / X => variable
/// - + - * / ^ => opérateurs (selon les tables)
/// - ( ) => parenthèses
/// - suite de lettres => fonction unaire, binaire ou constante (sinon erreur)
/// - suite de chiffres et de '.' => nombre, texte brut (validé à l’évaluation)
///
/// Tout autre caractère (ex: ',') est ignoré.
pub fn tokenize_with(s: &str, tables: &Tables) -> Result<Vec<Tok>> {
    let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.is_empty() {
        return Err(Erreur::EntreeVide);
    }

    let mut out = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == 'x' || c == 'X' {
            out.push(Tok::new(TokKind::Variable, c));
            i += 1;
            continue;
        }

        if tables.est_operateur(c) {
            if c == '-' && (i == 0 || chars[i - 1] == '(') {
                out.push(Tok::new(TokKind::Number, "0"));
            }
            out.push(Tok::new(TokKind::BinaryOp, c));
            i += 1;
            continue;
        }

        if c == '(' || c == ')' {
            out.push(Tok::new(TokKind::Bracket, c));
            i += 1;
            continue;
        }

        if c.is_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();

            match tables.classer(&word) {
                Some(kind) => out.push(Tok::new(kind, word)),
                None => return Err(Erreur::IdentifiantInconnu(word)),
            }
            continue;
        }

        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let num: String = chars[start..i].iter().collect();
            out.push(Tok::new(TokKind::Number, num));
            continue;
        }

        log::trace!("caractère ignoré: {c:?}");
        i += 1;
    }

    log::debug!("jetons: {}", format_tokens(&out));
    Ok(out)
}

/// Liste de jetons en texte, séparés par des espaces.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| t.text())
        .collect::<Vec<_>>()
        .join(" ")
}
