// src/noyau/rpn.rs
//
// Shunting-yard : jetons infixes -> RPN (postfix)
//
// Règles:
// - nombres, variable, constantes : sortie directe
// - fonctions : empilées sans condition, elles sortent quand un opérateur
//   les chasse ou en fin d’entrée (leur argument est la parenthèse qui suit)
// - '^' associatif à droite : un '^' ne chasse jamais un autre '^'
// - '(' bloque toute sortie ; ')' vide jusqu’à '('

use super::erreur::{Erreur, Result};
use super::jetons::{format_tokens, Tok, TokKind};

fn precedence(op: &str) -> i32 {
    match op {
        "+" | "-" => 1,
        "*" | "/" => 2,
        "^" => 3,
        _ => 0,
    }
}

fn is_right_associative(op: &str) -> bool {
    op == "^"
}

/// Le sommet `top` doit-il sortir avant d’empiler l’opérateur `op` ?
fn doit_depiler(op: &str, top: &Tok) -> bool {
    match top.kind() {
        // fonction dont l’argument est fermé : priorité maximale
        TokKind::UnaryFn | TokKind::BinaryFn => true,
        TokKind::BinaryOp => {
            let p_top = precedence(top.text());
            let p_op = precedence(op);
            if is_right_associative(op) {
                p_top > p_op
            } else {
                p_top >= p_op
            }
        }
        _ => false,
    }
}

/// Convertit une suite de jetons infixes en RPN.
///
/// Exemple:
///   jetons: sin ( pi / 2 ) + 1
///   rpn:    pi 2 / sin 1 +
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    for tok in tokens.iter().cloned() {
        match tok.kind() {
            TokKind::Number | TokKind::Variable | TokKind::Constant => out.push(tok),

            TokKind::UnaryFn | TokKind::BinaryFn => ops.push(tok),

            TokKind::Bracket if tok.text() == "(" => ops.push(tok),

            TokKind::Bracket => {
                // dépile jusqu’à '(' (jetée)
                loop {
                    match ops.pop() {
                        Some(top) if top.is_open_bracket() => break,
                        Some(top) => out.push(top),
                        None => return Err(Erreur::ParentheseFermanteOrpheline),
                    }
                }
            }

            TokKind::BinaryOp => {
                while let Some(top) = ops.last() {
                    if !doit_depiler(tok.text(), top) {
                        break;
                    }
                    if let Some(top) = ops.pop() {
                        out.push(top);
                    }
                }
                ops.push(tok);
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if op.is_open_bracket() {
            return Err(Erreur::ParentheseNonFermee);
        }
        out.push(op);
    }

    log::debug!("rpn: {}", format_tokens(&out));
    Ok(out)
}
