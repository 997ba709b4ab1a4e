//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> pile de f64
//!
//! `compile` fait les deux premières étapes une seule fois ; l’expression compilée
//! ne garde que la RPN et les tables, et rejoue la pile à chaque appel.
//! Les erreurs de domaine (ln(-1), 1/0…) suivent IEEE-754 : NaN / ±inf, pas d’erreur.

use std::fmt;
use std::sync::Arc;

use super::erreur::{Erreur, Result};
use super::jetons::{format_tokens, tokenize_with, Tok, TokKind};
use super::rpn::to_rpn;
use super::tables::Tables;

/// Évalue une RPN avec les tables standard.
pub fn evaluate(rpn: &[Tok], x: f64) -> Result<f64> {
    evaluate_with(rpn, x, &Tables::standard())
}

/// Évalue une RPN.
///
/// Opérateurs et fonctions binaires : `a` est dépilé en premier, `b` ensuite,
/// et le calcul se fait dans l’ordre d’écriture : `b op a`, `f(b, a)`.
pub fn evaluate_with(rpn: &[Tok], x: f64, tables: &Tables) -> Result<f64> {
    log::trace!("évaluation de {} jetons, x = {x}", rpn.len());

    let mut pile: Vec<f64> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        match tok.kind() {
            TokKind::Number => {
                let v = tok
                    .text()
                    .parse::<f64>()
                    .map_err(|_| Erreur::NombreInvalide(tok.text().to_string()))?;
                pile.push(v);
            }

            TokKind::Constant => {
                let v = tables
                    .constante(tok.text())
                    .ok_or_else(|| Erreur::IdentifiantInconnu(tok.text().to_string()))?;
                pile.push(v);
            }

            TokKind::Variable => pile.push(x),

            TokKind::UnaryFn => {
                let f = tables
                    .unaire(tok.text())
                    .ok_or_else(|| Erreur::IdentifiantInconnu(tok.text().to_string()))?;
                let a = depile(&mut pile, tok)?;
                pile.push(f(a));
            }

            TokKind::BinaryFn => {
                let f = tables
                    .binaire(tok.text())
                    .ok_or_else(|| Erreur::IdentifiantInconnu(tok.text().to_string()))?;
                let a = depile(&mut pile, tok)?;
                let b = depile(&mut pile, tok)?;
                pile.push(f(b, a));
            }

            TokKind::BinaryOp => {
                let op = tok
                    .text()
                    .chars()
                    .next()
                    .and_then(|c| tables.operateur(c))
                    .ok_or_else(|| Erreur::JetonInattendu(tok.text().to_string()))?;
                let a = depile(&mut pile, tok)?;
                let b = depile(&mut pile, tok)?;
                pile.push(op(b, a));
            }

            TokKind::Bracket => return Err(Erreur::JetonInattendu(tok.text().to_string())),
        }
    }

    match pile.as_slice() {
        [v] => Ok(*v),
        _ => Err(Erreur::ExpressionInvalide {
            restants: pile.len(),
        }),
    }
}

fn depile(pile: &mut Vec<f64>, tok: &Tok) -> Result<f64> {
    pile.pop().ok_or_else(|| Erreur::PileInsuffisante(tok.text().to_string()))
}

/* ------------------------ Expression compilée ------------------------ */

/// RPN prête à être évaluée pour n’importe quelle valeur de x.
/// Immuable : partageable entre threads, chaque évaluation a sa propre pile.
#[derive(Clone, Debug)]
pub struct Compiled {
    rpn: Vec<Tok>,
    tables: Arc<Tables>,
}

impl Compiled {
    pub fn evaluate(&self, x: f64) -> Result<f64> {
        evaluate_with(&self.rpn, x, &self.tables)
    }

    pub fn postfix(&self) -> &[Tok] {
        &self.rpn
    }

    /// Fermeture `x -> résultat`, pour les appelants qui veulent une simple fonction.
    pub fn into_fn(self) -> impl Fn(f64) -> Result<f64> + Send + Sync + 'static {
        move |x| self.evaluate(x)
    }
}

impl fmt::Display for Compiled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_tokens(&self.rpn))
    }
}

pub fn compile(expr_str: &str) -> Result<Compiled> {
    compile_with(expr_str, Tables::standard())
}

pub fn compile_with(expr_str: &str, tables: Arc<Tables>) -> Result<Compiled> {
    log::debug!("compilation de {expr_str:?}");

    let jetons = tokenize_with(expr_str, &tables)?;
    let rpn = to_rpn(&jetons)?;

    Ok(Compiled { rpn, tables })
}

/// Lexe + RPN + évaluation, en un coup.
pub fn calculate(expr_str: &str, x: f64) -> Result<f64> {
    compile(expr_str)?.evaluate(x)
}

/// Le texte est déjà en RPN ("pi,1.5 * sin") : mêmes règles de lexage,
/// parenthèses retirées (simple mise en forme), pas de conversion.
pub fn calculate_postfix(expr_str: &str, x: f64) -> Result<f64> {
    let tables = Tables::standard();
    let rpn: Vec<Tok> = tokenize_with(expr_str, &tables)?
        .into_iter()
        .filter(|t| t.kind() != TokKind::Bracket)
        .collect();

    log::debug!("rpn (texte): {}", format_tokens(&rpn));
    evaluate_with(&rpn, x, &tables)
}

/* ------------------------ Démarche ------------------------ */

#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub resultat: f64,
}

/// Comme `calculate`, mais garde les étapes intermédiaires (jetons, RPN).
pub fn explain(expr_str: &str, x: f64) -> Result<Demarche> {
    let tables = Tables::standard();

    let jetons = tokenize_with(expr_str, &tables)?;
    let rpn = to_rpn(&jetons)?;
    let resultat = evaluate_with(&rpn, x, &tables)?;

    Ok(Demarche {
        jetons: format_tokens(&jetons),
        rpn: format_tokens(&rpn),
        resultat,
    })
}
