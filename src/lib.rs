// src/lib.rs
//
// Calculatrice polonaise — bibliothèque
// -------------------------------------
// Pipeline:
//   texte infixe -> jetons -> RPN (shunting-yard) -> pile -> f64
//
// API:
// - compile(texte)            : jetons + RPN une seule fois, évaluation répétable
// - calculate(texte, x)       : tout le pipeline en un coup
// - calculate_postfix(texte)  : texte déjà écrit en RPN (pas de conversion)
// - explain(texte, x)         : démarche (jetons, RPN, résultat)

pub mod noyau;

pub use noyau::eval::{
    calculate, calculate_postfix, compile, compile_with, evaluate, evaluate_with, explain,
    Compiled, Demarche,
};
pub use noyau::erreur::{Categorie, Erreur, Result};
pub use noyau::jetons::{format_tokens, tokenize, tokenize_with, Tok, TokKind};
pub use noyau::rpn::to_rpn;
pub use noyau::tables::{FnBinaire, FnUnaire, Tables};
