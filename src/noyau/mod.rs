//! Noyau de la calculatrice polonaise
//!
//! Organisation interne :
//! - tables.rs   : opérateurs, fonctions, constantes (immuables, injectables)
//! - jetons.rs   : tokenisation (+ moins unaire)
//! - rpn.rs      : shunting-yard
//! - eval.rs     : pile RPN + pipeline complet (compile / calculate)
//! - erreur.rs   : erreurs typées

pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod rpn;
pub mod tables;

#[cfg(test)]
mod tests_scientifiques;
