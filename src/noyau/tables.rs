// src/noyau/tables.rs
//
// Tables de l’analyseur : opérateurs, fonctions, constantes.
// Construites une fois, jamais modifiées ensuite (partage libre entre threads).

use std::collections::HashMap;
use std::f64::consts::{E, PI};
use std::sync::{Arc, OnceLock};

use super::jetons::TokKind;

/// Fonction unaire réelle.
pub type FnUnaire = fn(f64) -> f64;

/// Fonction binaire réelle, arguments dans l’ordre d’écriture (gauche, droite).
pub type FnBinaire = fn(f64, f64) -> f64;

#[derive(Clone, Debug)]
pub struct Tables {
    operateurs: HashMap<char, FnBinaire>,
    unaires: HashMap<String, FnUnaire>,
    binaires: HashMap<String, FnBinaire>,
    constantes: HashMap<String, f64>,
}

impl Default for Tables {
    fn default() -> Self {
        let mut operateurs: HashMap<char, FnBinaire> = HashMap::new();
        operateurs.insert('+', |a, b| a + b);
        operateurs.insert('-', |a, b| a - b);
        operateurs.insert('*', |a, b| a * b);
        operateurs.insert('/', |a, b| a / b);
        operateurs.insert('^', f64::powf);

        let mut t = Self {
            operateurs,
            unaires: HashMap::new(),
            binaires: HashMap::new(),
            constantes: HashMap::new(),
        };

        t = t
            .with_unary("sin", f64::sin)
            .with_unary("cos", f64::cos)
            .with_unary("tg", f64::tan)
            .with_unary("ctg", |a| a.cos() / a.sin())
            .with_unary("sign", signe)
            .with_unary("sqrt", f64::sqrt)
            .with_unary("abs", f64::abs)
            .with_unary("acos", f64::acos)
            .with_unary("asin", f64::asin)
            .with_unary("atan", f64::atan)
            .with_unary("actg", |a| 1.0 / a.atan())
            .with_unary("arctg", |a| 1.0 / a.atan())
            .with_unary("lg", f64::log10)
            .with_unary("ln", f64::ln);

        t = t.with_binary("log", log_base);

        t.with_constant("pi", PI)
            .with_constant("π", PI)
            .with_constant("e", E)
    }
}

static STANDARD: OnceLock<Arc<Tables>> = OnceLock::new();

impl Tables {
    /// Tables par défaut, partagées par tout le processus.
    pub fn standard() -> Arc<Tables> {
        STANDARD.get_or_init(|| Arc::new(Tables::default())).clone()
    }

    pub fn with_unary(mut self, nom: &str, f: FnUnaire) -> Self {
        self.unaires.insert(nom.to_string(), f);
        self
    }

    pub fn with_binary(mut self, nom: &str, f: FnBinaire) -> Self {
        self.binaires.insert(nom.to_string(), f);
        self
    }

    pub fn with_constant(mut self, nom: &str, valeur: f64) -> Self {
        self.constantes.insert(nom.to_string(), valeur);
        self
    }

    pub fn operateur(&self, c: char) -> Option<FnBinaire> {
        self.operateurs.get(&c).copied()
    }

    pub fn est_operateur(&self, c: char) -> bool {
        self.operateurs.contains_key(&c)
    }

    pub fn unaire(&self, nom: &str) -> Option<FnUnaire> {
        self.unaires.get(nom).copied()
    }

    pub fn binaire(&self, nom: &str) -> Option<FnBinaire> {
        self.binaires.get(nom).copied()
    }

    pub fn constante(&self, nom: &str) -> Option<f64> {
        self.constantes.get(nom).copied()
    }

    /// Genre d’un identifiant : fonction unaire, puis binaire, puis constante.
    pub fn classer(&self, nom: &str) -> Option<TokKind> {
        if self.unaires.contains_key(nom) {
            Some(TokKind::UnaryFn)
        } else if self.binaires.contains_key(nom) {
            Some(TokKind::BinaryFn)
        } else if self.constantes.contains_key(nom) {
            Some(TokKind::Constant)
        } else {
            None
        }
    }
}

/// Signe : -1, 0 ou 1 (NaN reste NaN).
fn signe(a: f64) -> f64 {
    if a > 0.0 {
        1.0
    } else if a < 0.0 {
        -1.0
    } else {
        // 0.0, -0.0 ou NaN
        a * 0.0
    }
}

/// log(valeur, base). Base 1 => NaN (pas d’infini trompeur).
fn log_base(valeur: f64, base: f64) -> f64 {
    if base == 1.0 {
        f64::NAN
    } else {
        valeur.ln() / base.ln()
    }
}
