// src/noyau/erreur.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Erreur>;

/// Erreurs du pipeline. Aucune n’est transitoire : l’appelant les reçoit telles quelles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Erreur {
    #[error("Entrée vide")]
    EntreeVide,

    #[error("identifiant inconnu: '{0}'")]
    IdentifiantInconnu(String),

    #[error("parenthèse fermante sans ouvrante")]
    ParentheseFermanteOrpheline,

    #[error("parenthèses non fermées")]
    ParentheseNonFermee,

    #[error("nombre invalide: '{0}'")]
    NombreInvalide(String),

    /// Opérateur ou fonction sans assez d’opérandes sur la pile.
    #[error("opérandes manquants pour '{0}'")]
    PileInsuffisante(String),

    /// La pile finale ne contient pas exactement une valeur.
    #[error("expression invalide: {restants} valeur(s) sur la pile au lieu d’une")]
    ExpressionInvalide { restants: usize },

    #[error("jeton inattendu en RPN: '{0}'")]
    JetonInattendu(String),
}

/// Famille d’erreur, par étape du pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Categorie {
    Lex,
    Parse,
    NumberFormat,
    StackUnderflow,
    Malformed,
}

impl Erreur {
    pub fn categorie(&self) -> Categorie {
        match self {
            Erreur::EntreeVide | Erreur::IdentifiantInconnu(_) => Categorie::Lex,
            Erreur::ParentheseFermanteOrpheline | Erreur::ParentheseNonFermee => {
                Categorie::Parse
            }
            Erreur::NombreInvalide(_) => Categorie::NumberFormat,
            Erreur::PileInsuffisante(_) => Categorie::StackUnderflow,
            Erreur::ExpressionInvalide { .. } | Erreur::JetonInattendu(_) => Categorie::Malformed,
        }
    }
}
