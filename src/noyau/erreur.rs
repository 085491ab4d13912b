//! Erreurs du noyau.
//!
//! Toutes les erreurs sont des “entrées refusées” : jamais fatales, jamais de résultat partiel.
//! L’appelant (CLI, serveur, UI) décide du code de sortie / statut HTTP.

use thiserror::Error;

/// Échec d’une primitive mathématique (domaine).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurPrimitive {
    #[error("division par zéro")]
    DivisionParZero,

    #[error("racine carrée : domaine (x doit être >= 0)")]
    RacineNegative,

    #[error("{nom} attend {attendu} argument(s), {recu} reçu(s)")]
    Arite {
        nom: &'static str,
        attendu: usize,
        recu: usize,
    },
}

/// Refus d’une expression par l’évaluateur.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurEval {
    #[error("expression vide")]
    ExpressionVide,

    /// `position` : offset (octets) dans l’expression normalisée, pour l’UI.
    #[error("syntaxe invalide")]
    Syntaxe { position: usize },

    #[error("nom non autorisé : {0}")]
    NomNonAutorise(String),

    #[error("fonction non autorisée : {0}")]
    FonctionNonAutorisee(String),

    #[error("élément non autorisé : {0}")]
    ConstructionInterdite(String),

    #[error("opération invalide : {0}")]
    OperationInvalide(String),

    #[error("expression trop imbriquée (limite : {limite})")]
    ImbricationExcessive { limite: usize },
}

impl ErreurEval {
    /// Genre stable (journaux, tests).
    pub fn genre(&self) -> &'static str {
        match self {
            ErreurEval::ExpressionVide => "expression_vide",
            ErreurEval::Syntaxe { .. } => "syntaxe",
            ErreurEval::NomNonAutorise(_) => "nom_non_autorise",
            ErreurEval::FonctionNonAutorisee(_) => "fonction_non_autorisee",
            ErreurEval::ConstructionInterdite(_) => "construction_interdite",
            ErreurEval::OperationInvalide(_) => "operation_invalide",
            ErreurEval::ImbricationExcessive { .. } => "imbrication_excessive",
        }
    }
}

impl From<ErreurPrimitive> for ErreurEval {
    fn from(e: ErreurPrimitive) -> Self {
        ErreurEval::OperationInvalide(e.to_string())
    }
}
