//! Noyau sûr (f64)
//!
//! Organisation interne :
//! - primitives.rs : fonctions mathématiques pures (+ - * / pow sqrt sin cos tan)
//! - registre.rs   : liste blanche (opérateurs, constantes, fonctions + arité)
//! - jetons.rs     : normalisation `^` + tokenisation
//! - arbre.rs      : arbre syntaxique fermé
//! - analyse.rs    : descente récursive + garde-fou d’imbrication
//! - format.rs     : affichage arbre / valeur (démarche)
//! - erreur.rs     : erreurs typées
//! - eval.rs       : pipeline complet

pub mod analyse;
pub mod arbre;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod primitives;
pub mod registre;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurEval;
pub use eval::{evaluer, evaluer_avec_demarche, Demarche, ResultatEval};
