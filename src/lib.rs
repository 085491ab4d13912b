//! Calculatrice sûre
//!
//! - `noyau`   : évaluateur restreint (liste blanche), sans état
//! - `app`     : interface egui (natif + web)
//! - `serveur` : API JSON + fichiers statiques (natif seulement)

pub mod app;
pub mod noyau;

#[cfg(not(target_arch = "wasm32"))]
pub mod serveur;
