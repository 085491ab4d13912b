//! Registre (liste blanche) : tout ce que l’évaluateur a le droit de résoudre.
//!
//! Quatre tables constantes, jamais modifiées :
//! - opérateurs binaires : `+ - * / **`
//! - opérateurs unaires  : `+ -`
//! - constantes          : `pi`, `e`
//! - fonctions           : `sqrt`, `power`, `sin`, `cos`, `tan` (avec arité)
//!
//! Étendre le langage = ajouter UNE entrée dans UNE table. L’analyseur accepte
//! n’importe quel identifiant ; c’est ici (et seulement ici) que se décide “autorisé”.

use std::f64::consts;

use super::arbre::{OpBinaire, OpUnaire};
use super::erreur::ErreurPrimitive;
use super::primitives;

pub type FnBinaire = fn(f64, f64) -> Result<f64, ErreurPrimitive>;
pub type FnUnaire = fn(f64) -> f64;

/// Implémentation d’une fonction appelable : reçoit des arguments déjà évalués.
pub type FnAppel = fn(&[f64]) -> Result<f64, ErreurPrimitive>;

#[derive(Debug)]
pub struct FonctionAutorisee {
    pub nom: &'static str,
    pub arite: usize,
    pub calcul: FnAppel,
}

/* ------------------------ Tables ------------------------ */

const OPERATEURS_BINAIRES: &[(OpBinaire, FnBinaire)] = &[
    (OpBinaire::Add, bin_add),
    (OpBinaire::Sub, bin_sub),
    (OpBinaire::Mul, bin_mul),
    (OpBinaire::Div, primitives::diviser),
    (OpBinaire::Pow, bin_pow),
];

const OPERATEURS_UNAIRES: &[(OpUnaire, FnUnaire)] =
    &[(OpUnaire::Plus, identite), (OpUnaire::Moins, negation)];

const CONSTANTES: &[(&str, f64)] = &[("pi", consts::PI), ("e", consts::E)];

const FONCTIONS: &[FonctionAutorisee] = &[
    FonctionAutorisee {
        nom: "sqrt",
        arite: 1,
        calcul: appel_sqrt,
    },
    FonctionAutorisee {
        nom: "power",
        arite: 2,
        calcul: appel_power,
    },
    FonctionAutorisee {
        nom: "sin",
        arite: 1,
        calcul: appel_sin,
    },
    FonctionAutorisee {
        nom: "cos",
        arite: 1,
        calcul: appel_cos,
    },
    FonctionAutorisee {
        nom: "tan",
        arite: 1,
        calcul: appel_tan,
    },
];

/* ------------------------ Recherche ------------------------ */

pub fn operateur_binaire(op: OpBinaire) -> Option<FnBinaire> {
    OPERATEURS_BINAIRES
        .iter()
        .find(|(o, _)| *o == op)
        .map(|(_, f)| *f)
}

pub fn operateur_unaire(op: OpUnaire) -> Option<FnUnaire> {
    OPERATEURS_UNAIRES
        .iter()
        .find(|(o, _)| *o == op)
        .map(|(_, f)| *f)
}

pub fn constante(nom: &str) -> Option<f64> {
    CONSTANTES.iter().find(|(n, _)| *n == nom).map(|(_, v)| *v)
}

pub fn fonction(nom: &str) -> Option<&'static FonctionAutorisee> {
    FONCTIONS.iter().find(|f| f.nom == nom)
}

/// Noms des constantes, dans l’ordre de la table (boutons de l’UI).
pub fn noms_constantes() -> impl Iterator<Item = &'static str> {
    CONSTANTES.iter().map(|(n, _)| *n)
}

/// Fonctions autorisées, dans l’ordre de la table (boutons de l’UI).
pub fn fonctions() -> &'static [FonctionAutorisee] {
    FONCTIONS
}

/* ------------------------ Adaptateurs vers les primitives ------------------------ */

fn bin_add(a: f64, b: f64) -> Result<f64, ErreurPrimitive> {
    Ok(primitives::additionner(a, b))
}

fn bin_sub(a: f64, b: f64) -> Result<f64, ErreurPrimitive> {
    Ok(primitives::soustraire(a, b))
}

fn bin_mul(a: f64, b: f64) -> Result<f64, ErreurPrimitive> {
    Ok(primitives::multiplier(a, b))
}

fn bin_pow(a: f64, b: f64) -> Result<f64, ErreurPrimitive> {
    Ok(primitives::puissance(a, b))
}

fn identite(x: f64) -> f64 {
    x
}

fn negation(x: f64) -> f64 {
    -x
}

// L’évaluateur vérifie l’arité avant l’appel ; on revérifie quand même ici
// (pas d’indexation qui panique, pas de troncature silencieuse).

fn appel_sqrt(args: &[f64]) -> Result<f64, ErreurPrimitive> {
    match args {
        [x] => primitives::racine(*x),
        _ => Err(arite("sqrt", 1, args)),
    }
}

fn appel_power(args: &[f64]) -> Result<f64, ErreurPrimitive> {
    match args {
        [a, b] => Ok(primitives::puissance(*a, *b)),
        _ => Err(arite("power", 2, args)),
    }
}

fn appel_sin(args: &[f64]) -> Result<f64, ErreurPrimitive> {
    match args {
        [x] => Ok(primitives::sinus(*x)),
        _ => Err(arite("sin", 1, args)),
    }
}

fn appel_cos(args: &[f64]) -> Result<f64, ErreurPrimitive> {
    match args {
        [x] => Ok(primitives::cosinus(*x)),
        _ => Err(arite("cos", 1, args)),
    }
}

fn appel_tan(args: &[f64]) -> Result<f64, ErreurPrimitive> {
    match args {
        [x] => Ok(primitives::tangente(*x)),
        _ => Err(arite("tan", 1, args)),
    }
}

fn arite(nom: &'static str, attendu: usize, args: &[f64]) -> ErreurPrimitive {
    ErreurPrimitive::Arite {
        nom,
        attendu,
        recu: args.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_completes() {
        for op in [
            OpBinaire::Add,
            OpBinaire::Sub,
            OpBinaire::Mul,
            OpBinaire::Div,
            OpBinaire::Pow,
        ] {
            assert!(operateur_binaire(op).is_some(), "{op:?} absent");
        }
        assert!(operateur_unaire(OpUnaire::Plus).is_some());
        assert!(operateur_unaire(OpUnaire::Moins).is_some());
    }

    #[test]
    fn constantes_connues_seulement() {
        assert_eq!(constante("pi"), Some(std::f64::consts::PI));
        assert_eq!(constante("e"), Some(std::f64::consts::E));
        assert_eq!(constante("PI"), None);
        assert_eq!(constante("__builtins__"), None);
        assert_eq!(noms_constantes().collect::<Vec<_>>(), vec!["pi", "e"]);
    }

    #[test]
    fn fonctions_et_arites() {
        let attendu = [("sqrt", 1), ("power", 2), ("sin", 1), ("cos", 1), ("tan", 1)];
        for (nom, n) in attendu {
            let f = fonction(nom).unwrap_or_else(|| panic!("{nom} absente"));
            assert_eq!(f.arite, n, "{nom}");
        }
        assert!(fonction("eval").is_none());
        assert!(fonction("__import__").is_none());
        assert_eq!(fonctions().len(), 5);
    }

    #[test]
    fn adaptateur_refuse_mauvaise_arite() {
        let f = fonction("power").unwrap();
        assert_eq!(
            (f.calcul)(&[2.0]),
            Err(ErreurPrimitive::Arite {
                nom: "power",
                attendu: 2,
                recu: 1
            })
        );
        assert_eq!((f.calcul)(&[2.0, 3.0]), Ok(8.0));
    }

    #[test]
    fn division_par_la_table() {
        let div = operateur_binaire(OpBinaire::Div).unwrap();
        assert_eq!(div(1.0, 0.0), Err(ErreurPrimitive::DivisionParZero));
        assert_eq!(operateur_unaire(OpUnaire::Moins).unwrap()(2.0), -2.0);
    }
}
