//! Noyau : évaluation (pipeline réel)
//!
//! vide ? -> normaliser (^ => **) -> jetons -> arbre -> parcours (registre) -> ResultatEval
//!
//! Aucun état, aucun journal : chaque appel est indépendant, la première erreur arrête tout.

use serde::Serialize;

use super::analyse::analyser;
use super::arbre::Noeud;
use super::erreur::ErreurEval;
use super::format::format_arbre;
use super::jetons::{format_tokens, normaliser, tokenize};
use super::registre;

/// Résultat d’une évaluation. Sérialisé en `{"value": ...}` (NaN / ±inf => `null`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ResultatEval {
    #[serde(rename = "value")]
    pub valeur: f64,
}

/// Démarche : ce que le noyau a vu (UI).
#[derive(Default, Clone, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub arbre: String,
    pub profondeur: usize,
}

/// API publique : évalue une expression non fiable.
pub fn evaluer(expression: &str) -> Result<ResultatEval, ErreurEval> {
    let (arbre, _jetons) = preparer(expression)?;
    let valeur = evaluer_noeud(&arbre)?;
    Ok(ResultatEval { valeur })
}

/// Comme [`evaluer`], avec la démarche (jetons + arbre parenthésé).
pub fn evaluer_avec_demarche(expression: &str) -> Result<(ResultatEval, Demarche), ErreurEval> {
    let (arbre, jetons) = preparer(expression)?;
    let valeur = evaluer_noeud(&arbre)?;

    let d = Demarche {
        jetons,
        arbre: format_arbre(&arbre),
        profondeur: arbre.profondeur(),
    };
    Ok((ResultatEval { valeur }, d))
}

/// Étapes 1 à 3 : vide, normalisation, jetons, arbre.
fn preparer(expression: &str) -> Result<(Noeud, String), ErreurEval> {
    let s = expression.trim();
    if s.is_empty() {
        return Err(ErreurEval::ExpressionVide);
    }

    let s = normaliser(s);
    let jetons = tokenize(&s)?;
    let arbre = analyser(&jetons, s.len())?;

    Ok((arbre, format_tokens(&jetons)))
}

/// Parcours post-ordre. Ne résout RIEN qui ne soit pas dans le registre.
pub fn evaluer_noeud(n: &Noeud) -> Result<f64, ErreurEval> {
    match n {
        Noeud::Nombre(v) => Ok(*v),

        Noeud::Ident(nom) => {
            registre::constante(nom).ok_or_else(|| ErreurEval::NomNonAutorise(nom.clone()))
        }

        Noeud::Unaire { op, operande } => {
            let f = registre::operateur_unaire(*op).ok_or_else(|| {
                ErreurEval::ConstructionInterdite(format!("opérateur unaire {}", op.symbole()))
            })?;
            Ok(f(evaluer_noeud(operande)?))
        }

        Noeud::Binaire { op, gauche, droite } => {
            let f = registre::operateur_binaire(*op).ok_or_else(|| {
                ErreurEval::ConstructionInterdite(format!("opérateur {}", op.symbole()))
            })?;
            let a = evaluer_noeud(gauche)?;
            let b = evaluer_noeud(droite)?;
            Ok(f(a, b)?)
        }

        Noeud::Appel { nom, args } => {
            let f = registre::fonction(nom)
                .ok_or_else(|| ErreurEval::FonctionNonAutorisee(nom.clone()))?;

            if args.len() != f.arite {
                return Err(ErreurEval::OperationInvalide(format!(
                    "{} attend {} argument(s), {} reçu(s)",
                    f.nom,
                    f.arite,
                    args.len()
                )));
            }

            let valeurs = args
                .iter()
                .map(evaluer_noeud)
                .collect::<Result<Vec<f64>, _>>()?;
            Ok((f.calcul)(&valeurs)?)
        }
    }
}
