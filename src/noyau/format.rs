// src/noyau/format.rs
//
// Affichage de l’arbre (démarche) : chaque opération binaire est parenthésée,
// pour montrer comment les priorités ont été résolues.
//   "1 + 2 * 3"  => "(1 + (2 * 3))"
//   "-2 ** 2"    => "((-2) ** 2)"

use std::fmt::Write;

use super::arbre::Noeud;

pub fn format_arbre(n: &Noeud) -> String {
    let mut out = String::new();
    ecrire(&mut out, n);
    out
}

fn ecrire(out: &mut String, n: &Noeud) {
    match n {
        Noeud::Nombre(v) => {
            let _ = write!(out, "{v}");
        }
        Noeud::Ident(nom) => out.push_str(nom),

        Noeud::Unaire { op, operande } => {
            out.push('(');
            out.push_str(op.symbole());
            ecrire(out, operande);
            out.push(')');
        }

        Noeud::Binaire { op, gauche, droite } => {
            out.push('(');
            ecrire(out, gauche);
            out.push(' ');
            out.push_str(op.symbole());
            out.push(' ');
            ecrire(out, droite);
            out.push(')');
        }

        Noeud::Appel { nom, args } => {
            out.push_str(nom);
            out.push('(');
            for (i, a) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                ecrire(out, a);
            }
            out.push(')');
        }
    }
}

/// Valeur pour l’affichage : `decimales` chiffres après la virgule, zéros finaux retirés.
/// NaN / ±inf sont rendus tels quels.
pub fn format_valeur(v: f64, decimales: usize) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }

    let mut s = format!("{v:.decimales$}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}
