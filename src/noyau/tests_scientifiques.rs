//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : comparer le noyau au calcul f64 direct, et vérifier les refus.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)

use std::f64::consts::{E, PI};
use std::time::{Duration, Instant};

use super::analyse::PROFONDEUR_MAX;
use super::{evaluer, ErreurEval};

fn eval_ok(expr: &str) -> f64 {
    evaluer(expr)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .valeur
}

fn assert_proche(expr: &str, attendu: f64) {
    let v = eval_ok(expr);
    let tol = 1e-12 * attendu.abs().max(1.0);
    assert!(
        (v - attendu).abs() <= tol,
        "expr={expr:?} : {v} != {attendu}"
    );
}

fn assert_genre(expr: &str, genre: &str) {
    match evaluer(expr) {
        Ok(r) => panic!("expr={expr:?} acceptée ({})", r.valeur),
        Err(e) => assert_eq!(e.genre(), genre, "expr={expr:?} err={e}"),
    }
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Cohérence avec le calcul direct ------------------------ */

#[test]
fn sci_calcul_direct() {
    assert_proche("1 + 2 * 3 - 4 / 5", 1.0 + 2.0 * 3.0 - 4.0 / 5.0);
    assert_proche("(1.5 + 2.25) * 4", (1.5 + 2.25) * 4.0);
    assert_proche("2 ** 0.5", 2f64.powf(0.5));
    assert_proche("sqrt(2) * sqrt(2)", 2f64.sqrt() * 2f64.sqrt());
    assert_proche("sin(pi/6) + cos(pi/3)", (PI / 6.0).sin() + (PI / 3.0).cos());
    assert_proche("tan(1) / e", 1f64.tan() / E);
    assert_proche("power(e, 2) - e ^ 2", E.powf(2.0) - E.powf(2.0));
    assert_proche("1e3 * .5 + 2.", 1e3 * 0.5 + 2.0);
    assert_proche("-(3 - 5) * 2", -(3.0f64 - 5.0) * 2.0);
}

#[test]
fn sci_identites_trig() {
    // sin² + cos² = 1 (à la tolérance près)
    for k in 0..24 {
        let expr = format!("sin({k}*pi/12)^2 + cos({k}*pi/12)^2");
        let v = eval_ok(&expr);
        assert!((v - 1.0).abs() < 1e-12, "expr={expr:?} v={v}");
    }
}

/* ------------------------ Refus typés ------------------------ */

#[test]
fn sci_refus_par_genre() {
    assert_genre("", "expression_vide");
    assert_genre("1 +", "syntaxe");
    assert_genre("(1).real", "syntaxe");
    assert_genre("x", "nom_non_autorise");
    assert_genre("exp(1)", "fonction_non_autorisee");
    assert_genre("1/0", "operation_invalide");
    assert_genre("sqrt(-4)", "operation_invalide");
    assert_genre("cos(1, 2)", "operation_invalide");
}

#[test]
fn sci_syntaxe_sans_detail() {
    // le message reste générique, la position est réservée à l’UI
    let e = evaluer("2 +* 3").unwrap_err();
    assert_eq!(e.to_string(), "syntaxe invalide");
    assert_eq!(e, ErreurEval::Syntaxe { position: 3 });
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_imbrication_limite() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // sqrt(sqrt(...)) juste sous la limite
    let mut expr = "16".to_string();
    for _ in 0..(PROFONDEUR_MAX / 2 - 1) {
        expr = format!("sqrt({expr})");
        budget(t0, max);
    }
    let v = eval_ok(&expr);
    assert!((v - 1.0).abs() < 1e-9);

    // bien au-delà : refus propre (pas de débordement de pile)
    let profond = format!("{}1{}", "(".repeat(50_000), ")".repeat(50_000));
    assert_genre(&profond, "imbrication_excessive");

    let appels = format!("{}1{}", "sin(".repeat(5_000), ")".repeat(5_000));
    assert_genre(&appels, "imbrication_excessive");

    budget(t0, max);
}

#[test]
fn sci_stress_longue_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 150 termes : sous la limite de hauteur
    let expr = vec!["0.5"; 150].join(" + ");
    assert_proche(&expr, 75.0);

    // 100 000 termes : refus, sans récursion profonde
    let enorme = vec!["1"; 100_000].join("+");
    assert_genre(&enorme, "imbrication_excessive");

    budget(t0, max);
}

#[test]
fn sci_grands_nombres() {
    let big = "9".repeat(400);
    // dépasse f64 : +inf, pas d’erreur
    assert!(eval_ok(&big).is_infinite());
    assert_proche("1e308 / 1e300", 1e8);
}

/* ------------------------ Déterminisme ------------------------ */

#[test]
fn sci_idempotence() {
    for expr in ["sqrt(10) + power(2,3)", "1 + sin(pi/2)", "2^3", "x", "1/0"] {
        let a = evaluer(expr);
        let b = evaluer(expr);
        assert_eq!(a, b, "expr={expr:?}");
    }
}
