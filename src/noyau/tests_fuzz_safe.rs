//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - oracle : chaque expression générée est calculée en parallèle en f64 direct
//! - invariant clé : jamais de panique, seulement des erreurs typées

use std::f64::consts::{E, PI};
use std::time::{Duration, Instant};

use super::evaluer;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération + oracle ------------------------ */

/// Err(()) : l’oracle attend un refus “opération invalide” (division par zéro, racine négative).
type Attendu = Result<f64, ()>;

fn gen_atom(rng: &mut Rng) -> (String, Attendu) {
    match rng.pick(6) {
        0 => ("pi".to_string(), Ok(PI)),
        1 => ("e".to_string(), Ok(E)),
        2 => {
            let k = rng.pick(10);
            (format!("{k}.5"), Ok(k as f64 + 0.5))
        }
        _ => {
            // entiers, 0 inclus (utile pour les divisions par zéro)
            let k = rng.pick(7);
            (format!("{k}"), Ok(k as f64))
        }
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> (String, Attendu) {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(12) {
        0 => gen_atom(rng),
        1..=4 => {
            let (sa, va) = gen_expr(rng, depth - 1);
            let (sb, vb) = gen_expr(rng, depth - 1);
            let (op, v) = match rng.pick(4) {
                0 => ("+", va.and_then(|a| vb.map(|b| a + b))),
                1 => ("-", va.and_then(|a| vb.map(|b| a - b))),
                2 => ("*", va.and_then(|a| vb.map(|b| a * b))),
                _ => (
                    "/",
                    va.and_then(|a| vb.and_then(|b| if b == 0.0 { Err(()) } else { Ok(a / b) })),
                ),
            };
            (format!("({sa} {op} {sb})"), v)
        }
        5 => {
            let (sa, va) = gen_expr(rng, depth - 1);
            let (sb, vb) = gen_atom(rng);
            let v = va.and_then(|a| vb.map(|b| a.powf(b)));
            if rng.pick(2) == 0 {
                (format!("({sa})^{sb}"), v)
            } else {
                (format!("power({sa}, {sb})"), v)
            }
        }
        6 => {
            let (sa, va) = gen_expr(rng, depth - 1);
            let v = va.and_then(|a| if a < 0.0 { Err(()) } else { Ok(a.sqrt()) });
            (format!("sqrt({sa})"), v)
        }
        7 => {
            let (sa, va) = gen_expr(rng, depth - 1);
            (format!("sin({sa})"), va.map(f64::sin))
        }
        8 => {
            let (sa, va) = gen_expr(rng, depth - 1);
            (format!("cos({sa})"), va.map(f64::cos))
        }
        9 => {
            let (sa, va) = gen_expr(rng, depth - 1);
            (format!("tan({sa})"), va.map(f64::tan))
        }
        _ => {
            let (sa, va) = gen_expr(rng, depth - 1);
            (format!("-({sa})"), va.map(|a| -a))
        }
    }
}

fn meme_valeur(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_oracle_f64() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let (expr, attendu) = gen_expr(&mut rng, 5);

        match (evaluer(&expr), attendu) {
            (Ok(r), Ok(v)) => {
                assert!(
                    meme_valeur(r.valeur, v),
                    "expr={expr:?} noyau={} direct={v}",
                    r.valeur
                );
                seen_ok += 1;
            }
            (Err(e), Err(())) => {
                assert_eq!(e.genre(), "operation_invalide", "expr={expr:?} err={e}");
                seen_err += 1;
            }
            (obtenu, attendu) => {
                panic!("expr={expr:?} obtenu={obtenu:?} attendu={attendu:?}");
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_sans_panique_et_deterministe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // alphabet volontairement hostile
    const ALPHABET: &[&str] = &[
        "1", "2.5", "e", "pi", "x", "sqrt", "power", "sin", "__import__", "(", ")", ",", "+",
        "-", "*", "/", "^", "**", ".", "[", "]", "'", "\"", "=", ":", "lambda", " ", "os",
    ];

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..2000 {
        budget(t0, max);

        let n = 1 + rng.pick(16) as usize;
        let expr: String = (0..n)
            .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
            .collect();

        let a = evaluer(&expr);
        let b = evaluer(&expr);
        match (&a, &b) {
            (Ok(x), Ok(y)) => assert!(meme_valeur(x.valeur, y.valeur), "expr={expr:?}"),
            _ => assert_eq!(a, b, "expr={expr:?}"),
        }
    }
}

#[test]
fn fuzz_safe_imbrication_aleatoire() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..50 {
        budget(t0, max);

        // profondeur tirée autour de la limite : succès OU refus propre, jamais de débordement
        let n = 40 + rng.pick(160) as usize;
        let expr = format!("{}2{}", "-(".repeat(n), ")".repeat(n));
        match evaluer(&expr) {
            Ok(r) => assert_eq!(r.valeur, if n % 2 == 0 { 2.0 } else { -2.0 }),
            Err(e) => assert_eq!(e.genre(), "imbrication_excessive", "n={n}"),
        }
    }
}
