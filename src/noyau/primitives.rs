// src/noyau/primitives.rs
//
// Primitives mathématiques (f64, sans état).
// - totales : additionner, soustraire, multiplier, puissance, sinus, cosinus, tangente
// - partielles : diviser (b = 0), racine (x < 0)
//
// NOTE: division par zéro refusée ici, pas laissée à IEEE (pas de +inf silencieux).

use super::erreur::ErreurPrimitive;

pub fn additionner(a: f64, b: f64) -> f64 {
    a + b
}

pub fn soustraire(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiplier(a: f64, b: f64) -> f64 {
    a * b
}

pub fn diviser(a: f64, b: f64) -> Result<f64, ErreurPrimitive> {
    if b == 0.0 {
        return Err(ErreurPrimitive::DivisionParZero);
    }
    Ok(a / b)
}

/// Sémantique IEEE (`powf`) : NaN / ±inf passent tels quels.
pub fn puissance(base: f64, exposant: f64) -> f64 {
    base.powf(exposant)
}

pub fn racine(x: f64) -> Result<f64, ErreurPrimitive> {
    if x < 0.0 {
        return Err(ErreurPrimitive::RacineNegative);
    }
    Ok(x.sqrt())
}

pub fn sinus(x: f64) -> f64 {
    x.sin()
}

pub fn cosinus(x: f64) -> f64 {
    x.cos()
}

/// Valeurs très grandes près des asymptotes : acceptées.
pub fn tangente(x: f64) -> f64 {
    x.tan()
}
