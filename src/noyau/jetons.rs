// src/noyau/jetons.rs

use super::erreur::ErreurEval;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Nombre(f64),

    // Constantes + fonctions + tout nom inconnu.
    // NOTE: l’analyseur ne décide rien sur le nom ; le registre tranche à l’évaluation.
    Ident(String),

    Plus,
    Moins,
    Etoile,
    DoubleEtoile, // ** (et ^ après normalisation)
    Slash,

    Virgule,
    ParG,
    ParD,
}

/// Jeton + position (offset en octets dans l’expression normalisée).
#[derive(Clone, Debug, PartialEq)]
pub struct Jeton {
    pub tok: Tok,
    pub position: usize,
}

/// Alias calculatrice : `^` => `**`.
///
/// Substitution TEXTUELLE avant tokenisation (pas une règle de grammaire) :
/// "2^^3" devient "2****3", refusé ensuite par l’analyseur.
pub fn normaliser(s: &str) -> String {
    s.replace('^', "**")
}

/// Tokenize une chaîne (déjà normalisée) en jetons.
/// Supporte:
/// - nombres décimaux : 12, 1.5, .5, 2., 1e3, 2.5E-2
/// - opérateurs + - * / **
/// - virgule, parenthèses
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (sensibles à la casse)
///
/// Tout autre caractère (guillemets, '.', '[', '=', ...) est une erreur de syntaxe.
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, ErreurEval> {
    let mut out = Vec::new();
    let octets = s.as_bytes();
    let mut chars = s.char_indices().peekable();

    while let Some(&(i, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let simple = match c {
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Moins),
            '/' => Some(Tok::Slash),
            ',' => Some(Tok::Virgule),
            '(' => Some(Tok::ParG),
            ')' => Some(Tok::ParD),
            _ => None,
        };
        if let Some(tok) = simple {
            out.push(Jeton { tok, position: i });
            chars.next();
            continue;
        }

        // * ou **
        if c == '*' {
            chars.next();
            let tok = if matches!(chars.peek(), Some(&(_, '*'))) {
                chars.next();
                Tok::DoubleEtoile
            } else {
                Tok::Etoile
            };
            out.push(Jeton { tok, position: i });
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let mut fin = i;
            while let Some(&(j, d)) = chars.peek() {
                if d.is_ascii_alphanumeric() || d == '_' {
                    fin = j + d.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            out.push(Jeton {
                tok: Tok::Ident(s[i..fin].to_string()),
                position: i,
            });
            continue;
        }

        // Nombre : chiffre, ou '.' suivi d’un chiffre
        let debut_nombre = c.is_ascii_digit()
            || (c == '.' && octets.get(i + 1).is_some_and(|b| b.is_ascii_digit()));
        if debut_nombre {
            let fin = fin_nombre(octets, i);
            let v: f64 = s[i..fin]
                .parse()
                .map_err(|_| ErreurEval::Syntaxe { position: i })?;
            out.push(Jeton {
                tok: Tok::Nombre(v),
                position: i,
            });
            while matches!(chars.peek(), Some(&(j, _)) if j < fin) {
                chars.next();
            }
            continue;
        }

        return Err(ErreurEval::Syntaxe { position: i });
    }

    Ok(out)
}

/// Fin (exclusive) d’un littéral numérique commençant en `debut`.
/// Tout est ASCII ici : on travaille sur les octets.
fn fin_nombre(o: &[u8], debut: usize) -> usize {
    let chiffres = |mut k: usize| {
        while k < o.len() && o[k].is_ascii_digit() {
            k += 1;
        }
        k
    };

    let mut k = chiffres(debut);

    // partie fractionnaire
    if k < o.len() && o[k] == b'.' {
        k = chiffres(k + 1);
    }

    // exposant : seulement si un chiffre suit (sinon 'e' redevient un identifiant)
    if k < o.len() && (o[k] == b'e' || o[k] == b'E') {
        let mut m = k + 1;
        if m < o.len() && (o[m] == b'+' || o[m] == b'-') {
            m += 1;
        }
        if m < o.len() && o[m].is_ascii_digit() {
            k = chiffres(m);
        }
    }

    k
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(jetons: &[Jeton]) -> String {
    let mut out = Vec::with_capacity(jetons.len());
    for j in jetons {
        let s = match &j.tok {
            Tok::Nombre(v) => format!("{v}"),
            Tok::Ident(nom) => nom.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Moins => "-".to_string(),
            Tok::Etoile => "*".to_string(),
            Tok::DoubleEtoile => "**".to_string(),
            Tok::Slash => "/".to_string(),

            Tok::Virgule => ",".to_string(),
            Tok::ParG => "(".to_string(),
            Tok::ParD => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
