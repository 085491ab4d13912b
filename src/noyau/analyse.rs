// src/noyau/analyse.rs
//
// Descente récursive : jetons -> Noeud
//
// Grammaire (la SEULE reconnue) :
//   expression := terme (('+' | '-') terme)*
//   terme      := puissance (('*' | '/') puissance)*
//   puissance  := unaire ('**' puissance)?          // associative à droite
//   unaire     := ('+' | '-') unaire | atome        // signe : priorité la plus haute
//   atome      := NOMBRE
//               | IDENT
//               | IDENT '(' arguments? ')'          // appel : nom simple seulement
//               | '(' expression ')'
//   arguments  := expression (',' expression)* ','?
//
// Règles:
// - Pas d’arguments nommés, pas d’attribut, pas d’indice : la grammaire ne les contient pas.
// - Garde-fou : imbrication (récursion) ET hauteur d’arbre bornées par PROFONDEUR_MAX.
//   Les chaînes gauches (1+1+1+...) se construisent en boucle : on suit leur hauteur
//   pendant la construction, sinon l’évaluation récursive pourrait déborder la pile.

use super::arbre::{Noeud, OpBinaire, OpUnaire};
use super::erreur::ErreurEval;
use super::jetons::{Jeton, Tok};

/// Imbrication maximale (parenthèses, signes, `**`, appels) et hauteur maximale de l’arbre.
pub const PROFONDEUR_MAX: usize = 200;

/// Noeud + hauteur du sous-arbre.
type Sortie = Result<(Noeud, usize), ErreurEval>;

/// Construit l’arbre à partir des jetons.
///
/// `longueur` : taille du texte source (position rapportée si l’entrée se termine trop tôt).
pub fn analyser(jetons: &[Jeton], longueur: usize) -> Result<Noeud, ErreurEval> {
    let mut a = Analyseur {
        jetons,
        pos: 0,
        longueur,
        niveau: 0,
    };

    let (noeud, _hauteur) = a.expression()?;

    // tout doit être consommé : "1 2", "sqrt(4)(2)", "(1))" => refus
    if a.courant().is_some() {
        return Err(a.erreur());
    }
    Ok(noeud)
}

struct Analyseur<'a> {
    jetons: &'a [Jeton],
    pos: usize,
    longueur: usize,
    niveau: usize,
}

impl Analyseur<'_> {
    /* ------------------------ Curseur ------------------------ */

    fn courant(&self) -> Option<&Tok> {
        self.jetons.get(self.pos).map(|j| &j.tok)
    }

    fn avancer(&mut self) {
        self.pos += 1;
    }

    fn erreur(&self) -> ErreurEval {
        let position = self
            .jetons
            .get(self.pos)
            .map_or(self.longueur, |j| j.position);
        ErreurEval::Syntaxe { position }
    }

    fn attendre(&mut self, attendu: &Tok) -> Result<(), ErreurEval> {
        if self.courant() == Some(attendu) {
            self.avancer();
            Ok(())
        } else {
            Err(self.erreur())
        }
    }

    /* ------------------------ Garde-fous ------------------------ */

    fn entrer(&mut self) -> Result<(), ErreurEval> {
        self.niveau += 1;
        if self.niveau > PROFONDEUR_MAX {
            return Err(ErreurEval::ImbricationExcessive {
                limite: PROFONDEUR_MAX,
            });
        }
        Ok(())
    }

    fn sortir(&mut self) {
        self.niveau -= 1;
    }

    fn hauteur(h: usize) -> Result<usize, ErreurEval> {
        if h > PROFONDEUR_MAX {
            return Err(ErreurEval::ImbricationExcessive {
                limite: PROFONDEUR_MAX,
            });
        }
        Ok(h)
    }

    fn binaire(op: OpBinaire, g: (Noeud, usize), d: (Noeud, usize)) -> Sortie {
        let h = Self::hauteur(g.1.max(d.1) + 1)?;
        let n = Noeud::Binaire {
            op,
            gauche: Box::new(g.0),
            droite: Box::new(d.0),
        };
        Ok((n, h))
    }

    /* ------------------------ Productions ------------------------ */

    fn expression(&mut self) -> Sortie {
        self.entrer()?;

        let mut g = self.terme()?;
        loop {
            let op = match self.courant() {
                Some(Tok::Plus) => OpBinaire::Add,
                Some(Tok::Moins) => OpBinaire::Sub,
                _ => break,
            };
            self.avancer();
            let d = self.terme()?;
            g = Self::binaire(op, g, d)?;
        }

        self.sortir();
        Ok(g)
    }

    fn terme(&mut self) -> Sortie {
        let mut g = self.puissance()?;
        loop {
            let op = match self.courant() {
                Some(Tok::Etoile) => OpBinaire::Mul,
                Some(Tok::Slash) => OpBinaire::Div,
                _ => break,
            };
            self.avancer();
            let d = self.puissance()?;
            g = Self::binaire(op, g, d)?;
        }
        Ok(g)
    }

    fn puissance(&mut self) -> Sortie {
        let base = self.unaire()?;
        if self.courant() != Some(&Tok::DoubleEtoile) {
            return Ok(base);
        }
        self.avancer();

        // associativité à droite : 2**3**2 = 2**(3**2)
        self.entrer()?;
        let exposant = self.puissance()?;
        self.sortir();

        Self::binaire(OpBinaire::Pow, base, exposant)
    }

    fn unaire(&mut self) -> Sortie {
        let op = match self.courant() {
            Some(Tok::Plus) => OpUnaire::Plus,
            Some(Tok::Moins) => OpUnaire::Moins,
            _ => return self.atome(),
        };
        self.avancer();

        self.entrer()?;
        let (operande, h) = self.unaire()?;
        self.sortir();

        let h = Self::hauteur(h + 1)?;
        let n = Noeud::Unaire {
            op,
            operande: Box::new(operande),
        };
        Ok((n, h))
    }

    fn atome(&mut self) -> Sortie {
        match self.courant() {
            Some(Tok::Nombre(v)) => {
                let v = *v;
                self.avancer();
                Ok((Noeud::Nombre(v), 1))
            }

            Some(Tok::Ident(nom)) => {
                let nom = nom.clone();
                self.avancer();

                if self.courant() != Some(&Tok::ParG) {
                    return Ok((Noeud::Ident(nom), 1));
                }
                self.avancer();

                let (args, h_args) = self.arguments()?;
                self.attendre(&Tok::ParD)?;

                let h = Self::hauteur(h_args + 1)?;
                Ok((Noeud::Appel { nom, args }, h))
            }

            Some(Tok::ParG) => {
                self.avancer();
                let r = self.expression()?;
                self.attendre(&Tok::ParD)?;
                Ok(r)
            }

            _ => Err(self.erreur()),
        }
    }

    /// Arguments positionnels ; retourne aussi la hauteur max des arguments.
    fn arguments(&mut self) -> Result<(Vec<Noeud>, usize), ErreurEval> {
        let mut args = Vec::new();
        let mut h_max = 0usize;

        if self.courant() == Some(&Tok::ParD) {
            return Ok((args, h_max));
        }

        loop {
            let (a, h) = self.expression()?;
            args.push(a);
            h_max = h_max.max(h);

            if self.courant() != Some(&Tok::Virgule) {
                break;
            }
            self.avancer();

            // virgule finale tolérée : power(2, 3,)
            if self.courant() == Some(&Tok::ParD) {
                break;
            }
        }

        Ok((args, h_max))
    }
}
