// src/noyau/arbre.rs
//
// Arbre syntaxique (fermé).
// - Nombre : littéral f64
// - Ident  : nom (résolu plus tard dans la table des constantes)
// - Unaire : signe + / -
// - Binaire: + - * / **
// - Appel  : nom(args...), arguments positionnels seulement
//
// IMPORTANT (SAFE):
// - Aucune autre variante : pas d’attribut, pas d’indice, pas d’affectation.
// - L’analyseur ne sait produire que ces noeuds.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpUnaire {
    Plus,
    Moins,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl OpUnaire {
    pub fn symbole(self) -> &'static str {
        match self {
            OpUnaire::Plus => "+",
            OpUnaire::Moins => "-",
        }
    }
}

impl OpBinaire {
    pub fn symbole(self) -> &'static str {
        match self {
            OpBinaire::Add => "+",
            OpBinaire::Sub => "-",
            OpBinaire::Mul => "*",
            OpBinaire::Div => "/",
            OpBinaire::Pow => "**",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Noeud {
    Nombre(f64),
    Ident(String),

    Unaire {
        op: OpUnaire,
        operande: Box<Noeud>,
    },

    Binaire {
        op: OpBinaire,
        gauche: Box<Noeud>,
        droite: Box<Noeud>,
    },

    Appel {
        nom: String,
        args: Vec<Noeud>,
    },
}

impl Noeud {
    /// Hauteur de l’arbre (une feuille = 1).
    ///
    /// Itératif : un arbre très profond (ex: `1+1+1+...`) ne doit pas faire
    /// déborder la pile ici, c’est justement ce qu’on mesure.
    pub fn profondeur(&self) -> usize {
        let mut pile: Vec<(&Noeud, usize)> = Vec::with_capacity(64);
        pile.push((self, 1));

        let mut max = 0usize;

        while let Some((n, niveau)) = pile.pop() {
            max = max.max(niveau);

            match n {
                Noeud::Nombre(_) | Noeud::Ident(_) => {}
                Noeud::Unaire { operande, .. } => pile.push((operande.as_ref(), niveau + 1)),
                Noeud::Binaire { gauche, droite, .. } => {
                    pile.push((gauche.as_ref(), niveau + 1));
                    pile.push((droite.as_ref(), niveau + 1));
                }
                Noeud::Appel { args, .. } => {
                    for a in args {
                        pile.push((a, niveau + 1));
                    }
                }
            }
        }

        max
    }
}
