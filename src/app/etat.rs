//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, valeur, erreur, décimales, démarche)
//! et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Décimales affichées bornées.

/// Décimales affichées par défaut.
const DECIMALES_DEFAUT: usize = 10;

/// Au-delà, f64 n’a plus rien à dire.
pub const DECIMALES_MAX: usize = 17;

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub arbre: String,
    pub profondeur: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub valeur: String,       // dernière valeur (formatée)
    pub erreur: String,       // message d’erreur (si refus)
    pub valeur_brute: Option<f64>,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub decimales: usize,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            valeur: String::new(),
            erreur: String::new(),
            valeur_brute: None,
            demarche: Demarche::default(),
            decimales: DECIMALES_DEFAUT,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + décimales par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.decimales = DECIMALES_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer valeur + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.valeur.clear();
        self.valeur_brute = None;
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX :
    /// - On CONSERVE la dernière valeur pour ne pas “effacer l’écran” sur une faute.
    /// - On coupe la démarche (elle décrivait l’expression précédente).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat complet (valeur + démarche).
    pub fn set_resultat(&mut self, valeur: f64, texte: impl Into<String>, demarche: Demarche) {
        self.erreur.clear();
        self.valeur_brute = Some(valeur);
        self.valeur = texte.into();
        self.demarche = demarche;
        self.focus_entree = true;
    }

    /// Garde-fou : limite les décimales affichées.
    pub fn set_decimales(&mut self, decimales: usize) {
        self.decimales = decimales.min(DECIMALES_MAX);
        self.focus_entree = true;
    }
}
