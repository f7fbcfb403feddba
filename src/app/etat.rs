//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, historique, annulation, réglages)
//! et offrir des opérations simples (insertion, Clear, Undo) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici : le résultat (ou l’erreur) du noyau est déposé tel quel.
//! - Actions déterministes, sans effet de bord caché.
//! - Historique borné (les plus anciennes lignes tombent).

use calculatrice_sure::{ErreurCalcul, Reglages, Resultat};

/// Garde-fou : nombre de lignes conservées dans l’historique.
const HISTORIQUE_MAX: usize = 200;

/// Garde-fou : profondeur de la pile d’annulation.
const ANNULATION_MAX: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LigneHistorique {
    /// "<entrée> = <valeur>"
    Resultat(String),
    /// Message d’erreur (affiché en rouge).
    Erreur(String),
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub historique: Vec<LigneHistorique>,
    pub demarche: Option<calculatrice_sure::noyau::Demarche>,

    // --- annulation (boutons uniquement ; TextEdit garde la sienne) ---
    annulation: Vec<String>,

    // --- paramètres ---
    pub reglages: Reglages,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
    // Après une erreur : sélectionner toute l’entrée pour la retaper.
    pub selection_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Reglages::default())
    }
}

impl AppCalc {
    pub fn new(reglages: Reglages) -> Self {
        Self {
            entree: String::new(),
            historique: Vec::new(),
            demarche: None,
            annulation: Vec::new(),
            reglages,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
            selection_entree: false,
        }
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    fn memoriser(&mut self) {
        if self.annulation.last() != Some(&self.entree) {
            self.annulation.push(self.entree.clone());
            if self.annulation.len() > ANNULATION_MAX {
                self.annulation.remove(0);
            }
        }
    }

    /// Bouton chiffre / opérateur : ajoute son texte en fin d’entrée.
    pub fn inserer(&mut self, texte: &str) {
        if texte.is_empty() {
            return;
        }
        self.memoriser();
        self.entree.push_str(texte);
        self.focus_entree = true;
    }

    /// Clear (et Échap) : efface seulement l’entrée.
    pub fn clear_entree(&mut self) {
        if !self.entree.is_empty() {
            self.memoriser();
            self.entree.clear();
        }
        self.focus_entree = true;
    }

    /// Undo : revient à l’entrée d’avant la dernière action.
    pub fn annuler(&mut self) {
        if let Some(avant) = self.annulation.pop() {
            self.entree = avant;
        }
        self.focus_entree = true;
    }

    pub fn peut_annuler(&self) -> bool {
        !self.annulation.is_empty()
    }

    fn pousser_historique(&mut self, ligne: LigneHistorique) {
        self.historique.push(ligne);
        if self.historique.len() > HISTORIQUE_MAX {
            let trop = self.historique.len() - HISTORIQUE_MAX;
            self.historique.drain(..trop);
        }
    }

    /// Résultat : ligne "<entrée> = <valeur>" + l’entrée est remplacée par la valeur.
    pub fn set_resultat(&mut self, r: Resultat) {
        self.pousser_historique(LigneHistorique::Resultat(r.texte));
        self.demarche = Some(r.demarche);

        self.memoriser();
        self.entree = r.lecture;

        self.selection_entree = false;
        self.focus_entree = true;
    }

    /// Erreur : ligne rouge, l’entrée est gardée (et sélectionnée) pour correction.
    pub fn set_erreur(&mut self, e: &ErreurCalcul) {
        self.pousser_historique(LigneHistorique::Erreur(format!(
            "Expression invalide : {e}"
        )));
        self.demarche = None;

        self.selection_entree = true;
        self.focus_entree = true;
    }

    pub fn clear_historique(&mut self) {
        self.historique.clear();
        self.demarche = None;
        self.focus_entree = true;
    }
}
