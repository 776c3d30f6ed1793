//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (tampon d’entrée, écran, erreur,
//! session du noyau, démarche, panneau fractions) et offrir les opérations
//! simples qui ne passent pas par le noyau.
//!
//! Contrats :
//! - Le noyau n’est appelé que depuis entree.rs (une évaluation par action).
//! - Toute erreur s’affiche "Error" + message, vide le tampon et arme
//!   `reset_suivant` (la prochaine touche repart de zéro).

use crate::noyau::fractions::{OpFraction, DENOMINATEUR_MAX};
use crate::noyau::{Demarche, Session};

use super::historique::Historique;
use super::reglages::Reglages;

/// Texte de l’écran au repos.
pub const ECRAN_REPOS: &str = "0";

/// Texte de l’écran après une erreur.
pub const ECRAN_ERREUR: &str = "Error";

/// Panneau “fractions” : deux fractions saisies en texte + opération.
#[derive(Clone, Debug)]
pub struct PanneauFractions {
    pub a_num: String,
    pub a_den: String,
    pub b_num: String,
    pub b_den: String,
    pub op: OpFraction,
    pub decimal: String,
    pub den_max: u64,
    pub resultat: String,
}

impl Default for PanneauFractions {
    fn default() -> Self {
        Self {
            a_num: "1".into(),
            a_den: "2".into(),
            b_num: "1".into(),
            b_den: "3".into(),
            op: OpFraction::Plus,
            decimal: String::new(),
            den_max: DENOMINATEUR_MAX,
            resultat: String::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub ecran: String,  // affichage (après règle de débordement)
    pub erreur: String, // message d’erreur (si parsing/éval échoue)

    // --- noyau ---
    pub session: Session,
    pub demarche: Demarche,

    // --- saisie ---
    // Après un résultat ou une erreur : la prochaine touche repart de zéro.
    pub reset_suivant: bool,

    // --- historique ---
    pub historique: Historique,
    pub historique_max: Option<usize>,

    pub fractions: PanneauFractions,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::avec_stockage(Historique::memoire(), None)
    }
}

impl AppCalc {
    /// État initial selon les réglages (historique chargé depuis le disque).
    pub fn new(reglages: &Reglages) -> Self {
        Self::avec_stockage(reglages.historique(), reglages.historique_max)
    }

    pub fn avec_stockage(historique: Historique, historique_max: Option<usize>) -> Self {
        let mut session = Session::avec_historique(historique.charger());
        session.tronquer(historique_max);

        Self {
            entree: String::new(),
            ecran: ECRAN_REPOS.to_string(),
            erreur: String::new(),
            session,
            demarche: Demarche::default(),
            reset_suivant: false,
            historique,
            historique_max,
            fractions: PanneauFractions::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }

    /* ------------------------ Actions simples (état seulement) ------------------------ */

    /// C : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.ecran = ECRAN_REPOS.to_string();
        self.focus_entree = true;
    }

    /// AC : remise à zéro (entrée + dernier résultat + écran + erreur + démarche).
    /// L’historique est conservé.
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.session.dernier_resultat = 0.0;
        self.reset_suivant = false;
        self.ecran = ECRAN_REPOS.to_string();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        log::debug!("erreur affichée : {}", self.erreur);
        self.ecran = ECRAN_ERREUR.to_string();
        self.entree.clear();
        self.reset_suivant = true;

        // pipeline invalide => on efface la démarche
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Vide l’historique (mémoire + disque).
    pub fn effacer_historique(&mut self) {
        self.session.effacer_historique();
        self.historique.sauver(&self.session.historique);
    }

    /// Après un ajout : borne + sauvegarde.
    pub(crate) fn historique_modifie(&mut self) {
        self.session.tronquer(self.historique_max);
        self.historique.sauver(&self.session.historique);
    }
}
