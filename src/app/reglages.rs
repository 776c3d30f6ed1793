//! src/app/reglages.rs
//!
//! Réglages (JSON), tous les champs optionnels dans le fichier.
//! Source : $CALCULATRICE_REGLAGES, sinon `calculatrice.json` (dossier courant).
//! Absent => valeurs par défaut. Invalide => valeurs par défaut + warn.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::historique::{ErreurStockage, Historique};

pub const VAR_REGLAGES: &str = "CALCULATRICE_REGLAGES";
pub const FICHIER_REGLAGES: &str = "calculatrice.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reglages {
    pub fichier_historique: PathBuf,
    pub persister_historique: bool,
    /// None => historique non borné.
    pub historique_max: Option<usize>,
    pub largeur_fenetre: f32,
    pub hauteur_fenetre: f32,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            fichier_historique: PathBuf::from("calculator_history.json"),
            persister_historique: true,
            historique_max: None,
            largeur_fenetre: 400.0,
            hauteur_fenetre: 600.0,
        }
    }
}

impl Reglages {
    pub fn lire(chemin: &Path) -> Result<Self, ErreurStockage> {
        let txt = fs::read_to_string(chemin)?;
        Ok(serde_json::from_str(&txt)?)
    }

    pub fn charger_depuis(chemin: &Path) -> Self {
        if !chemin.exists() {
            return Self::default();
        }
        Self::lire(chemin).unwrap_or_else(|e| {
            log::warn!("réglages ignorés ({}) : {e}", chemin.display());
            Self::default()
        })
    }

    /// Chemin désigné par l’environnement, sinon le fichier par défaut.
    pub fn charger() -> Self {
        let chemin = std::env::var_os(VAR_REGLAGES)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(FICHIER_REGLAGES));
        Self::charger_depuis(&chemin)
    }

    /// Stockage d’historique correspondant.
    pub fn historique(&self) -> Historique {
        if self.persister_historique {
            Historique::fichier(&self.fichier_historique)
        } else {
            Historique::memoire()
        }
    }
}
