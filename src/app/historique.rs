//! src/app/historique.rs
//!
//! Stockage de l’historique : liste JSON de paires [expression, résultat].
//!
//! Contrats :
//! - chargé au démarrage, sauvé après chaque ajout / effacement
//! - persistance au mieux : un échec est journalisé (warn) puis ignoré,
//!   l’historique en mémoire (Session) reste la référence
//! - `chemin == None` => aucune écriture disque (web, ou persistance coupée)

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::noyau::EntreeHistorique;

#[derive(Error, Debug)]
pub enum ErreurStockage {
    #[error("erreur d’E/S : {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON invalide : {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Default)]
pub struct Historique {
    chemin: Option<PathBuf>,
}

impl Historique {
    pub fn fichier(chemin: impl Into<PathBuf>) -> Self {
        Self {
            chemin: Some(chemin.into()),
        }
    }

    /// Historique en mémoire seulement.
    pub fn memoire() -> Self {
        Self { chemin: None }
    }

    pub fn chemin(&self) -> Option<&Path> {
        self.chemin.as_deref()
    }

    pub fn lire(chemin: &Path) -> Result<Vec<EntreeHistorique>, ErreurStockage> {
        let txt = fs::read_to_string(chemin)?;
        Ok(serde_json::from_str(&txt)?)
    }

    pub fn ecrire(chemin: &Path, entrees: &[EntreeHistorique]) -> Result<(), ErreurStockage> {
        let txt = serde_json::to_string(entrees)?;
        fs::write(chemin, txt)?;
        Ok(())
    }

    /// Fichier absent => liste vide, sans bruit. Fichier illisible => liste vide + warn.
    pub fn charger(&self) -> Vec<EntreeHistorique> {
        let Some(chemin) = self.chemin.as_deref() else {
            return Vec::new();
        };
        if !chemin.exists() {
            return Vec::new();
        }
        match Self::lire(chemin) {
            Ok(v) => {
                log::info!(
                    "historique : {} entrée(s) lue(s) depuis {}",
                    v.len(),
                    chemin.display()
                );
                v
            }
            Err(e) => {
                log::warn!("historique illisible ({}) : {e}", chemin.display());
                Vec::new()
            }
        }
    }

    pub fn sauver(&self, entrees: &[EntreeHistorique]) {
        let Some(chemin) = self.chemin.as_deref() else {
            return;
        };
        if let Err(e) = Self::ecrire(chemin, entrees) {
            log::warn!("historique non sauvé ({}) : {e}", chemin.display());
        }
    }
}
