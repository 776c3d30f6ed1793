//! src/app/affichage.rs
//!
//! Règle de débordement de l’écran (affichage seulement, le formatage du noyau
//! reste inchangé) : un texte de plus de 15 caractères qui se lit comme un
//! nombre passe en notation exponentielle à 6 décimales quand |v| ≥ 1e10
//! ou 0 < |v| < 1e-4.

use crate::noyau::format::format_exponentiel;

/// Largeur utile de l’écran, en caractères.
pub const LARGEUR_ECRAN: usize = 15;

const GRAND: f64 = 1e10;
const PETIT: f64 = 1e-4;

pub fn format_affichage(texte: &str) -> String {
    if texte.chars().count() <= LARGEUR_ECRAN {
        return texte.to_string();
    }

    let Ok(v) = texte.trim().parse::<f64>() else {
        return texte.to_string();
    };

    let a = v.abs();
    if a >= GRAND || (a < PETIT && v != 0.0) {
        format_exponentiel(v, 6)
    } else {
        texte.to_string()
    }
}
