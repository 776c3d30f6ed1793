// src/noyau/session.rs
//
// État de session explicite : dernier résultat + historique.
// La session entre dans l’appel et en ressort (valeur), le noyau reste pur.

use serde::{Deserialize, Serialize};

use super::erreur::Resultat;
use super::eval::{eval_expression, Demarche};
use super::format::format_resultat;

/// (expression, résultat formaté) ; sérialisé en paire JSON `["2+2", "4"]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntreeHistorique(pub String, pub String);

impl EntreeHistorique {
    pub fn expression(&self) -> &str {
        &self.0
    }

    pub fn resultat(&self) -> &str {
        &self.1
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub dernier_resultat: f64,
    pub historique: Vec<EntreeHistorique>,
}

impl Session {
    pub fn avec_historique(historique: Vec<EntreeHistorique>) -> Self {
        Self {
            dernier_resultat: 0.0,
            historique,
        }
    }

    /// Évalue `expression` dans la session.
    /// - succès : dernier résultat mis à jour + entrée ajoutée à l’historique
    /// - échec  : session rendue inchangée
    pub fn evaluer(self, expression: &str) -> (Self, Resultat<f64>) {
        let (session, r) = self.evaluer_avec_demarche(expression);
        (session, r.map(|(v, _)| v))
    }

    pub fn evaluer_avec_demarche(mut self, expression: &str) -> (Self, Resultat<(f64, Demarche)>) {
        let r = eval_expression(expression);
        if let Ok((v, _)) = &r {
            self.dernier_resultat = *v;
            self.historique.push(EntreeHistorique(
                expression.trim().to_string(),
                format_resultat(*v),
            ));
        }
        (self, r)
    }

    /// Garde au plus `max` entrées (les plus récentes).
    pub fn tronquer(&mut self, max: Option<usize>) {
        if let Some(max) = max {
            let n = self.historique.len();
            if n > max {
                self.historique.drain(..n - max);
            }
        }
    }

    pub fn effacer_historique(&mut self) {
        self.historique.clear();
    }
}
