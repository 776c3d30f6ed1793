//! Noyau de calcul scientifique (f64)
//!
//! Organisation interne :
//! - erreur.rs        : sortes d’erreurs (ErreurCalc / ErrorKind)
//! - pretraitement.rs : espaces, constantes pi/e, multiplication implicite
//! - jetons.rs        : tokenisation
//! - operateurs.rs    : table des opérateurs (précédence, associativité, arité)
//! - fonctions.rs     : registre des fonctions + règles de domaine
//! - rpn.rs           : shunting-yard
//! - eval.rs          : pile RPN + pipeline complet
//! - format.rs        : valeur -> texte
//! - fractions.rs     : fractions exactes (indépendant de l’évaluateur)
//! - session.rs       : dernier résultat + historique, passés en valeur

pub mod erreur;
pub mod eval;
pub mod fonctions;
pub mod format;
pub mod fractions;
pub mod jetons;
pub mod operateurs;
pub mod pretraitement;
pub mod rpn;
pub mod session;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{ErreurCalc, ErrorKind, Resultat};
pub use eval::{eval_expression, evaluate, Demarche};
pub use format::format_resultat;
pub use session::{EntreeHistorique, Session};
