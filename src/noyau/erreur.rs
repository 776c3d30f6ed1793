// src/noyau/erreur.rs
//
// Erreurs du noyau : toujours des valeurs, jamais de panique.
// Les messages sont en français (affichés tels quels par l’UI).

use thiserror::Error;

/// Famille d’erreur, sans données (pratique pour `match` côté UI et tests).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    UnbalancedParentheses,
    UnknownFunction,
    InsufficientOperands,
    InvalidExpression,
    DomainError,
    TypeError,
    DivisionByZero,
    Overflow,
}

/// Erreur de calcul.
///
/// Les champs `pos` sont des index en caractères dans le texte NORMALISÉ
/// (après retrait des espaces, multiplications implicites et remplacement de
/// `pi`/`e`), c’est-à-dire `Demarche::normalise`, pas dans la saisie brute.
/// `None` : position inconnue (RPN fournie directement à `eval_rpn`).
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ErreurCalc {
    #[error("parenthèses non équilibrées{}", pos_txt(.pos))]
    UnbalancedParentheses { pos: Option<usize> },

    #[error("fonction inconnue : {nom}{}", pos_txt(.pos))]
    UnknownFunction { nom: String, pos: Option<usize> },

    #[error("opérandes insuffisants pour « {operateur} »{}", pos_txt(.pos))]
    InsufficientOperands {
        operateur: String,
        pos: Option<usize>,
    },

    #[error("expression invalide : {detail}")]
    InvalidExpression { detail: String },

    #[error("{fonction}({argument}) : {raison}")]
    DomainError {
        fonction: String,
        argument: f64,
        raison: String,
    },

    #[error("{fonction}({argument}) : un entier est requis")]
    TypeError { fonction: String, argument: f64 },

    #[error("division par zéro")]
    DivisionByZero,

    #[error("dépassement de capacité dans {operation}")]
    Overflow { operation: String },
}

fn pos_txt(pos: &Option<usize>) -> String {
    match pos {
        Some(p) => format!(" (position {p})"),
        None => String::new(),
    }
}

impl ErreurCalc {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnbalancedParentheses { .. } => ErrorKind::UnbalancedParentheses,
            Self::UnknownFunction { .. } => ErrorKind::UnknownFunction,
            Self::InsufficientOperands { .. } => ErrorKind::InsufficientOperands,
            Self::InvalidExpression { .. } => ErrorKind::InvalidExpression,
            Self::DomainError { .. } => ErrorKind::DomainError,
            Self::TypeError { .. } => ErrorKind::TypeError,
            Self::DivisionByZero => ErrorKind::DivisionByZero,
            Self::Overflow { .. } => ErrorKind::Overflow,
        }
    }

    pub(crate) fn domaine(fonction: &str, argument: f64, raison: &str) -> Self {
        Self::DomainError {
            fonction: fonction.to_string(),
            argument,
            raison: raison.to_string(),
        }
    }

    pub(crate) fn invalide(detail: impl Into<String>) -> Self {
        Self::InvalidExpression {
            detail: detail.into(),
        }
    }
}

pub type Resultat<T> = Result<T, ErreurCalc>;
