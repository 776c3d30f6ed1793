// src/noyau/jetons.rs

use std::fmt;

use super::erreur::{ErreurCalc, Resultat};
use super::operateurs::Operateur;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Op(Operateur),

    // Nom de fonction (les constantes ont déjà été remplacées par le pré-traitement).
    // NOTE: le parseur vérifie qu’il est suivi de '(' et présent au registre.
    Ident(String),

    LPar,
    RPar,
    Virgule,
}

/// Jeton + position (index en caractères dans le texte pré-traité).
#[derive(Clone, Debug, PartialEq)]
pub struct Jeton {
    pub tok: Tok,
    pub pos: usize,
}

/// Tokenize une chaîne pré-traitée en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5) ; pas de notation scientifique
/// - opérateurs + - * / ^ et ** (équivaut à ^)
/// - parenthèses ( ) et virgule
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (casse conservée)
///
/// Tout autre caractère est ignoré silencieusement.
pub fn tokenize(s: &str) -> Resultat<Vec<Jeton>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];
        let pos = i;

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Virgule),
            '+' => Some(Tok::Op(Operateur::Plus)),
            '-' => Some(Tok::Op(Operateur::Moins)),
            '/' => Some(Tok::Op(Operateur::Div)),
            '^' => Some(Tok::Op(Operateur::Puiss)),
            _ => None,
        };
        if let Some(tok) = simple {
            out.push(Jeton { tok, pos });
            i += 1;
            continue;
        }

        // '*' ou '**'
        if c == '*' {
            let tok = if chars.get(i + 1) == Some(&'*') {
                i += 2;
                Tok::Op(Operateur::Puiss)
            } else {
                i += 1;
                Tok::Op(Operateur::Fois)
            };
            out.push(Jeton { tok, pos });
            continue;
        }

        // Nombre : suite contiguë de chiffres et de '.'
        if c.is_ascii_digit() || c == '.' {
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let txt: String = chars[pos..i].iter().collect();
            let v = txt.parse::<f64>().map_err(|_| {
                ErreurCalc::invalide(format!("nombre invalide « {txt} » (position {pos})"))
            })?;
            out.push(Jeton {
                tok: Tok::Num(v),
                pos,
            });
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Jeton {
                tok: Tok::Ident(chars[pos..i].iter().collect()),
                pos,
            });
            continue;
        }

        log::debug!("caractère ignoré {c:?} (position {pos})");
        i += 1;
    }

    Ok(out)
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(v) => write!(f, "{v}"),
            Tok::Op(op) => f.write_str(op.symbole()),
            Tok::Ident(name) => f.write_str(name),
            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
            Tok::Virgule => f.write_str(","),
        }
    }
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens<'a>(tokens: impl IntoIterator<Item = &'a Tok>) -> String {
    tokens
        .into_iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
