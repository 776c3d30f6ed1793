// src/noyau/pretraitement.rs
//
// Pré-traitement (avant tokenisation)
// -----------------------------------
// 1) retire tous les espaces
// 2) multiplication implicite : "2pi" -> "2*pi", "x2" -> "x*2"
// 3) constantes : l’identifiant ENTIER "pi" / "e" devient son littéral décimal
//
// Ne substitue que des identifiants complets : "exp", "square", "reciprocal"
// restent intacts. Les noms connus (fonctions, constantes) ne sont jamais coupés,
// donc "log10" reste "log10". Un identifiant inconnu est découpé à chaque frontière
// lettre/chiffre : "e5" -> "e*5" (pas de notation scientifique : 1e5 = 1*e*5).
//
// Cette étape n’échoue jamais.

use std::f64::consts::{E, PI};

use super::fonctions::est_fonction;

/// Littéral pleine précision d’une constante nommée (sensible à la casse).
pub fn constante(nom: &str) -> Option<f64> {
    match nom {
        "pi" => Some(PI),
        "e" => Some(E),
        _ => None,
    }
}

fn est_nom_connu(mot: &str) -> bool {
    constante(mot).is_some() || est_fonction(mot)
}

fn debut_ident(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn suite_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Découpe un identifiant inconnu aux frontières chiffre / non-chiffre.
fn decouper(mot: &str) -> Vec<&str> {
    if est_nom_connu(mot) {
        return vec![mot];
    }

    let mut out = Vec::new();
    let mut debut = 0;
    let mut prec_chiffre: Option<bool> = None;

    for (i, c) in mot.char_indices() {
        let chiffre = c.is_ascii_digit();
        if prec_chiffre.is_some_and(|p| p != chiffre) {
            out.push(&mot[debut..i]);
            debut = i;
        }
        prec_chiffre = Some(chiffre);
    }
    out.push(&mot[debut..]);
    out
}

fn pousser_segment(out: &mut String, seg: &str) {
    match constante(seg) {
        // `{}` sur f64 : plus court littéral qui relit la même valeur
        Some(v) => out.push_str(&format!("{v}")),
        None => out.push_str(seg),
    }
}

/// Texte brut -> texte prêt pour le tokenizer.
pub fn pretraiter(brut: &str) -> String {
    let chars: Vec<char> = brut.chars().filter(|c| !c.is_whitespace()).collect();
    let mut out = String::with_capacity(chars.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if !debut_ident(c) {
            out.push(c);
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && suite_ident(chars[i]) {
            i += 1;
        }
        let mot: String = chars[start..i].iter().collect();

        // chiffre (ou point décimal) collé devant un identifiant
        if out.ends_with(|p: char| p.is_ascii_digit() || p == '.') {
            out.push('*');
        }

        for (k, seg) in decouper(&mot).into_iter().enumerate() {
            if k > 0 {
                out.push('*');
            }
            pousser_segment(&mut out, seg);
        }
    }

    out
}
