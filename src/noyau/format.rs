// src/noyau/format.rs
//
// Valeur -> texte d’affichage.
// - |v| < 1e-10      => "0" (bruit d’arrondi trig/log)
// - v entier exact   => entier, sans point décimal
// - sinon            => 10 chiffres significatifs, façon "%.10g"

/// Seuil sous lequel un résultat est affiché comme zéro.
pub const SEUIL_ZERO: f64 = 1e-10;

/// Chiffres significatifs du format général.
pub const CHIFFRES_SIGNIFICATIFS: usize = 10;

pub fn format_resultat(v: f64) -> String {
    if !v.is_finite() {
        return format_general(v, CHIFFRES_SIGNIFICATIFS);
    }
    if v.abs() < SEUIL_ZERO {
        return "0".to_string();
    }
    if v.fract() == 0.0 {
        // `{:.0}` écrit tous les chiffres (pas d’exposant), comme un entier
        return format!("{v:.0}");
    }
    format_general(v, CHIFFRES_SIGNIFICATIFS)
}

/// Équivalent de "%.{p}g" : `p` chiffres significatifs, zéros de queue retirés,
/// notation exponentielle si l’exposant décimal est < -4 ou ≥ p.
pub fn format_general(v: f64, p: usize) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }

    let p = p.max(1);

    // l’exposant se lit APRÈS arrondi à p chiffres (9.9999999999 -> 1e1)
    let (mantisse, exposant) = decomposer(v, p - 1);

    if exposant < -4 || exposant >= p as i32 {
        return format!("{}{}", retirer_zeros(&mantisse), suffixe_exposant(exposant));
    }

    let decimales = (p as i32 - 1 - exposant).max(0) as usize;
    retirer_zeros(&format!("{v:.decimales$}"))
}

/// Équivalent de "%.{d}e" : mantisse à `d` décimales, exposant signé sur 2 chiffres min.
pub fn format_exponentiel(v: f64, d: usize) -> String {
    if !v.is_finite() {
        return format_general(v, 1);
    }
    let (mantisse, exposant) = decomposer(v, d);
    format!("{mantisse}{}", suffixe_exposant(exposant))
}

/// "1.2345e6" (Rust) -> ("1.2345", 6)
fn decomposer(v: f64, decimales: usize) -> (String, i32) {
    let sci = format!("{v:.decimales$e}");
    match sci.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse().unwrap_or(0)),
        None => (sci, 0),
    }
}

fn suffixe_exposant(e: i32) -> String {
    let signe = if e < 0 { '-' } else { '+' };
    format!("e{signe}{:02}", e.abs())
}

fn retirer_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
