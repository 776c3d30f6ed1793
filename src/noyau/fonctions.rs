// src/noyau/fonctions.rs
//
// Registre des fonctions nommées
// ------------------------------
// nom -> (arité, convention d’angle, validateur de domaine, règle)
//
// Contrats :
// - Registre statique, lecture seule, partagé sans verrou.
// - Le validateur passe AVANT la règle : la règle suppose son domaine respecté.
// - Trig directe (sin/cos/tan) : argument en DEGRÉS.
//   Trig inverse (asin/acos/atan) : résultat en RADIANS. Asymétrie voulue.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

use super::erreur::{ErreurCalc, Resultat};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Angle {
    /// Argument interprété en degrés.
    Degres,
    /// Résultat exprimé en radians.
    Radians,
    NonApplicable,
}

pub struct DescripteurFn {
    pub nom: &'static str,
    pub arite: usize,
    pub angle: Angle,
    pub valider: fn(&str, &[f64]) -> Resultat<()>,
    pub regle: fn(&[f64]) -> f64,
}

impl DescripteurFn {
    /// Valide puis applique. `args` est dans l’ordre d’écriture : power(x, y) => [x, y].
    pub fn appliquer(&self, args: &[f64]) -> Resultat<f64> {
        if args.len() != self.arite {
            return Err(ErreurCalc::invalide(format!(
                "{} attend {} argument(s), {} reçu(s)",
                self.nom,
                self.arite,
                args.len()
            )));
        }
        (self.valider)(self.nom, args)?;
        Ok((self.regle)(args))
    }
}

macro_rules! fonction {
    ($nom:literal, $arite:literal, $angle:ident, $valider:expr, $regle:expr) => {
        DescripteurFn {
            nom: $nom,
            arite: $arite,
            angle: Angle::$angle,
            valider: $valider,
            regle: $regle,
        }
    };
}

static REGISTRE: &[DescripteurFn] = &[
    // --- trigonométrie ---
    fonction!("sin", 1, Degres, libre, r_sin),
    fonction!("cos", 1, Degres, libre, r_cos),
    fonction!("tan", 1, Degres, v_tan, r_tan),
    fonction!("asin", 1, Radians, v_unite, r_asin),
    fonction!("acos", 1, Radians, v_unite, r_acos),
    fonction!("atan", 1, Radians, libre, r_atan),
    fonction!("sinh", 1, NonApplicable, libre, r_sinh),
    fonction!("cosh", 1, NonApplicable, libre, r_cosh),
    fonction!("tanh", 1, NonApplicable, libre, r_tanh),
    // --- logarithmes ---
    fonction!("ln", 1, NonApplicable, v_positif, r_ln),
    fonction!("log10", 1, NonApplicable, v_positif, r_log10),
    fonction!("log2", 1, NonApplicable, v_positif, r_log2),
    fonction!("log", 2, NonApplicable, v_log, r_log),
    // --- puissances / racines ---
    fonction!("sqrt", 1, NonApplicable, v_non_negatif, r_sqrt),
    fonction!("cbrt", 1, NonApplicable, libre, r_cbrt),
    fonction!("nth_root", 2, NonApplicable, v_nth_root, r_nth_root),
    fonction!("power", 2, NonApplicable, v_power, r_power),
    fonction!("exp", 1, NonApplicable, libre, r_exp),
    fonction!("square", 1, NonApplicable, libre, r_square),
    fonction!("cube", 1, NonApplicable, libre, r_cube),
    fonction!("reciprocal", 1, NonApplicable, v_non_nul, r_reciprocal),
    // --- factorielles ---
    fonction!("factorial", 1, NonApplicable, v_naturel, r_factorial),
    fonction!("double_factorial", 1, NonApplicable, v_naturel, r_double_factorial),
    fonction!("gamma", 1, NonApplicable, v_gamma, r_gamma),
];

/// Recherche exacte (sensible à la casse).
pub fn chercher(nom: &str) -> Option<&'static DescripteurFn> {
    REGISTRE.iter().find(|f| f.nom == nom)
}

pub fn est_fonction(nom: &str) -> bool {
    chercher(nom).is_some()
}

/* ------------------------ Validateurs ------------------------ */

fn est_entier(x: f64) -> bool {
    x.is_finite() && x.fract() == 0.0
}

fn libre(_: &str, _: &[f64]) -> Resultat<()> {
    Ok(())
}

fn v_tan(nom: &str, a: &[f64]) -> Resultat<()> {
    if a[0].to_radians().cos().abs() < 1e-15 {
        return Err(ErreurCalc::domaine(nom, a[0], "tangente indéfinie pour cet angle"));
    }
    Ok(())
}

fn v_unite(nom: &str, a: &[f64]) -> Resultat<()> {
    if !(-1.0..=1.0).contains(&a[0]) {
        return Err(ErreurCalc::domaine(nom, a[0], "argument hors de [-1, 1]"));
    }
    Ok(())
}

fn v_positif(nom: &str, a: &[f64]) -> Resultat<()> {
    if a[0] <= 0.0 || a[0].is_nan() {
        return Err(ErreurCalc::domaine(nom, a[0], "argument doit être > 0"));
    }
    Ok(())
}

fn v_log(nom: &str, a: &[f64]) -> Resultat<()> {
    v_positif(nom, a)?;
    let base = a[1];
    if base <= 0.0 || base == 1.0 || base.is_nan() {
        return Err(ErreurCalc::domaine(nom, base, "base doit être > 0 et ≠ 1"));
    }
    Ok(())
}

fn v_non_negatif(nom: &str, a: &[f64]) -> Resultat<()> {
    if a[0] < 0.0 {
        return Err(ErreurCalc::domaine(nom, a[0], "argument négatif"));
    }
    Ok(())
}

fn v_nth_root(nom: &str, a: &[f64]) -> Resultat<()> {
    let (x, n) = (a[0], a[1]);
    if !est_entier(n) || n <= 0.0 {
        return Err(ErreurCalc::domaine(nom, n, "n doit être un entier positif"));
    }
    if x < 0.0 && n % 2.0 == 0.0 {
        return Err(ErreurCalc::domaine(nom, x, "racine paire d’un nombre négatif"));
    }
    Ok(())
}

fn v_power(nom: &str, a: &[f64]) -> Resultat<()> {
    let (x, y) = (a[0], a[1]);
    if x < 0.0 && !est_entier(y) {
        return Err(ErreurCalc::domaine(
            nom,
            y,
            "base négative avec exposant non entier",
        ));
    }
    if x == 0.0 && y < 0.0 {
        return Err(ErreurCalc::DivisionByZero);
    }
    Ok(())
}

fn v_non_nul(nom: &str, a: &[f64]) -> Resultat<()> {
    if a[0] == 0.0 {
        return Err(ErreurCalc::domaine(nom, a[0], "division par zéro"));
    }
    Ok(())
}

fn v_naturel(nom: &str, a: &[f64]) -> Resultat<()> {
    // ordre : entier d’abord (TypeError), signe ensuite (DomainError)
    if !est_entier(a[0]) {
        return Err(ErreurCalc::TypeError {
            fonction: nom.to_string(),
            argument: a[0],
        });
    }
    if a[0] < 0.0 {
        return Err(ErreurCalc::domaine(nom, a[0], "argument doit être ≥ 0"));
    }
    Ok(())
}

fn v_gamma(nom: &str, a: &[f64]) -> Resultat<()> {
    if est_entier(a[0]) && a[0] <= 0.0 {
        return Err(ErreurCalc::domaine(
            nom,
            a[0],
            "indéfini pour les entiers négatifs ou nuls",
        ));
    }
    Ok(())
}

/* ------------------------ Règles ------------------------ */

fn r_sin(a: &[f64]) -> f64 {
    a[0].to_radians().sin()
}
fn r_cos(a: &[f64]) -> f64 {
    a[0].to_radians().cos()
}
fn r_tan(a: &[f64]) -> f64 {
    a[0].to_radians().tan()
}
fn r_asin(a: &[f64]) -> f64 {
    a[0].asin()
}
fn r_acos(a: &[f64]) -> f64 {
    a[0].acos()
}
fn r_atan(a: &[f64]) -> f64 {
    a[0].atan()
}
fn r_sinh(a: &[f64]) -> f64 {
    a[0].sinh()
}
fn r_cosh(a: &[f64]) -> f64 {
    a[0].cosh()
}
fn r_tanh(a: &[f64]) -> f64 {
    a[0].tanh()
}

fn r_ln(a: &[f64]) -> f64 {
    a[0].ln()
}
fn r_log10(a: &[f64]) -> f64 {
    a[0].log10()
}
fn r_log2(a: &[f64]) -> f64 {
    a[0].log2()
}
fn r_log(a: &[f64]) -> f64 {
    a[0].ln() / a[1].ln()
}

fn r_sqrt(a: &[f64]) -> f64 {
    a[0].sqrt()
}
fn r_cbrt(a: &[f64]) -> f64 {
    // f64::cbrt préserve le signe : cbrt(-8) = -2
    a[0].cbrt()
}

fn r_nth_root(a: &[f64]) -> f64 {
    let (x, n) = (a[0], a[1]);
    if x < 0.0 {
        // n impair garanti par le validateur
        -(-x).powf(1.0 / n)
    } else {
        x.powf(1.0 / n)
    }
}

fn r_power(a: &[f64]) -> f64 {
    a[0].powf(a[1])
}
fn r_exp(a: &[f64]) -> f64 {
    a[0].exp()
}
fn r_square(a: &[f64]) -> f64 {
    a[0].powi(2)
}
fn r_cube(a: &[f64]) -> f64 {
    a[0].powi(3)
}
fn r_reciprocal(a: &[f64]) -> f64 {
    1.0 / a[0]
}

/// Au-delà, n! ne tient plus dans un f64 (171! > f64::MAX).
const FACTORIELLE_MAX: u64 = 170;

/// Idem pour n!! (301!! > f64::MAX).
const DOUBLE_FACTORIELLE_MAX: u64 = 300;

fn r_factorial(a: &[f64]) -> f64 {
    let n = a[0] as u64;
    if n > FACTORIELLE_MAX {
        return f64::INFINITY;
    }
    produit_exact(1..=n)
}

fn r_double_factorial(a: &[f64]) -> f64 {
    let n = a[0] as u64;
    if n > DOUBLE_FACTORIELLE_MAX {
        return f64::INFINITY;
    }
    // n = 0, 1 => produit vide = 1
    produit_exact((1..=n).rev().step_by(2))
}

/// Produit exact en big int, arrondi une seule fois vers f64.
fn produit_exact(facteurs: impl Iterator<Item = u64>) -> f64 {
    let p = facteurs.fold(BigUint::one(), |acc, k| acc * BigUint::from(k));
    p.to_f64().unwrap_or(f64::INFINITY)
}

fn r_gamma(a: &[f64]) -> f64 {
    libm::tgamma(a[0])
}

/* ------------------------ Partagé avec l’opérateur ^ ------------------------ */

/// x^y avec le domaine de power(x, y). `nom` sert au message d’erreur.
pub fn puissance(nom: &str, x: f64, y: f64) -> Resultat<f64> {
    v_power(nom, &[x, y])?;
    Ok(r_power(&[x, y]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::erreur::ErrorKind;
    use rstest::rstest;

    fn appel(nom: &str, args: &[f64]) -> Resultat<f64> {
        chercher(nom)
            .unwrap_or_else(|| panic!("{nom} absent du registre"))
            .appliquer(args)
    }

    fn proche(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[rstest]
    #[case("sin", &[90.0], 1.0)]
    #[case("cos", &[0.0], 1.0)]
    #[case("cos", &[60.0], 0.5)]
    #[case("tan", &[45.0], 1.0)]
    #[case("asin", &[1.0], std::f64::consts::FRAC_PI_2)]
    #[case("acos", &[1.0], 0.0)]
    #[case("atan", &[1.0], std::f64::consts::FRAC_PI_4)]
    #[case("ln", &[std::f64::consts::E], 1.0)]
    #[case("log10", &[1000.0], 3.0)]
    #[case("log2", &[8.0], 3.0)]
    #[case("log", &[81.0, 3.0], 4.0)]
    #[case("sqrt", &[16.0], 4.0)]
    #[case("cbrt", &[27.0], 3.0)]
    #[case("cbrt", &[-8.0], -2.0)]
    #[case("nth_root", &[16.0, 4.0], 2.0)]
    #[case("nth_root", &[-27.0, 3.0], -3.0)]
    #[case("power", &[2.0, 10.0], 1024.0)]
    #[case("power", &[-2.0, 3.0], -8.0)]
    #[case("exp", &[0.0], 1.0)]
    #[case("square", &[-3.0], 9.0)]
    #[case("cube", &[-2.0], -8.0)]
    #[case("reciprocal", &[4.0], 0.25)]
    #[case("factorial", &[0.0], 1.0)]
    #[case("factorial", &[5.0], 120.0)]
    #[case("double_factorial", &[0.0], 1.0)]
    #[case("double_factorial", &[1.0], 1.0)]
    #[case("double_factorial", &[7.0], 105.0)]
    #[case("double_factorial", &[8.0], 384.0)]
    #[case("gamma", &[5.0], 24.0)]
    #[case("gamma", &[0.5], std::f64::consts::PI.sqrt())]
    #[case("sinh", &[0.0], 0.0)]
    fn valeurs(#[case] nom: &str, #[case] args: &[f64], #[case] attendu: f64) {
        let v = appel(nom, args).unwrap_or_else(|e| panic!("{nom}{args:?} : {e}"));
        assert!(proche(v, attendu), "{nom}{args:?} = {v}, attendu {attendu}");
    }

    #[rstest]
    #[case("tan", &[90.0], ErrorKind::DomainError)]
    #[case("tan", &[270.0], ErrorKind::DomainError)]
    #[case("asin", &[1.5], ErrorKind::DomainError)]
    #[case("acos", &[-1.01], ErrorKind::DomainError)]
    #[case("ln", &[0.0], ErrorKind::DomainError)]
    #[case("log10", &[-1.0], ErrorKind::DomainError)]
    #[case("log2", &[0.0], ErrorKind::DomainError)]
    #[case("log", &[-1.0, 10.0], ErrorKind::DomainError)]
    #[case("log", &[10.0, 1.0], ErrorKind::DomainError)]
    #[case("log", &[10.0, 0.0], ErrorKind::DomainError)]
    #[case("sqrt", &[-1.0], ErrorKind::DomainError)]
    #[case("nth_root", &[-16.0, 4.0], ErrorKind::DomainError)]
    #[case("nth_root", &[8.0, 2.5], ErrorKind::DomainError)]
    #[case("nth_root", &[8.0, 0.0], ErrorKind::DomainError)]
    #[case("power", &[-8.0, 0.5], ErrorKind::DomainError)]
    #[case("power", &[0.0, -1.0], ErrorKind::DivisionByZero)]
    #[case("reciprocal", &[0.0], ErrorKind::DomainError)]
    #[case("factorial", &[-1.0], ErrorKind::DomainError)]
    #[case("factorial", &[3.5], ErrorKind::TypeError)]
    #[case("factorial", &[-2.5], ErrorKind::TypeError)]
    #[case("double_factorial", &[-3.0], ErrorKind::DomainError)]
    #[case("double_factorial", &[2.5], ErrorKind::TypeError)]
    #[case("gamma", &[0.0], ErrorKind::DomainError)]
    #[case("gamma", &[-3.0], ErrorKind::DomainError)]
    fn domaines(#[case] nom: &str, #[case] args: &[f64], #[case] attendu: ErrorKind) {
        let e = appel(nom, args).expect_err("erreur attendue");
        assert_eq!(e.kind(), attendu, "{nom}{args:?} -> {e}");
    }

    #[test]
    fn factorielle_trop_grande_devient_infinie() {
        // l’évaluateur transforme ensuite l’infini en Overflow
        assert_eq!(appel("factorial", &[171.0]), Ok(f64::INFINITY));
        assert!(appel("factorial", &[170.0]).unwrap().is_finite());
    }

    #[test]
    fn gamma_negatif_non_entier_accepte() {
        // Γ(-0.5) = -2√π
        let v = appel("gamma", &[-0.5]).unwrap();
        assert!(proche(v, -2.0 * std::f64::consts::PI.sqrt()));
    }

    #[test]
    fn registre_sensible_a_la_casse() {
        assert!(est_fonction("sin"));
        assert!(!est_fonction("SIN"));
        assert!(!est_fonction("pi"));
    }

    #[test]
    fn arites() {
        assert_eq!(chercher("power").map(|f| f.arite), Some(2));
        assert_eq!(chercher("log").map(|f| f.arite), Some(2));
        assert_eq!(chercher("nth_root").map(|f| f.arite), Some(2));
        assert!(REGISTRE
            .iter()
            .filter(|f| !matches!(f.nom, "power" | "log" | "nth_root"))
            .all(|f| f.arite == 1));
    }

    #[test]
    fn conventions_angle() {
        assert_eq!(chercher("sin").map(|f| f.angle), Some(Angle::Degres));
        assert_eq!(chercher("atan").map(|f| f.angle), Some(Angle::Radians));
        assert_eq!(chercher("ln").map(|f| f.angle), Some(Angle::NonApplicable));
    }

    #[test]
    fn mauvaise_arite() {
        let e = appel("power", &[2.0]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidExpression);
    }
}
