// src/noyau/fractions.rs
//
// Fractions exactes (numérateur, dénominateur) entiers — utilitaire indépendant
// de l’évaluateur. Résultats toujours irréductibles, dénominateur > 0
// (réduction par PGCD via BigRational).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreur::{ErreurCalc, Resultat};

/// Dénominateur max par défaut pour `decimal_en_fraction`.
pub const DENOMINATEUR_MAX: u64 = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpFraction {
    Plus,
    Moins,
    Fois,
    Div,
}

impl OpFraction {
    pub fn symbole(self) -> &'static str {
        match self {
            OpFraction::Plus => "+",
            OpFraction::Moins => "-",
            OpFraction::Fois => "×",
            OpFraction::Div => "÷",
        }
    }
}

fn vers_rationnel(num: &BigInt, den: &BigInt) -> Resultat<BigRational> {
    if den.is_zero() {
        return Err(ErreurCalc::domaine(
            "fraction",
            num.to_f64().unwrap_or(f64::NAN),
            "dénominateur nul",
        ));
    }
    Ok(BigRational::new(num.clone(), den.clone()))
}

fn paire(r: BigRational) -> (BigInt, BigInt) {
    let (n, d) = r.into_raw();
    (n, d)
}

/// Réduit n/d à sa forme irréductible (signe porté par le numérateur).
pub fn simplifier(num: &BigInt, den: &BigInt) -> Resultat<(BigInt, BigInt)> {
    Ok(paire(vers_rationnel(num, den)?))
}

/// (a/b) op (c/d), irréductible.
pub fn operer(
    op: OpFraction,
    a: (&BigInt, &BigInt),
    b: (&BigInt, &BigInt),
) -> Resultat<(BigInt, BigInt)> {
    let x = vers_rationnel(a.0, a.1)?;
    let y = vers_rationnel(b.0, b.1)?;

    let r = match op {
        OpFraction::Plus => x + y,
        OpFraction::Moins => x - y,
        OpFraction::Fois => x * y,
        OpFraction::Div => {
            if y.is_zero() {
                return Err(ErreurCalc::domaine(
                    "fraction",
                    0.0,
                    "division par une fraction nulle",
                ));
            }
            x / y
        }
    };
    Ok(paire(r))
}

pub fn additionner(a: (&BigInt, &BigInt), b: (&BigInt, &BigInt)) -> Resultat<(BigInt, BigInt)> {
    operer(OpFraction::Plus, a, b)
}

pub fn soustraire(a: (&BigInt, &BigInt), b: (&BigInt, &BigInt)) -> Resultat<(BigInt, BigInt)> {
    operer(OpFraction::Moins, a, b)
}

pub fn multiplier(a: (&BigInt, &BigInt), b: (&BigInt, &BigInt)) -> Resultat<(BigInt, BigInt)> {
    operer(OpFraction::Fois, a, b)
}

pub fn diviser(a: (&BigInt, &BigInt), b: (&BigInt, &BigInt)) -> Resultat<(BigInt, BigInt)> {
    operer(OpFraction::Div, a, b)
}

/// Fraction la plus proche de `x` avec un dénominateur ≤ `den_max`
/// (fractions continues, meilleure approximation bornée).
pub fn decimal_en_fraction(x: f64, den_max: u64) -> Resultat<(BigInt, BigInt)> {
    let exacte = BigRational::from_float(x)
        .ok_or_else(|| ErreurCalc::domaine("fraction", x, "valeur non finie"))?;
    let den_max = BigInt::from(den_max.max(1));

    if exacte.denom() <= &den_max {
        return Ok(paire(exacte));
    }

    // On travaille sur |x| (divisions entières = planchers), signe remis à la fin.
    let negatif = exacte.is_negative();
    let abs = exacte.abs();

    let (mut p0, mut q0, mut p1, mut q1) = (
        BigInt::zero(),
        BigInt::one(),
        BigInt::one(),
        BigInt::zero(),
    );
    let (mut n, mut d) = (abs.numer().clone(), abs.denom().clone());

    loop {
        let a = &n / &d;
        let q2 = &q0 + &a * &q1;
        if q2 > den_max {
            break;
        }
        let p2 = &p0 + &a * &p1;
        p0 = std::mem::replace(&mut p1, p2);
        q0 = std::mem::replace(&mut q1, q2);
        let reste = &n - &a * &d;
        n = std::mem::replace(&mut d, reste);
    }

    let k = (&den_max - &q0) / &q1;
    let borne1 = BigRational::new(&p0 + &k * &p1, &q0 + &k * &q1);
    let borne2 = BigRational::new(p1, q1);

    let meilleure = if (&borne2 - &abs).abs() <= (&borne1 - &abs).abs() {
        borne2
    } else {
        borne1
    };

    Ok(paire(if negatif { -meilleure } else { meilleure }))
}
