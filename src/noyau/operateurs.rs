// src/noyau/operateurs.rs
//
// Table des opérateurs (statique, lecture seule)
// ----------------------------------------------
// symbole -> (précédence, associativité, arité, règle)
//
// Précédences :
//   + -      : 1 (gauche)
//   * /      : 2 (gauche)
//   - unaire : 3 (droite, préfixe)
//   ^ / **   : 4 (droite)  => 2^3^2 = 2^(3^2)
//
// Le moins unaire se place entre * et ^ : -2^2 = -4, 2^-1 = 0.5.

use super::erreur::{ErreurCalc, Resultat};
use super::fonctions::puissance;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Div,
    Puiss,
    /// Moins unaire (jamais produit par le tokenizer : décidé par le parseur).
    Neg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assoc {
    Gauche,
    Droite,
}

pub struct DescripteurOp {
    pub symbole: &'static str,
    pub precedence: u8,
    pub assoc: Assoc,
    pub arite: usize,
    /// Règle pure : reçoit exactement `arite` opérandes, dans l’ordre.
    pub regle: fn(&[f64]) -> Resultat<f64>,
}

// Indexée par `Operateur as usize` (même ordre que l’enum).
static TABLE: [DescripteurOp; 6] = [
    DescripteurOp {
        symbole: "+",
        precedence: 1,
        assoc: Assoc::Gauche,
        arite: 2,
        regle: additionner,
    },
    DescripteurOp {
        symbole: "-",
        precedence: 1,
        assoc: Assoc::Gauche,
        arite: 2,
        regle: soustraire,
    },
    DescripteurOp {
        symbole: "*",
        precedence: 2,
        assoc: Assoc::Gauche,
        arite: 2,
        regle: multiplier,
    },
    DescripteurOp {
        symbole: "/",
        precedence: 2,
        assoc: Assoc::Gauche,
        arite: 2,
        regle: diviser,
    },
    DescripteurOp {
        symbole: "^",
        precedence: 4,
        assoc: Assoc::Droite,
        arite: 2,
        regle: elever,
    },
    DescripteurOp {
        symbole: "neg",
        precedence: 3,
        assoc: Assoc::Droite,
        arite: 1,
        regle: opposer,
    },
];

fn additionner(a: &[f64]) -> Resultat<f64> {
    Ok(a[0] + a[1])
}

fn soustraire(a: &[f64]) -> Resultat<f64> {
    Ok(a[0] - a[1])
}

fn multiplier(a: &[f64]) -> Resultat<f64> {
    Ok(a[0] * a[1])
}

fn diviser(a: &[f64]) -> Resultat<f64> {
    if a[1] == 0.0 {
        return Err(ErreurCalc::DivisionByZero);
    }
    Ok(a[0] / a[1])
}

// Même domaine que power(x, y).
fn elever(a: &[f64]) -> Resultat<f64> {
    puissance("^", a[0], a[1])
}

fn opposer(a: &[f64]) -> Resultat<f64> {
    Ok(-a[0])
}

impl Operateur {
    pub fn descripteur(self) -> &'static DescripteurOp {
        &TABLE[self as usize]
    }

    pub fn precedence(self) -> u8 {
        self.descripteur().precedence
    }

    pub fn arite(self) -> usize {
        self.descripteur().arite
    }

    pub fn symbole(self) -> &'static str {
        self.descripteur().symbole
    }

    /// Règle de shunting-yard : faut-il sortir `sommet` avant d’empiler `self` ?
    /// (≥ pour gauche, > strict pour droite)
    pub fn cede_devant(self, sommet: Operateur) -> bool {
        match self.descripteur().assoc {
            Assoc::Gauche => sommet.precedence() >= self.precedence(),
            Assoc::Droite => sommet.precedence() > self.precedence(),
        }
    }

    /// Applique la règle ; `args.len()` doit valoir l’arité (vérifié par l’évaluateur).
    pub fn appliquer(self, args: &[f64]) -> Resultat<f64> {
        debug_assert_eq!(args.len(), self.arite());
        (self.descripteur().regle)(args)
    }
}
