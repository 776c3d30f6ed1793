//! src/app/entree.rs
//!
//! Adaptateur touches / boutons -> tampon d’entrée ou appel au noyau.
//!
//! Chaque action :
//! - soit modifie directement le tampon (chiffres, opérateurs, signe, DEL, C…)
//! - soit fait UNE évaluation via la session du noyau (=, touches de fonction)
//!
//! Le “%” est une transformation locale à l’UI : il ne fait pas partie du
//! langage d’expression.

use num_bigint::BigInt;

use crate::noyau::erreur::{ErreurCalc, Resultat};
use crate::noyau::format::format_resultat;
use crate::noyau::fractions::{decimal_en_fraction, operer, simplifier};
use crate::noyau::evaluate;

use super::affichage::format_affichage;
use super::etat::{AppCalc, ECRAN_REPOS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Chiffre(char),
    Point,
    /// + - * / ^ (un opérateur final est remplacé, pas empilé)
    Operateur(char),
    Parenthese(char),
    /// Nom de constante inséré tel quel ("pi", "e").
    Constante(&'static str),
    /// Enveloppe le tampon : f(tampon), ou f(0) si vide, puis évalue.
    Fonction(&'static str),
    ChangerSigne,
    Pourcentage,
    /// DEL : dernier caractère.
    Supprimer,
    /// C : tampon seulement.
    EffacerEntree,
    /// AC : tampon + dernier résultat.
    ToutEffacer,
    Egal,
}

impl Action {
    /// Caractère tapé hors du champ de saisie -> action.
    pub fn depuis_caractere(c: char) -> Option<Action> {
        match c {
            '0'..='9' => Some(Action::Chiffre(c)),
            '+' | '-' | '*' | '/' | '^' => Some(Action::Operateur(c)),
            '.' => Some(Action::Point),
            '(' | ')' => Some(Action::Parenthese(c)),
            '%' => Some(Action::Pourcentage),
            '=' => Some(Action::Egal),
            _ => None,
        }
    }
}

const OPERATEURS: &str = "+-*/^";

impl AppCalc {
    pub fn appliquer(&mut self, action: Action) {
        match action {
            Action::Chiffre(c) => self.ajouter_texte(&c.to_string()),
            Action::Point => self.ajouter_point(),
            Action::Operateur(op) => self.ajouter_operateur(op),
            Action::Parenthese(p) => self.ajouter_texte(&p.to_string()),
            Action::Constante(nom) => self.ajouter_constante(nom),
            Action::Fonction(nom) => self.appliquer_fonction(nom),
            Action::ChangerSigne => self.changer_signe(),
            Action::Pourcentage => self.pourcentage(),
            Action::Supprimer => {
                self.entree.pop();
                self.montrer_entree();
            }
            Action::EffacerEntree => self.clear_entree(),
            Action::ToutEffacer => self.reset_total(),
            Action::Egal => self.egal(),
        }
        self.focus_entree = true;
    }

    /// Saisie libre dans le champ : on ne repart plus de zéro.
    pub fn entree_editee(&mut self) {
        self.reset_suivant = false;
        self.montrer_entree();
    }

    /* ------------------------ Tampon ------------------------ */

    fn repartir_si_besoin(&mut self) {
        if self.reset_suivant {
            self.entree.clear();
            self.reset_suivant = false;
        }
    }

    /// Après un résultat, une opération continue à partir du dernier résultat.
    fn continuer_depuis_resultat(&mut self) {
        if self.reset_suivant {
            self.entree = format_resultat(self.session.dernier_resultat);
            self.reset_suivant = false;
        }
    }

    fn montrer_entree(&mut self) {
        self.ecran = if self.entree.is_empty() {
            ECRAN_REPOS.to_string()
        } else {
            format_affichage(&self.entree)
        };
    }

    fn ajouter_texte(&mut self, s: &str) {
        self.repartir_si_besoin();
        self.entree.push_str(s);
        self.montrer_entree();
    }

    fn ajouter_point(&mut self) {
        self.repartir_si_besoin();
        let nombre_courant = self
            .entree
            .rsplit(|c: char| !(c.is_ascii_digit() || c == '.'))
            .next()
            .unwrap_or("");

        // un seul point par nombre
        if nombre_courant.contains('.') {
            return;
        }
        // après une constante ou ')' : pas de nombre à compléter
        if nombre_courant.is_empty()
            && self
                .entree
                .ends_with(|c: char| c.is_ascii_alphabetic() || c == '_' || c == ')')
        {
            return;
        }
        if nombre_courant.is_empty() {
            self.entree.push_str("0.");
        } else {
            self.entree.push('.');
        }
        self.montrer_entree();
    }

    fn ajouter_operateur(&mut self, op: char) {
        self.continuer_depuis_resultat();
        if self.entree.ends_with(|c: char| OPERATEURS.contains(c)) {
            self.entree.pop();
        }
        self.entree.push(op);
        self.montrer_entree();
    }

    fn ajouter_constante(&mut self, nom: &str) {
        self.repartir_si_besoin();
        // "pi" puis "e" ne doit pas donner l’identifiant "pie"
        if self.entree.ends_with(|c: char| c.is_ascii_alphabetic() || c == '_' || c == ')') {
            self.entree.push('*');
        }
        self.entree.push_str(nom);
        self.montrer_entree();
    }

    fn changer_signe(&mut self) {
        if self.entree.is_empty() || self.reset_suivant {
            // porte sur le dernier résultat
            self.session.dernier_resultat = -self.session.dernier_resultat;
            self.entree = format_resultat(self.session.dernier_resultat);
            self.reset_suivant = false;
        } else if let Some(reste) = self.entree.strip_prefix('-') {
            self.entree = reste.to_string();
        } else {
            self.entree.insert(0, '-');
        }
        self.montrer_entree();
    }

    /* ------------------------ Appels au noyau ------------------------ */

    /// Une évaluation dans la session. Succès : écran + démarche + historique.
    fn evaluer(&mut self, expression: &str) -> Option<String> {
        let session = std::mem::take(&mut self.session);
        let (session, r) = session.evaluer_avec_demarche(expression);
        self.session = session;

        match r {
            Ok((v, demarche)) => {
                let texte = format_resultat(v);
                self.ecran = format_affichage(&texte);
                self.erreur.clear();
                self.demarche = demarche;
                self.reset_suivant = true;
                self.historique_modifie();
                Some(texte)
            }
            Err(e) => {
                self.set_erreur(e.to_string());
                None
            }
        }
    }

    fn egal(&mut self) {
        if self.entree.trim().is_empty() {
            return;
        }
        // le tampon garde l’expression ; l’écran montre le résultat
        let expression = self.entree.clone();
        self.evaluer(&expression);
    }

    fn appliquer_fonction(&mut self, nom: &str) {
        let argument = match self.entree.trim() {
            "" => "0",
            t => t,
        };
        let expression = format!("{nom}({argument})");
        if let Some(texte) = self.evaluer(&expression) {
            self.entree = texte;
        }
    }

    fn pourcentage(&mut self) {
        let r = match self.entree.trim() {
            "" => Ok(self.session.dernier_resultat / 100.0),
            t => pourcentage_de(t),
        };
        match r {
            Ok(v) => {
                self.session.dernier_resultat = v;
                self.entree = format_resultat(v);
                self.montrer_entree();
                self.erreur.clear();
                self.reset_suivant = true;
            }
            Err(e) => self.set_erreur(e.to_string()),
        }
    }

    /* ------------------------ Panneau fractions ------------------------ */

    /// (a/b) op (c/d) avec les champs du panneau.
    pub fn calculer_fractions(&mut self) {
        let p = &self.fractions;
        let r = (|| -> Resultat<String> {
            let a = (lire_entier(&p.a_num)?, lire_entier(&p.a_den)?);
            let b = (lire_entier(&p.b_num)?, lire_entier(&p.b_den)?);
            let r = operer(p.op, (&a.0, &a.1), (&b.0, &b.1))?;
            Ok(format!(
                "{}/{} {} {}/{} = {}",
                a.0,
                a.1,
                p.op.symbole(),
                b.0,
                b.1,
                texte_fraction(&r)
            ))
        })();
        self.fractions.resultat = texte_ou_erreur(r);
    }

    /// Forme irréductible de la première fraction.
    pub fn simplifier_fraction(&mut self) {
        let p = &self.fractions;
        let r = (|| -> Resultat<String> {
            let (n, d) = (lire_entier(&p.a_num)?, lire_entier(&p.a_den)?);
            let s = simplifier(&n, &d)?;
            Ok(format!("{n}/{d} = {}", texte_fraction(&s)))
        })();
        self.fractions.resultat = texte_ou_erreur(r);
    }

    /// Décimal (toute expression) -> fraction la plus proche.
    pub fn convertir_decimal(&mut self) {
        let p = &self.fractions;
        let r = evaluate(&p.decimal).and_then(|v| {
            let f = decimal_en_fraction(v, p.den_max)?;
            Ok(format!("{} ~ {}", format_resultat(v), texte_fraction(&f)))
        });
        self.fractions.resultat = texte_ou_erreur(r);
    }
}

/// Transformation “%” du tampon (nombre seul, ou `a op b`).
/// - `a*b%` -> a*(b/100)       - `a/b%` -> a/(b/100)
/// - `a+b%` -> a + a*b/100     - `a-b%` -> a - a*b/100
/// - nombre seul -> /100
pub fn pourcentage_de(tampon: &str) -> Resultat<f64> {
    if let Ok(v) = lire_nombre(tampon) {
        return Ok(v / 100.0);
    }

    let (i, op) = tampon
        .char_indices()
        .rev()
        .find(|(_, c)| "+-*/".contains(*c))
        .ok_or_else(erreur_pourcentage)?;

    let a = lire_nombre(&tampon[..i])?;
    let b = lire_nombre(&tampon[i + op.len_utf8()..])?;
    let part = b / 100.0;

    match op {
        '*' => Ok(a * part),
        '/' => {
            if part == 0.0 {
                return Err(ErreurCalc::DivisionByZero);
            }
            Ok(a / part)
        }
        '+' => Ok(a + a * part),
        // '-'
        _ => Ok(a - a * part),
    }
}

fn lire_nombre(s: &str) -> Resultat<f64> {
    s.trim().parse::<f64>().map_err(|_| erreur_pourcentage())
}

fn erreur_pourcentage() -> ErreurCalc {
    ErreurCalc::invalide("entrée invalide pour le pourcentage")
}

fn lire_entier(s: &str) -> Resultat<BigInt> {
    s.trim()
        .parse::<BigInt>()
        .map_err(|_| ErreurCalc::invalide(format!("entier attendu : « {} »", s.trim())))
}

fn texte_fraction((n, d): &(BigInt, BigInt)) -> String {
    format!("{n}/{d}")
}

fn texte_ou_erreur(r: Resultat<String>) -> String {
    r.unwrap_or_else(|e| format!("Error : {e}"))
}
