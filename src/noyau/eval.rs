//! Noyau — évaluation (pipeline réel)
//!
//! pré-traitement -> jetons -> RPN (shunting-yard) -> pile f64 -> résultat
//!
//! Fonction pure de son entrée : aucun état entre deux appels, hors des tables
//! statiques (opérateurs, registre des fonctions).

use super::erreur::{ErreurCalc, Resultat};
use super::fonctions::chercher;
use super::jetons::{format_tokens, tokenize, Tok};
use super::pretraitement::pretraiter;
use super::rpn::to_rpn;

/// Trace du pipeline, pour le panneau “Démarche” de l’UI.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub normalise: String,
    pub jetons: String,
    pub rpn: String,
}

/// API publique minimale : texte -> valeur.
pub fn evaluate(expression: &str) -> Resultat<f64> {
    eval_expression(expression).map(|(v, _)| v)
}

/// Évalue une expression et retourne la valeur + la démarche (normalisé, jetons, RPN).
pub fn eval_expression(expression: &str) -> Resultat<(f64, Demarche)> {
    // 0) Pré-traitement
    let normalise = pretraiter(expression);
    if normalise.is_empty() {
        return Err(ErreurCalc::invalide("entrée vide"));
    }

    // 1) Jetons
    let jetons = tokenize(&normalise)?;
    let jetons_txt = format_tokens(jetons.iter().map(|j| &j.tok));
    log::debug!("jetons: {jetons_txt}");

    // 2) RPN
    let rpn = to_rpn(&jetons)?;
    let rpn_txt = format_tokens(&rpn);
    log::debug!("rpn: {rpn_txt}");

    // 3) Pile
    let v = eval_rpn(&rpn)?;

    let d = Demarche {
        normalise,
        jetons: jetons_txt,
        rpn: rpn_txt,
    };
    Ok((v, d))
}

/// Exécute une séquence postfixe avec une seule pile de f64, de gauche à droite.
pub fn eval_rpn(rpn: &[Tok]) -> Resultat<f64> {
    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        match tok {
            Tok::Num(v) => st.push(*v),

            Tok::Op(op) => {
                let args = depiler(&mut st, op.arite(), op.symbole())?;
                let v = op.appliquer(&args)?;
                st.push(verifier_fini(op.symbole(), &args, v)?);
            }

            Tok::Ident(name) => {
                let f = chercher(name).ok_or_else(|| ErreurCalc::UnknownFunction {
                    nom: name.clone(),
                    pos: None,
                })?;
                // args dans l’ordre d’écriture : power(x, y) => [x, y] (y dépilé en premier)
                let args = depiler(&mut st, f.arite, f.nom)?;
                let v = f.appliquer(&args)?;
                st.push(verifier_fini(f.nom, &args, v)?);
            }

            Tok::LPar | Tok::RPar | Tok::Virgule => {
                return Err(ErreurCalc::invalide(format!("« {tok} » inattendu en RPN")))
            }
        }
    }

    match st.as_slice() {
        [v] => Ok(*v),
        [] => Err(ErreurCalc::invalide("aucune valeur")),
        _ => Err(ErreurCalc::invalide(format!(
            "{} valeurs sans opérateur pour les combiner",
            st.len()
        ))),
    }
}

fn depiler(st: &mut Vec<f64>, n: usize, operateur: &str) -> Resultat<Vec<f64>> {
    if st.len() < n {
        return Err(ErreurCalc::InsufficientOperands {
            operateur: operateur.to_string(),
            pos: None,
        });
    }
    Ok(st.split_off(st.len() - n))
}

/// Un résultat non fini issu d’opérandes finis est un dépassement.
fn verifier_fini(operation: &str, args: &[f64], v: f64) -> Resultat<f64> {
    if !v.is_finite() && args.iter().all(|a| a.is_finite()) {
        return Err(ErreurCalc::Overflow {
            operation: operation.to_string(),
        });
    }
    Ok(v)
}
