// src/noyau/rpn.rs
//
// Shunting-yard -> RPN (postfix)
// Objectif:
// - Convertir une suite de Jeton en RPN, évaluable avec une seule pile
//
// Règles:
// - Ident(name) suivi de '(' => appel de fonction : marqueur empilé, sorti
//   après la parenthèse fermante (l’évaluateur dépile alors `arité` valeurs).
// - Ident(name) sans '(' => erreur (fonction sans argument ou nom inconnu).
// - Moins unaire : si '-' arrive quand on n’attend PAS une valeur => Op(Neg).
//   Plus unaire : ignoré.
// - Opérateurs : on sort le sommet tant que sa précédence est ≥ (gauche)
//   ou > (droite) ; ^ est associatif à droite.
// - Virgule : sépare les arguments de l’appel le plus interne.

use super::erreur::{ErreurCalc, Resultat};
use super::fonctions::{chercher, DescripteurFn};
use super::jetons::{Jeton, Tok};
use super::operateurs::Operateur;

enum Pile {
    Op(Operateur),
    Fonction(&'static DescripteurFn),
    /// `appel` : parenthèse ouvrante d’un appel de fonction.
    Paren { pos: usize, appel: bool, virgules: usize },
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   jetons: [Ident("power"), LPar, Num(2), Virgule, Num(3), RPar, Op(Plus), Num(1)]
///   rpn:    [Num(2), Num(3), Ident("power"), Num(1), Op(Plus)]
pub fn to_rpn(jetons: &[Jeton]) -> Resultat<Vec<Tok>> {
    let mut out: Vec<Tok> = Vec::with_capacity(jetons.len());
    let mut ops: Vec<Pile> = Vec::new();

    // “valeur” = un nombre ou une expression fermée.
    // Sert à détecter le moins unaire et les appels vides.
    let mut prev_was_value = false;
    let mut prev_was_lpar = false;

    for (k, jeton) in jetons.iter().enumerate() {
        let pos = jeton.pos;
        let lpar = matches!(jeton.tok, Tok::LPar);

        match &jeton.tok {
            Tok::Num(_) => {
                out.push(jeton.tok.clone());
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                let suivi_de_paren = matches!(jetons.get(k + 1).map(|j| &j.tok), Some(Tok::LPar));
                let desc = chercher(name).ok_or_else(|| ErreurCalc::UnknownFunction {
                    nom: name.clone(),
                    pos: Some(pos),
                })?;
                if !suivi_de_paren {
                    return Err(ErreurCalc::invalide(format!(
                        "{name} doit être suivi de '(' (position {pos})"
                    )));
                }
                // fonction : on la garde sur la pile (elle sortira après son argument)
                ops.push(Pile::Fonction(desc));
                prev_was_value = false;
            }

            Tok::LPar => {
                let appel = matches!(ops.last(), Some(Pile::Fonction(_)))
                    && k > 0
                    && matches!(jetons[k - 1].tok, Tok::Ident(_));
                ops.push(Pile::Paren {
                    pos,
                    appel,
                    virgules: 0,
                });
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                let (appel, virgules) = loop {
                    match ops.pop() {
                        Some(Pile::Paren {
                            appel, virgules, ..
                        }) => break (appel, virgules),
                        Some(Pile::Op(op)) => out.push(Tok::Op(op)),
                        // un marqueur de fonction est toujours sous sa '(' : inatteignable
                        Some(Pile::Fonction(f)) => out.push(Tok::Ident(f.nom.to_string())),
                        None => return Err(ErreurCalc::UnbalancedParentheses { pos: Some(pos) }),
                    }
                };

                if appel {
                    if let Some(Pile::Fonction(f)) = ops.pop() {
                        let recus = if prev_was_lpar { 0 } else { virgules + 1 };
                        if recus != f.arite {
                            return Err(ErreurCalc::invalide(format!(
                                "{} attend {} argument(s), {} reçu(s)",
                                f.nom, f.arite, recus
                            )));
                        }
                        out.push(Tok::Ident(f.nom.to_string()));
                    }
                }

                prev_was_value = true;
            }

            Tok::Virgule => {
                // dépile jusqu’à la '(' de l’appel courant (sans la retirer)
                loop {
                    match ops.last() {
                        Some(Pile::Paren { appel: true, .. }) => break,
                        Some(Pile::Op(op)) => {
                            out.push(Tok::Op(*op));
                            ops.pop();
                        }
                        _ => {
                            return Err(ErreurCalc::invalide(format!(
                                "virgule hors d’un appel de fonction (position {pos})"
                            )))
                        }
                    }
                }
                if let Some(Pile::Paren { virgules, .. }) = ops.last_mut() {
                    *virgules += 1;
                }
                prev_was_value = false;
            }

            Tok::Op(op) => {
                let op = *op;

                if !prev_was_value && matches!(op, Operateur::Plus | Operateur::Moins) {
                    // préfixe : rien à dépiler (un préfixe n’a pas d’opérande gauche)
                    if op == Operateur::Moins {
                        ops.push(Pile::Op(Operateur::Neg));
                    }
                    prev_was_lpar = false;
                    continue;
                }

                // binaire sans opérande gauche : "2+*3", "(*2)"
                if !prev_was_value {
                    return Err(ErreurCalc::InsufficientOperands {
                        operateur: op.symbole().to_string(),
                        pos: Some(pos),
                    });
                }

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou par un marqueur de fonction
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(Pile::Op(top)) = ops.last() {
                    if !op.cede_devant(*top) {
                        break;
                    }
                    out.push(Tok::Op(*top));
                    ops.pop();
                }

                ops.push(Pile::Op(op));
                prev_was_value = false;
            }
        }

        prev_was_lpar = lpar;
    }

    // vide la pile ops
    while let Some(p) = ops.pop() {
        match p {
            Pile::Op(op) => out.push(Tok::Op(op)),
            Pile::Paren { pos, .. } => {
                return Err(ErreurCalc::UnbalancedParentheses { pos: Some(pos) })
            }
            Pile::Fonction(f) => out.push(Tok::Ident(f.nom.to_string())),
        }
    }

    // opérateur final sans opérande droit : "7-", "2^"
    if let Some(Jeton {
        tok: Tok::Op(op),
        pos,
    }) = jetons.last()
    {
        return Err(ErreurCalc::InsufficientOperands {
            operateur: op.symbole().to_string(),
            pos: Some(*pos),
        });
    }

    Ok(out)
}
