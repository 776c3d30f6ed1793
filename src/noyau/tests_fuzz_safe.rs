//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - toute erreur est une VALEUR (jamais de panique), et d’une sorte connue
//! - invariant clé : un résultat Ok s’affiche toujours (texte non vide)

use std::time::{Duration, Instant};

use super::erreur::ErrorKind;
use super::eval::{eval_expression, evaluate};
use super::format::format_resultat;
use super::session::Session;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

const FONCTIONS_1: [&str; 12] = [
    "sin", "cos", "tan", "asin", "ln", "log10", "sqrt", "exp", "factorial", "reciprocal",
    "gamma", "tanh",
];

const FONCTIONS_2: [&str; 3] = ["power", "log", "nth_root"];

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}.{}", rng.pick(100), rng.pick(10)),
        3 => "pi".to_string(),
        4 => "e".to_string(),
        _ => format!("{}", 90 * rng.pick(5)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_nombre(rng);
    }

    match rng.pick(10) {
        0 | 1 => gen_nombre(rng),
        2 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("{}-{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("{}*{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("{}/{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        6 => format!("{}^{}", gen_nombre(rng), gen_nombre(rng)),
        7 => format!("-{}", gen_expr(rng, depth - 1)),
        8 => {
            let f = FONCTIONS_1[rng.pick(FONCTIONS_1.len() as u32) as usize];
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
        _ => {
            let f = FONCTIONS_2[rng.pick(FONCTIONS_2.len() as u32) as usize];
            format!("{f}({}, {})", gen_expr(rng, depth - 1), gen_nombre(rng))
        }
    }
}

/// Texte “sale” : morceaux valides + caractères parasites, parenthèses orphelines.
fn gen_bruit(rng: &mut Rng) -> String {
    const MORCEAUX: [&str; 16] = [
        "(", ")", ",", "+", "-", "*", "/", "^", "**", "sin", "pi", "2", ".", "$", "x", " ",
    ];
    let n = 1 + rng.pick(12);
    (0..n)
        .map(|_| MORCEAUX[rng.pick(MORCEAUX.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_affichage() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        let a = eval_expression(&expr);
        let b = eval_expression(&expr);
        assert_eq!(a, b, "non déterministe: {expr:?}");

        match a {
            Ok((v, d)) => {
                assert!(v.is_finite(), "valeur non finie sans erreur: {expr:?} = {v}");
                assert!(!format_resultat(v).is_empty());
                assert!(!d.rpn.is_empty());
                seen_ok += 1;
            }
            Err(e) => {
                // message toujours présent
                assert!(!e.to_string().is_empty(), "message vide: {expr:?}");
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_bruit(&mut rng);
        // seule exigence : un Result, jamais de panique
        if let Err(e) = evaluate(&expr) {
            assert!(!e.to_string().is_empty(), "message vide: {expr:?}");
        }
    }
}

#[test]
fn fuzz_safe_session_inchangee_sur_erreur() {
    let mut rng = Rng::new(0xFACADE_u64);
    let mut session = Session::default();

    for _ in 0..100 {
        let expr = if rng.coin() {
            gen_expr(&mut rng, 3)
        } else {
            gen_bruit(&mut rng)
        };
        let avant = session.clone();
        let (apres, r) = session.evaluer(&expr);
        match r {
            Ok(v) => {
                assert_eq!(apres.dernier_resultat, v);
                assert_eq!(apres.historique.len(), avant.historique.len() + 1);
            }
            Err(_) => assert_eq!(apres, avant, "session modifiée par {expr:?}"),
        }
        session = apres;
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1/2", 800);
    let v = evaluate(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(format_resultat(v), "400");
}

#[test]
fn fuzz_safe_parentheses_profondes() {
    let n = 500;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(evaluate(&expr), Ok(1.0));

    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n - 1));
    assert_eq!(
        evaluate(&expr).unwrap_err().kind(),
        ErrorKind::UnbalancedParentheses
    );
}
