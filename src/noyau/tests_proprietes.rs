//! Campagne “propriétés” : comportements observables du pipeline complet.
//!
//! - arithmétique + - * / ( ) : même résultat qu’un évaluateur de référence
//!   (descente récursive, indépendant du shunting-yard)
//! - cas de référence (précédence, ^ à droite, degrés, domaines)
//! - formatage : zéro par seuil, idempotence sur les entiers

use rstest::rstest;

use super::erreur::ErrorKind;
use super::eval::evaluate;
use super::format::format_resultat;

/* ------------------------ RNG déterministe (même LCG que le fuzz) ------------------------ */

struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
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
}

/* ------------------------ Référence : descente récursive ------------------------ */

// expr   := terme (('+' | '-') terme)*
// terme  := facteur (('*' | '/') facteur)*
// facteur:= entier | '(' expr ')'
struct Reference<'a> {
    s: &'a [u8],
    i: usize,
}

impl Reference<'_> {
    /// None : division par zéro rencontrée.
    fn eval(s: &str) -> Option<f64> {
        let mut r = Reference {
            s: s.as_bytes(),
            i: 0,
        };
        let v = r.expr()?;
        assert_eq!(r.i, r.s.len(), "référence : texte non consommé dans {s:?}");
        Some(v)
    }

    fn peek(&self) -> Option<u8> {
        self.s.get(self.i).copied()
    }

    fn expr(&mut self) -> Option<f64> {
        let mut v = self.terme()?;
        while let Some(c @ (b'+' | b'-')) = self.peek() {
            self.i += 1;
            let d = self.terme()?;
            v = if c == b'+' { v + d } else { v - d };
        }
        Some(v)
    }

    fn terme(&mut self) -> Option<f64> {
        let mut v = self.facteur()?;
        while let Some(c @ (b'*' | b'/')) = self.peek() {
            self.i += 1;
            let d = self.facteur()?;
            if c == b'*' {
                v *= d;
            } else {
                if d == 0.0 {
                    return None;
                }
                v /= d;
            }
        }
        Some(v)
    }

    fn facteur(&mut self) -> Option<f64> {
        if self.peek() == Some(b'(') {
            self.i += 1;
            let v = self.expr()?;
            assert_eq!(self.peek(), Some(b')'));
            self.i += 1;
            return Some(v);
        }
        let debut = self.i;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.i += 1;
        }
        let txt = std::str::from_utf8(&self.s[debut..self.i]).ok()?;
        Some(txt.parse::<f64>().expect("référence : entier attendu"))
    }
}

/* ------------------------ Génération (bornée) ------------------------ */

fn gen_facteur(rng: &mut Rng, prof: usize) -> String {
    if prof > 0 && rng.pick(3) == 0 {
        return format!("({})", gen_expr(rng, prof - 1));
    }
    format!("{}", rng.pick(12))
}

fn gen_expr(rng: &mut Rng, prof: usize) -> String {
    let n = 1 + rng.pick(4) as usize;
    let mut s = gen_facteur(rng, prof);
    for _ in 1..n {
        let op = ["+", "-", "*", "/"][rng.pick(4) as usize];
        s.push_str(op);
        s.push_str(&gen_facteur(rng, prof));
    }
    s
}

fn proche(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1.0)
}

/* ------------------------ Tests ------------------------ */

#[test]
fn arithmetique_identique_a_la_reference() {
    let mut rng = Rng::new(0x5EED_u64);
    let mut comparees = 0usize;

    for _ in 0..400 {
        let expr = gen_expr(&mut rng, 3);
        match (Reference::eval(&expr), evaluate(&expr)) {
            (Some(attendu), Ok(v)) => {
                assert!(proche(v, attendu), "{expr:?}: {v} != {attendu}");
                comparees += 1;
            }
            (None, Err(e)) => assert_eq!(e.kind(), ErrorKind::DivisionByZero, "{expr:?}"),
            (r, e) => panic!("désaccord sur {expr:?}: référence={r:?} moteur={e:?}"),
        }
    }

    assert!(comparees > 200, "trop peu de comparaisons: {comparees}");
}

#[rstest]
#[case("2^3^2", 512.0)]
#[case("2 + 3 * 4", 14.0)]
#[case("(2 + 3) * 4", 20.0)]
#[case("10 / 2 + 3", 8.0)]
#[case("2^3", 8.0)]
#[case("factorial(5)", 120.0)]
#[case("sin(90)", 1.0)]
#[case("cos(0)", 1.0)]
fn valeurs_de_reference(#[case] expr: &str, #[case] attendu: f64) {
    let v = evaluate(expr).unwrap_or_else(|e| panic!("{expr:?}: {e}"));
    assert!(proche(v, attendu), "{expr:?}: {v} != {attendu}");
}

#[rstest]
#[case("tan(90)", ErrorKind::DomainError)]
#[case("sqrt(-1)", ErrorKind::DomainError)]
#[case("5/0", ErrorKind::DivisionByZero)]
#[case("factorial(-1)", ErrorKind::DomainError)]
#[case("factorial(3.5)", ErrorKind::TypeError)]
#[case("(2 + 3", ErrorKind::UnbalancedParentheses)]
fn erreurs_de_reference(#[case] expr: &str, #[case] attendu: ErrorKind) {
    let e = evaluate(expr).expect_err(expr);
    assert_eq!(e.kind(), attendu, "{expr:?}: {e}");
}

#[test]
fn operateur_sans_operande() {
    let k = evaluate("2 + * 3").expect_err("2 + * 3").kind();
    assert!(matches!(
        k,
        ErrorKind::InvalidExpression | ErrorKind::InsufficientOperands
    ));
}

#[test]
fn format_idempotent_sur_entiers() {
    let mut rng = Rng::new(0x1D3A_u64);
    for _ in 0..200 {
        let v = (rng.next_u32() as i64 - (u32::MAX / 2) as i64) as f64;
        let s = format_resultat(v);
        let relu: f64 = s.parse().expect("entier formaté relisible");
        assert_eq!(format_resultat(relu), s);
    }
}

#[test]
fn zero_par_seuil_sur_le_pipeline() {
    for expr in ["sin(180)", "cos(90)", "tan(180)", "1 - 3 * (1/3)"] {
        let v = evaluate(expr).unwrap_or_else(|e| panic!("{expr:?}: {e}"));
        assert!(v.abs() < 1e-10, "{expr:?} = {v}");
        assert_eq!(format_resultat(v), "0", "{expr:?}");
    }
}
