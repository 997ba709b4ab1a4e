//! Tests scientifiques : scénarios concrets du pipeline complet.
//!
//! Les textes du style "7,42 +" viennent du corpus historique : ils passent par
//! le pipeline infixe (la virgule est ignorée), sauf ceux marqués "postfix"
//! qui sont évalués tels quels via `calculate_postfix`.

use std::f64::consts::{E, PI};

use super::erreur::{Categorie, Erreur};
use super::eval::{calculate, calculate_postfix, compile};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ok(s: &str, x: f64) -> f64 {
    init_logs();
    calculate(s, x).unwrap_or_else(|e| panic!("calculate({s:?}) erreur: {e}"))
}

fn err(s: &str) -> Erreur {
    init_logs();
    match calculate(s, 0.0) {
        Ok(v) => panic!("calculate({s:?}) devait échouer, a donné {v}"),
        Err(e) => e,
    }
}

fn assert_proche(obtenu: f64, attendu: f64, expr: &str) {
    let tol = 1e-9 * attendu.abs().max(1.0);
    assert!(
        (obtenu - attendu).abs() <= tol,
        "expr={expr:?} obtenu={obtenu} attendu={attendu}"
    );
}

fn check(s: &str, attendu: f64) {
    assert_proche(ok(s, 0.0), attendu, s);
}

/* ------------------------ Corpus historique ------------------------ */

#[test]
fn sci_corpus_operateurs() {
    check("7,42 +", 49.0);
    check("7,42 -", -35.0);
    check("3,6 *", 18.0);
    check("6,3 *", 18.0);
    check("10,5 /", 2.0);
    check("5,10 /", 0.5);
    check("5", 5.0);
    check("230(220,0.5 *) -", 120.0);
}

#[test]
fn sci_corpus_constantes_et_fonctions() {
    check("pi,3 +", PI + 3.0);
    check("16,2 log", 4.0);
    check("e 7^ ln", 7.0);
    check("e", E);
}

#[test]
fn sci_corpus_postfix() {
    init_logs();
    let v = calculate_postfix("pi,1.5 * sin", 0.0).unwrap();
    assert_proche(v, -1.0, "pi,1.5 * sin");

    let v = calculate_postfix("pi, cos", 0.0).unwrap();
    assert_proche(v, -1.0, "pi, cos");

    let v = calculate_postfix("230(220,0.5 *) -", 0.0).unwrap();
    assert_proche(v, 120.0, "230(220,0.5 *) -");

    // en postfix pur, l’ordre d’écriture compte
    let v = calculate_postfix("3,4 +,5 *", 0.0).unwrap();
    assert_proche(v, 35.0, "3,4 +,5 *");
}

#[test]
fn sci_corpus_variable() {
    assert_proche(ok("7,x +", 42.0), 49.0, "7,x +");
    assert_proche(ok("X", 7.0), 7.0, "X");
    assert_proche(ok("x", 5.0), 5.0, "x");
    assert_proche(ok("pi,x +", 6.0), PI + 6.0, "pi,x +");
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn sci_precedence() {
    check("3+4*5", 23.0);
    check("3,4 +,5 *", 23.0);
    check("(3+4)*5", 35.0);
    check("2*3^2", 18.0);
    check("100/10/5", 2.0);
    check("10-4-3", 3.0);
}

#[test]
fn sci_puissance_a_droite() {
    check("2^3^2", 512.0);
    check("2,3 ^,2 ^", 512.0);
    check("(2^3)^2", 64.0);
}

#[test]
fn sci_moins_unaire() {
    check("-5+3", -2.0);
    check("(-5)", -5.0);
    check("2*(-3)", -6.0);
    check("-2^2", -4.0);
    assert_proche(ok("-x", 4.0), -4.0, "-x");
    // 0 inséré aussi après la parenthèse d’une fonction
    check("sin(-pi/2)", -1.0);
    check("abs(-2*3)", 6.0);
}

#[test]
fn sci_moins_unaire_et_virgule() {
    // la virgule est ignorée : "-5,3 +" devient "0 5 3 - +", soit 0 + (5 - 3)
    check("-5,3 +", 2.0);
    init_logs();
    // lu en postfix, le '-' ne trouve qu’un seul opérande
    assert_eq!(
        calculate_postfix("-5,3 +", 0.0),
        Err(Erreur::PileInsuffisante("-".into()))
    );
}

/* ------------------------ Fonctions ------------------------ */

#[test]
fn sci_fonctions_unaires() {
    check("sin(pi/2)", 1.0);
    check("cos(0)", 1.0);
    check("tg(pi/4)", 1.0);
    check("ctg(pi/4)", 1.0);
    check("sqrt(16)", 4.0);
    check("abs(-3)", 3.0);
    check("sign(-3)", -1.0);
    check("sign(0)", 0.0);
    check("acos(1)", 0.0);
    check("asin(1)", PI / 2.0);
    check("atan(1)", PI / 4.0);
    check("actg(1)", 4.0 / PI);
    check("arctg(1)", 4.0 / PI);
    check("lg(1000)", 3.0);
    check("ln(e)", 1.0);
    check("π", PI);
}

#[test]
fn sci_fonctions_composees() {
    check("sin(x)^2 + cos(x)^2", 1.0);
    assert_proche(ok("sin(x)^2 + cos(x)^2", 0.7), 1.0, "pythagore");
    check("2*sin(pi/6)", 1.0);
    check("sqrt(abs(-16))", 4.0);
    check("log(8, 2) + 1", 4.0);
    check("log((2+6), 2)", 3.0);
    check("ln(e^3)", 3.0);
}

#[test]
fn sci_fonction_chassee_par_operateur() {
    // "2^sin(x)*3" = (2^sin(x))*3 : '*' sort d’abord sin, puis '^'
    for x in [0.0, 1.0, 2.5] {
        let attendu = 2f64.powf(f64::sin(x)) * 3.0;
        assert_proche(ok("2^sin(x)*3", x), attendu, "2^sin(x)*3");
    }
    check("sin(pi/2)^2*4", 4.0);
    check("3*cos(0)^2+1", 4.0);
}

/* ------------------------ Domaine IEEE-754 ------------------------ */

#[test]
fn sci_domaine_ieee() {
    assert_eq!(ok("1/0", 0.0), f64::INFINITY);
    assert_eq!(ok("-1/0", 0.0), f64::NEG_INFINITY);
    assert!(ok("ln(-1)", 0.0).is_nan());
    assert!(ok("sqrt(-1)", 0.0).is_nan());
    assert!(ok("log((-8), 2)", 0.0).is_nan());
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn sci_erreurs_lex() {
    assert_eq!(err(""), Erreur::EntreeVide);
    assert_eq!(err("   "), Erreur::EntreeVide);
    assert_eq!(err("foo(1)"), Erreur::IdentifiantInconnu("foo".into()));
    assert_eq!(err("sinx"), Erreur::IdentifiantInconnu("sinx".into()));
}

#[test]
fn sci_erreurs_parse() {
    assert_eq!(err("3)"), Erreur::ParentheseFermanteOrpheline);
    assert_eq!(err("(3"), Erreur::ParentheseNonFermee);
    assert_eq!(err("sin(2"), Erreur::ParentheseNonFermee);
    assert_eq!(err("(1+2))*3").categorie(), Categorie::Parse);
}

#[test]
fn sci_erreur_nombre() {
    assert_eq!(err("1.2.3"), Erreur::NombreInvalide("1.2.3".into()));
}

#[test]
fn sci_pile_insuffisante() {
    // un opérateur avant deux opérandes ne donne jamais un nombre silencieux
    for s in ["3+", "+", "*4", "sin", "sin()", "log(2)", "2^"] {
        assert_eq!(err(s).categorie(), Categorie::StackUnderflow, "expr={s:?}");
    }
    init_logs();
    assert_eq!(
        calculate_postfix("3 + 4", 0.0),
        Err(Erreur::PileInsuffisante("+".into()))
    );
}

#[test]
fn sci_pile_finale_invalide() {
    assert_eq!(err("3,4"), Erreur::ExpressionInvalide { restants: 2 });
    // les espaces sont retirés avant tout : "3 4" est le nombre 34
    assert_proche(ok("3 4", 0.0), 34.0, "3 4");
    assert_eq!(err("()"), Erreur::ExpressionInvalide { restants: 0 });
    init_logs();
    assert_eq!(
        calculate_postfix("1,2,3 +", 0.0),
        Err(Erreur::ExpressionInvalide { restants: 2 })
    );
}

/* ------------------------ Compilation / concurrence ------------------------ */

#[test]
fn sci_determinisme() {
    let a = ok("sin(1.3)*ln(7)+2^0.5", 0.0);
    let b = ok("sin(1.3)*ln(7)+2^0.5", 0.0);
    assert_eq!(a.to_bits(), b.to_bits());
}

#[test]
fn sci_compile_une_fois() {
    init_logs();
    let c = compile("x^2 - 2*x + 1").unwrap();
    for i in -5..=5 {
        let x = i as f64;
        assert_proche(c.evaluate(x).unwrap(), (x - 1.0) * (x - 1.0), "carré");
    }
}

#[test]
fn sci_compile_partage_entre_threads() {
    init_logs();
    let f = compile("3*x + 1").unwrap().into_fn();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let f = &f;
                s.spawn(move || {
                    let x = i as f64;
                    (x, f(x))
                })
            })
            .collect();

        for h in handles {
            let (x, r) = h.join().unwrap();
            assert_eq!(r, Ok(3.0 * x + 1.0));
        }
    });
}
