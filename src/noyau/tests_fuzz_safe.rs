//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline et la machine à états sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - sur expressions bien formées, seules les erreurs de DOMAINE sont
//!   admissibles (division par zéro, hors domaine, non fini)
//! - invariant clé : la machine ne panique jamais et son résultat publié
//!   reste toujours un nombre lisible

use std::time::{Duration, Instant};

use super::eval::{eval_expression, ErreurCalcul};
use super::expr::{Constante, Fonction};
use super::format::format_resultat;
use super::machine::Calculatrice;

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

/* ------------------------ Génération d'expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let n = rng.pick(10);
    if rng.coin() {
        let d = rng.pick(10);
        format!("{n}.{d}")
    } else {
        format!("{n}")
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(4) {
        0 | 1 => gen_nombre(rng),
        2 => "pi".to_string(),
        _ => "e".to_string(),
    }
}

/// Expression TOUJOURS conforme à la grammaire : les échecs lexicaux et
/// syntaxiques sont testés ailleurs, ici on balaye le domaine numérique.
fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(10) {
        0 => gen_atom(rng),
        1 => format!("(-{})", gen_expr(rng, depth - 1)),
        2 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        6 => format!("({}%{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        7 => format!("({}^{})", gen_nombre(rng), gen_nombre(rng)),
        8 => {
            let f = match rng.pick(6) {
                0 => "sin",
                1 => "cos",
                2 => "tan",
                3 => "sqrt",
                4 => "ln",
                _ => "log",
            };
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
        _ => format!("({})", gen_expr(rng, depth - 1)),
    }
}

/// Une sortie par expression, stable et comparable.
fn sortie(expr: &str) -> String {
    match eval_expression(expr) {
        Ok(v) => format_resultat(v),
        Err(e) => format!("erreur: {e}"),
    }
}

/* ------------------------ Tests pipeline ------------------------ */

#[test]
fn fuzz_safe_grammaire_valide_erreurs_de_domaine_seulement() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        match eval_expression(&expr) {
            Ok(v) => {
                assert!(v.is_finite(), "valeur non finie sortie du pipeline: {expr:?}");
                seen_ok += 1;
            }
            Err(ErreurCalcul::Domaine(_)) => {
                seen_err += 1;
            }
            Err(autre) => {
                panic!("expression bien formée, erreur non-domaine: expr={expr:?} err={autre}");
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme_du_pipeline() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let gen_tout = |seed: u64| -> Vec<(String, String)> {
        let mut rng = Rng::new(seed);
        (0..150)
            .map(|_| {
                let expr = gen_expr(&mut rng, 4);
                let s = sortie(&expr);
                (expr, s)
            })
            .collect()
    };

    let a = gen_tout(0xBADC0DE_u64);
    budget(t0, max);
    let b = gen_tout(0xBADC0DE_u64);

    // Même seed => mêmes expressions => mêmes sorties, au texte près.
    assert_eq!(a, b);
}

/* ------------------------ Tests machine à états ------------------------ */

const ALPHABET_TAMPON: &str = "0123456789.+-*/%^()abcdefghijklmnopqrstuvwxyz";

fn commande_aleatoire(c: &mut Calculatrice, rng: &mut Rng) {
    match rng.pick(12) {
        0..=3 => c.chiffre(char::from(b'0' + rng.pick(10) as u8)),
        4 => c.point(),
        5 | 6 => {
            let op = ['+', '-', '*', '/', '%', '^'][rng.pick(6) as usize];
            c.operateur(op);
        }
        7 => c.parenthese(if rng.coin() { '(' } else { ')' }),
        8 => {
            let f = [
                Fonction::Sin,
                Fonction::Cos,
                Fonction::Tan,
                Fonction::Sqrt,
                Fonction::Ln,
                Fonction::Log,
            ][rng.pick(6) as usize];
            c.fonction(f);
        }
        9 => c.constante(if rng.coin() { Constante::Pi } else { Constante::E }),
        10 => c.retour(),
        _ => c.egal(),
    }
}

#[test]
fn fuzz_safe_machine_ne_panique_jamais() {
    let t0 = Instant::now();
    let max = Duration::from_millis(800);

    let mut rng = Rng::new(0xFEED_u64);
    let mut c = Calculatrice::default();

    for i in 0..1500 {
        budget(t0, max);

        commande_aleatoire(&mut c, &mut rng);

        // Invariants après CHAQUE commande :
        // - le résultat publié est toujours un nombre lisible
        assert!(
            c.resultat().parse::<f64>().is_ok(),
            "résultat illisible au pas {i}: {:?}",
            c.resultat()
        );
        // - le tampon ne contient que l'alphabet de la mini-langue
        assert!(
            c.expression().chars().all(|ch| ALPHABET_TAMPON.contains(ch)),
            "caractère hors alphabet au pas {i}: {:?}",
            c.expression()
        );

        // de temps en temps, on repart à zéro pour revisiter les états courts
        if rng.pick(97) == 0 {
            c.effacer();
            assert_eq!(c.expression(), "");
            assert_eq!(c.resultat(), "0");
        }
    }
}

#[test]
fn fuzz_safe_egal_toujours_idempotent() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xD1CE_u64);
    let mut c = Calculatrice::default();

    for _ in 0..400 {
        budget(t0, max);

        commande_aleatoire(&mut c, &mut rng);
        c.egal();
        let apres_un = (c.expression().to_string(), c.resultat().to_string());
        c.egal();
        let apres_deux = (c.expression().to_string(), c.resultat().to_string());

        // valider deux fois de suite ne change rien la seconde fois
        assert_eq!(apres_un, apres_deux);
    }
}
