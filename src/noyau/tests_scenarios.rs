//! Scénarios bout-en-bout à travers la surface de commandes, tels qu'un
//! utilisateur les taperait touche par touche.
//!
//! Invariants martelés ici :
//! - `egal()` deux fois de suite ne change rien la seconde fois ;
//! - `effacer()` ramène toujours à ("", "0") ;
//! - `retour()` sur tampon vide est un no-op ;
//! - un résultat validé ne fuit pas dans le tampon suivant ;
//! - l'échec de `egal()` est un no-op complet (tampon, résultat, drapeau).

use std::cell::RefCell;
use std::rc::Rc;

use super::machine::{Calculatrice, Etat};
use super::{Constante, Fonction};

fn tape(c: &mut Calculatrice, texte: &str) {
    for ch in texte.chars() {
        match ch {
            '0'..='9' => c.chiffre(ch),
            '.' => c.point(),
            '(' | ')' => c.parenthese(ch),
            '+' | '-' | '*' | '/' | '%' | '^' => c.operateur(ch),
            autre => panic!("touche inconnue dans le scénario: {autre:?}"),
        }
    }
}

#[test]
fn deux_plus_deux() {
    let mut c = Calculatrice::default();
    tape(&mut c, "2+2");
    c.egal();
    assert_eq!(c.resultat(), "4");
    assert_eq!(c.expression(), "4");
    assert_eq!(c.etat(), Etat::Valide);
}

#[test]
fn parentheses_et_priorites() {
    let mut c = Calculatrice::default();
    tape(&mut c, "3*(4+5)");
    c.egal();
    assert_eq!(c.resultat(), "27");
}

#[test]
fn racine_carree_au_clavier() {
    let mut c = Calculatrice::default();
    c.fonction(Fonction::Sqrt);
    assert_eq!(c.expression(), "sqrt(");
    tape(&mut c, "16)");
    c.egal();
    assert_eq!(c.resultat(), "4");
}

#[test]
fn pi_lu_en_direct() {
    let mut c = Calculatrice::default();
    c.constante(Constante::Pi);
    // évaluation souple, sans '=' : arrondi à 10 décimales
    assert_eq!(c.resultat(), "3.1415926536");
    assert_eq!(c.etat(), Etat::Saisie);
}

#[test]
fn egal_refuse_sur_operateur_final() {
    let mut c = Calculatrice::default();
    tape(&mut c, "5+");
    assert_eq!(c.resultat(), "5"); // lecture de "5", avant le '+'

    c.egal();
    // no-op complet : rien ne bouge, le drapeau reste baissé
    assert_eq!(c.expression(), "5+");
    assert_eq!(c.resultat(), "5");
    assert_eq!(c.etat(), Etat::Saisie);
}

#[test]
fn egal_refuse_sur_parenthese_ouverte() {
    let mut c = Calculatrice::default();
    c.fonction(Fonction::Sqrt);
    tape(&mut c, "16");
    c.egal(); // ')' manquante
    assert_eq!(c.expression(), "sqrt(16");
    assert_eq!(c.etat(), Etat::Saisie);
}

#[test]
fn egal_refuse_sur_division_par_zero() {
    let mut c = Calculatrice::default();
    tape(&mut c, "1/0");
    c.egal();
    assert_eq!(c.expression(), "1/0");
    assert_eq!(c.resultat(), "1"); // lecture de "1", les suivantes ont échoué
    assert_eq!(c.etat(), Etat::Saisie);
}

#[test]
fn egal_idempotent() {
    let mut c = Calculatrice::default();
    tape(&mut c, "0.1+0.2");
    c.egal();
    assert_eq!(c.resultat(), "0.3"); // bruit flottant gommé
    let expr = c.expression().to_string();

    c.egal();
    assert_eq!(c.expression(), expr);
    assert_eq!(c.resultat(), "0.3");
    assert_eq!(c.etat(), Etat::Valide);
}

#[test]
fn effacer_ramene_a_l_origine() {
    let mut c = Calculatrice::default();
    tape(&mut c, "12*(3");
    c.effacer();
    assert_eq!(c.expression(), "");
    assert_eq!(c.resultat(), "0");
    assert_eq!(c.etat(), Etat::Vide);

    // idem depuis l'état validé
    tape(&mut c, "9");
    c.egal();
    c.effacer();
    assert_eq!(c.expression(), "");
    assert_eq!(c.resultat(), "0");
    assert_eq!(c.etat(), Etat::Vide);
}

#[test]
fn retour_sur_vide_est_un_no_op() {
    let mut c = Calculatrice::default();
    c.retour();
    c.retour();
    assert_eq!(c.expression(), "");
    assert_eq!(c.resultat(), "0");
    assert_eq!(c.etat(), Etat::Vide);
}

#[test]
fn retour_raccourcit_et_relit() {
    let mut c = Calculatrice::default();
    tape(&mut c, "12+34");
    assert_eq!(c.resultat(), "46");
    c.retour(); // "12+3"
    assert_eq!(c.resultat(), "15");
    c.retour(); // "12+" : lecture impossible, résultat conservé
    assert_eq!(c.resultat(), "15");
    c.retour();
    c.retour();
    c.retour(); // tampon vide : retour au résultat initial
    assert_eq!(c.expression(), "");
    assert_eq!(c.resultat(), "0");
}

#[test]
fn resultat_valide_ne_fuit_pas() {
    let mut c = Calculatrice::default();
    tape(&mut c, "2+2");
    c.egal();
    c.chiffre('9');
    assert_eq!(c.expression(), "9");
    c.egal();
    assert_eq!(c.resultat(), "9");
}

#[test]
fn double_point_rejete() {
    let mut c = Calculatrice::default();
    c.chiffre('0');
    c.point();
    c.point();
    assert_eq!(c.expression(), "0.");
}

#[test]
fn pourcent_taper_et_valider() {
    // 50%10 : héritage textuel, la droite est ignorée
    let mut c = Calculatrice::default();
    tape(&mut c, "50%10");
    c.egal();
    assert_eq!(c.resultat(), "0.5");
}

#[test]
fn saisie_invalide_reste_silencieuse() {
    let mut c = Calculatrice::default();
    tape(&mut c, "2+3");
    assert_eq!(c.resultat(), "5");
    // parenthèse fermante excédentaire : lecture impossible, silence
    c.parenthese(')');
    assert_eq!(c.expression(), "2+3)");
    assert_eq!(c.resultat(), "5");
    // on répare en effaçant la ')'
    c.retour();
    assert_eq!(c.resultat(), "5");
}

#[test]
fn diffusion_sur_chaque_changement() {
    let vues: Rc<RefCell<Vec<(String, String)>>> = Rc::new(RefCell::new(Vec::new()));

    let mut c = Calculatrice::default();
    {
        let vues = Rc::clone(&vues);
        c.abonner(move |expr, res| vues.borrow_mut().push((expr.to_string(), res.to_string())));
    }

    c.chiffre('2');
    c.operateur('+');
    c.chiffre('2');
    c.egal();
    c.egal(); // rien ne change : rien n'est diffusé

    let vues = vues.borrow();
    assert_eq!(
        vues.as_slice(),
        [
            ("2".to_string(), "2".to_string()),
            ("2+".to_string(), "2".to_string()),
            ("2+2".to_string(), "4".to_string()),
            ("4".to_string(), "4".to_string()),
        ]
    );
}

#[test]
fn accesseurs_pour_abonne_tardif() {
    let mut c = Calculatrice::default();
    tape(&mut c, "6*7");

    // un composant monté après coup lit l'état courant sans attendre un événement
    assert_eq!(c.expression(), "6*7");
    assert_eq!(c.resultat(), "42");
}

#[test]
fn deux_calculatrices_independantes() {
    let mut a = Calculatrice::default();
    let mut b = Calculatrice::default();
    tape(&mut a, "1+1");
    tape(&mut b, "3*3");
    a.egal();
    b.egal();
    assert_eq!(a.resultat(), "2");
    assert_eq!(b.resultat(), "9");
}
