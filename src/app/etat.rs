//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : porter la calculatrice du noyau + les réglages d'affichage. Toute
//! la logique de calcul vit dans noyau::machine ; ici on ne fait que brancher
//! les collaborateurs externes (haptique best-effort, journal de diffusion)
//! et retenir ce qui n'intéresse que l'UI (modale de réglages ouverte ?).
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing, pas de pipeline).
//! - La couleur d'accent ne touche JAMAIS le calcul.

use crate::noyau::{Calculatrice, Config, RetourHaptique};

use super::reglages::Reglages;

/// Retour tactile du poste de travail : pas de vibreur sous la main, on
/// journalise l'impulsion en debug. Meilleur effort, n'échoue jamais.
struct RetourJournal;

impl RetourHaptique for RetourJournal {
    fn impulsion(&mut self, forte: bool) {
        log::debug!(
            "impulsion haptique {}",
            if forte { "appuyée" } else { "légère" }
        );
    }
}

pub struct AppCalc {
    pub calc: Calculatrice,
    pub reglages: Reglages,

    // --- UX ---
    pub reglages_ouverts: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Config::default(), None)
    }
}

impl AppCalc {
    /// `accent_memorise` : valeur persistée d'un lancement précédent
    /// (None au premier démarrage ou sans stockage).
    pub fn new(config: Config, accent_memorise: Option<String>) -> Self {
        let mut calc = Calculatrice::new(config);
        let accent_defaut = calc.config().accent_defaut.clone();
        let reglages = Reglages::new(&accent_defaut, accent_memorise);

        calc.brancher_haptique(RetourJournal);

        // Journal de diffusion : trace chaque paire publiée. Les composants
        // egui, eux, relisent l'état courant à chaque frame via expression()
        // et resultat() — c'est le chemin "abonné tardif".
        calc.abonner(|expr, res| log::debug!("diffusion: expr={expr:?} resultat={res:?}"));

        Self {
            calc,
            reglages,
            reglages_ouverts: false,
        }
    }
}
