// src/app.rs
//
// Calculatrice Tactile — module App (racine)
// ------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs + reglages.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l'impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - La calculatrice elle-même ne connaît ni egui ni le stockage : tout passe
//   par sa surface de commandes et ses accesseurs.

pub mod etat;
pub mod reglages;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Raccourcis clavier globaux (sûrs natif + web) :
        // - ESC       = tout effacer (bouton "C")
        // - Enter     = évaluer ("=")
        // - Backspace = effacer le dernier caractère ("⌫")
        // - texte     = chiffres, opérateurs, parenthèses, point au vol
        let (esc, entree, retour, textes) = ctx.input(|i| {
            let textes: Vec<String> = i
                .events
                .iter()
                .filter_map(|ev| match ev {
                    egui::Event::Text(t) => Some(t.clone()),
                    _ => None,
                })
                .collect();
            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::Backspace),
                textes,
            )
        });

        if esc {
            self.calc.effacer();
        }
        if entree {
            self.calc.egal();
        }
        if retour {
            self.calc.retour();
        }
        for t in textes {
            for ch in t.chars() {
                self.touche_clavier(ch);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });

        if self.reglages_ouverts {
            self.ui_reglages(ctx);
        }
    }

    /// Persistance : seule la couleur d'accent survit aux relances
    /// (équivalent des Preferences de l'app d'origine).
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage.set_string(reglages::CLE_ACCENT, self.reglages.accent().to_string());
    }
}
