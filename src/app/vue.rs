// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Pavé tactile : gros boutons, chaque bouton = UNE commande du noyau
// - Affichage : expression en petit, résultat en grand (couleur d'accent)
// - Clavier physique : chiffres/opérateurs au vol, Enter évalue,
//   Backspace efface un caractère (géré dans app.rs pour Escape)
//
// Toute la logique vit dans noyau::machine : la vue ne fait que transmettre
// des touches et relire (expression, résultat) à chaque frame.

use eframe::egui;

use crate::noyau::{Constante, Etat, Fonction};

use super::etat::AppCalc;
use super::reglages::couleur_vers_hex;

/// Une touche du pavé = une commande du noyau.
#[derive(Clone, Copy, Debug)]
enum Touche {
    Chiffre(char),
    Point,
    Op(char),
    Puissance,
    Parenthese(char),
    Fn(Fonction),
    Const(Constante),
    Retour,
    Effacer,
    Egal,
}

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Calculatrice Tactile");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("⚙ Réglages").clicked() {
                            self.reglages_ouverts = true;
                        }
                    });
                });
                ui.add_space(6.0);

                self.ui_affichage(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_fonctions(ui);
                ui.add_space(6.0);
                self.ui_pave(ui);
            });
    }

    /// Écran : expression en cours (petit) au-dessus du résultat (grand).
    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let expr = self.calc.expression();
                    let texte = if expr.is_empty() { " " } else { expr };
                    let mut ligne = egui::RichText::new(texte).monospace().size(16.0);
                    // en dehors de la saisie (tampon vide ou fraîchement
                    // validé), la ligne d'expression passe en retrait
                    if self.calc.etat() != Etat::Saisie {
                        ligne = ligne.weak();
                    }
                    ui.label(ligne);
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(self.calc.resultat())
                            .monospace()
                            .size(34.0)
                            .color(self.reglages.couleur()),
                    );
                });
            });
    }

    /// Rangée scientifique : fonctions, constantes, exposant.
    fn ui_fonctions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            self.bouton(ui, "sin", Touche::Fn(Fonction::Sin));
            self.bouton(ui, "cos", Touche::Fn(Fonction::Cos));
            self.bouton(ui, "tan", Touche::Fn(Fonction::Tan));
            self.bouton(ui, "sqrt", Touche::Fn(Fonction::Sqrt));
            self.bouton(ui, "ln", Touche::Fn(Fonction::Ln));
            self.bouton(ui, "log", Touche::Fn(Fonction::Log));

            ui.separator();

            self.bouton(ui, "π", Touche::Const(Constante::Pi));
            self.bouton(ui, "e", Touche::Const(Constante::E));
            self.bouton(ui, "xʸ", Touche::Puissance);
        });
    }

    /// Pavé numérique principal, 4 colonnes.
    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton(ui, "C", Touche::Effacer);
                self.bouton(ui, "(", Touche::Parenthese('('));
                self.bouton(ui, ")", Touche::Parenthese(')'));
                self.bouton(ui, "⌫", Touche::Retour);
                ui.end_row();

                self.bouton(ui, "7", Touche::Chiffre('7'));
                self.bouton(ui, "8", Touche::Chiffre('8'));
                self.bouton(ui, "9", Touche::Chiffre('9'));
                self.bouton(ui, "/", Touche::Op('/'));
                ui.end_row();

                self.bouton(ui, "4", Touche::Chiffre('4'));
                self.bouton(ui, "5", Touche::Chiffre('5'));
                self.bouton(ui, "6", Touche::Chiffre('6'));
                self.bouton(ui, "*", Touche::Op('*'));
                ui.end_row();

                self.bouton(ui, "1", Touche::Chiffre('1'));
                self.bouton(ui, "2", Touche::Chiffre('2'));
                self.bouton(ui, "3", Touche::Chiffre('3'));
                self.bouton(ui, "-", Touche::Op('-'));
                ui.end_row();

                self.bouton(ui, "0", Touche::Chiffre('0'));
                self.bouton(ui, ".", Touche::Point);
                self.bouton(ui, "%", Touche::Op('%'));
                self.bouton(ui, "+", Touche::Op('+'));
                ui.end_row();
            });

        ui.add_space(6.0);

        let eq = ui.add_sized([ui.available_width().min(226.0), 36.0], egui::Button::new("="));
        if eq.clicked() {
            self.appuie(Touche::Egal);
        }
    }

    fn bouton(&mut self, ui: &mut egui::Ui, label: &str, touche: Touche) {
        let resp = ui.add_sized([52.0, 32.0], egui::Button::new(label));
        if resp.clicked() {
            self.appuie(touche);
        }
    }

    /// La seule porte entre l'UI et le noyau : une touche, une commande.
    fn appuie(&mut self, touche: Touche) {
        match touche {
            Touche::Chiffre(d) => self.calc.chiffre(d),
            Touche::Point => self.calc.point(),
            Touche::Op(op) => self.calc.operateur(op),
            Touche::Puissance => self.calc.puissance(),
            Touche::Parenthese(c) => self.calc.parenthese(c),
            Touche::Fn(f) => self.calc.fonction(f),
            Touche::Const(c) => self.calc.constante(c),
            Touche::Retour => self.calc.retour(),
            Touche::Effacer => self.calc.effacer(),
            Touche::Egal => self.calc.egal(),
        }
    }

    /// Clavier physique : route un caractère tapé vers la bonne commande.
    /// Les caractères hors mini-langue sont ignorés.
    pub fn touche_clavier(&mut self, ch: char) {
        match ch {
            '0'..='9' => self.calc.chiffre(ch),
            '.' => self.calc.point(),
            '+' | '-' | '*' | '/' | '%' => self.calc.operateur(ch),
            '^' => self.calc.puissance(),
            '(' | ')' => self.calc.parenthese(ch),
            '=' => self.calc.egal(),
            _ => {}
        }
    }

    /// Fenêtre de réglages (sélecteur de couleur d'accent).
    pub fn ui_reglages(&mut self, ctx: &egui::Context) {
        let mut ouvert = self.reglages_ouverts;

        egui::Window::new("Réglages")
            .open(&mut ouvert)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Couleur d'accent :");
                    let mut c = self.reglages.couleur();
                    if ui.color_edit_button_srgba(&mut c).changed() {
                        self.reglages.set_accent(couleur_vers_hex(c));
                    }
                });

                ui.add_space(4.0);
                if ui.button("Revenir au défaut").clicked() {
                    self.reglages.retour_au_defaut();
                }
            });

        self.reglages_ouverts = ouvert;
    }
}
