//! src/app/reglages.rs
//!
//! Réglages utilisateur (pour l'instant : la couleur d'accent, seule).
//!
//! Rôle : fournir la couleur d'accent au rendu — et RIEN au calcul, qui ne la
//! voit jamais. La valeur est un texte "#rrggbb" (format hérité de l'app
//! d'origine), converti vers egui à l'affichage et persisté tel quel via
//! eframe::Storage.

use eframe::egui;

/// Clé de persistance (eframe::Storage).
pub const CLE_ACCENT: &str = "couleur_accent";

#[derive(Clone, Debug)]
pub struct Reglages {
    accent: String,
    defaut: String,
}

impl Reglages {
    /// `defaut` vient de la Config explicite de la calculatrice,
    /// `memorise` de la persistance (None au premier lancement).
    pub fn new(defaut: &str, memorise: Option<String>) -> Self {
        let accent = match memorise {
            // on ne restaure qu'un hex valide (stockage corrompu => défaut)
            Some(hex) if hex_vers_couleur(&hex).is_some() => hex,
            _ => defaut.to_string(),
        };
        Self {
            accent,
            defaut: defaut.to_string(),
        }
    }

    /// Couleur d'accent courante, en texte "#rrggbb".
    pub fn accent(&self) -> &str {
        &self.accent
    }

    pub fn set_accent(&mut self, hex: impl Into<String>) {
        let hex = hex.into();
        if hex_vers_couleur(&hex).is_some() {
            self.accent = hex;
        }
    }

    pub fn retour_au_defaut(&mut self) {
        self.accent = self.defaut.clone();
    }

    /// Couleur d'accent pour egui (le défaut est toujours valide).
    pub fn couleur(&self) -> egui::Color32 {
        hex_vers_couleur(&self.accent)
            .or_else(|| hex_vers_couleur(&self.defaut))
            .unwrap_or(egui::Color32::LIGHT_BLUE)
    }
}

/// "#rrggbb" -> Color32. None si le texte n'a pas cette forme.
pub fn hex_vers_couleur(hex: &str) -> Option<egui::Color32> {
    let reste = hex.strip_prefix('#')?;
    if reste.len() != 6 || !reste.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&reste[0..2], 16).ok()?;
    let g = u8::from_str_radix(&reste[2..4], 16).ok()?;
    let b = u8::from_str_radix(&reste[4..6], 16).ok()?;
    Some(egui::Color32::from_rgb(r, g, b))
}

/// Color32 -> "#rrggbb" (pour la persistance après le sélecteur egui).
pub fn couleur_vers_hex(c: egui::Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b())
}
