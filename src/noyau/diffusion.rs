// src/noyau/diffusion.rs
//
// Diffusion (expression, résultat) vers les observateurs externes (UI).
// Contrat : livraison synchrone, dans l'ordre d'abonnement, de l'état le plus
// récent. Un abonné tardif ne reçoit que les changements futurs ; pour l'état
// courant, la machine expose des accesseurs synchrones (expression(),
// resultat()).

/// Abonné : rappel `(expression, resultat)`.
pub type Abonne = Box<dyn FnMut(&str, &str)>;

#[derive(Default)]
pub struct Diffuseur {
    abonnes: Vec<Abonne>,
}

impl Diffuseur {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enregistre un abonné. Les abonnés sont appelés dans l'ordre
    /// d'enregistrement, jamais retirés (durée de vie = la calculatrice).
    pub fn abonner(&mut self, f: impl FnMut(&str, &str) + 'static) {
        self.abonnes.push(Box::new(f));
    }

    /// Publie une paire à tous les abonnés, séquentiellement.
    pub fn publier(&mut self, expression: &str, resultat: &str) {
        for abonne in &mut self.abonnes {
            abonne(expression, resultat);
        }
    }
}
