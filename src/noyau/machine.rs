// src/noyau/machine.rs
//
// Machine à états de saisie : l'unique propriétaire du tampon d'expression.
// Une commande = une transition complète (mutation -> évaluation souple ->
// diffusion), exécutée d'un trait, sans point de suspension.
//
// Contrat d'usage volontairement asymétrique :
// - pendant la frappe, toute évaluation qui échoue est SILENCIEUSE (le
//   résultat affiché reste le précédent) ;
// - `egal()` sur un tampon invalide est un no-op VISIBLE (rien ne bouge,
//   l'absence de réaction est le signal d'invalidité).

use super::diffusion::Diffuseur;
use super::eval::eval_expression;
use super::expr::{Constante, Fonction};
use super::format::format_resultat;

/// Retour tactile, consommé mais jamais implémenté par le noyau.
/// Meilleur effort : l'implémentation ne doit ni échouer ni bloquer.
pub trait RetourHaptique {
    /// `forte` = impulsion appuyée (utilisée pour `=`), sinon légère.
    fn impulsion(&mut self, forte: bool);
}

/// Valeurs par défaut explicites, passées à la construction.
/// Pas d'état global : deux calculatrices peuvent coexister.
#[derive(Clone, Debug)]
pub struct Config {
    /// Texte de résultat au démarrage et après `effacer()`.
    pub resultat_initial: String,
    /// Couleur d'accent par défaut (consommée par le rendu, jamais par le calcul).
    pub accent_defaut: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resultat_initial: "0".to_string(),
            accent_defaut: "#3880ff".to_string(),
        }
    }
}

/// États observables de la saisie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Etat {
    /// Tampon vide.
    Vide,
    /// Tampon non vide, pas encore validé.
    Saisie,
    /// Juste après un `=` réussi, avant toute autre édition.
    Valide,
}

pub struct Calculatrice {
    tampon: String,
    resultat: String,
    vient_de_valider: bool,
    config: Config,
    diffuseur: Diffuseur,
    haptique: Option<Box<dyn RetourHaptique>>,
}

fn est_operateur(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%' | '^')
}

impl Default for Calculatrice {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Calculatrice {
    pub fn new(config: Config) -> Self {
        Self {
            tampon: String::new(),
            resultat: config.resultat_initial.clone(),
            vient_de_valider: false,
            config,
            diffuseur: Diffuseur::new(),
            haptique: None,
        }
    }

    /* ------------------------ Observation ------------------------ */

    /// Texte d'expression courant (seule source de vérité pour l'affichage).
    pub fn expression(&self) -> &str {
        &self.tampon
    }

    /// Dernier résultat calculable (texte déjà formaté).
    pub fn resultat(&self) -> &str {
        &self.resultat
    }

    pub fn etat(&self) -> Etat {
        if self.vient_de_valider {
            Etat::Valide
        } else if self.tampon.is_empty() {
            Etat::Vide
        } else {
            Etat::Saisie
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Abonne un observateur aux paires (expression, résultat) futures.
    /// L'état courant se lit par `expression()` / `resultat()` (les composants
    /// d'UI se montent après coup).
    pub fn abonner(&mut self, f: impl FnMut(&str, &str) + 'static) {
        self.diffuseur.abonner(f);
    }

    /// Installe le retour tactile (aucun par défaut).
    pub fn brancher_haptique(&mut self, h: impl RetourHaptique + 'static) {
        self.haptique = Some(Box::new(h));
    }

    /* ------------------------ Commandes ------------------------ */

    /// Ajoute un chiffre. Après un `=`, repart d'un tampon vierge.
    pub fn chiffre(&mut self, d: char) {
        if !d.is_ascii_digit() {
            return;
        }
        self.impulsion(false);
        let avant = self.instantane();

        if self.vient_de_valider {
            self.tampon.clear();
            self.resultat = self.config.resultat_initial.clone();
            self.vient_de_valider = false;
        }
        self.tampon.push(d);
        self.eval_souple();

        self.diffuse_si_change(avant);
    }

    /// Ajoute un point décimal, au plus un par segment numérique.
    /// Sur segment vide, insère "0." (confort hérité de l'app d'origine).
    /// N'évalue pas : un point final n'est pas censé se lire.
    pub fn point(&mut self) {
        self.impulsion(false);
        let avant = self.instantane();

        let segment = self.segment_numerique();
        if segment.contains('.') {
            return;
        }
        if segment.is_empty() {
            self.tampon.push_str("0.");
        } else {
            self.tampon.push('.');
        }

        self.diffuse_si_change(avant);
    }

    /// Ajoute un opérateur binaire.
    /// - tampon vide + `+`/`-` : signe en tête, accepté tel quel ;
    /// - tampon finissant par un opérateur : REMPLACÉ, jamais empilé ;
    /// - lève le drapeau "validé" sans vider le tampon (enchaînement sur un
    ///   résultat précédent).
    /// N'évalue pas : un tampon finissant par un opérateur est incomplet
    /// par construction.
    pub fn operateur(&mut self, op: char) {
        if !est_operateur(op) {
            return;
        }
        self.impulsion(false);
        let avant = self.instantane();

        if self.tampon.is_empty() && (op == '+' || op == '-') {
            self.tampon.push(op);
            self.diffuse_si_change(avant);
            return;
        }

        if self.tampon.ends_with(est_operateur) {
            self.tampon.pop();
        }
        self.tampon.push(op);
        self.vient_de_valider = false;

        self.diffuse_si_change(avant);
    }

    /// Sucre pour `operateur('^')`.
    pub fn puissance(&mut self) {
        self.operateur('^');
    }

    /// Ajoute `(` ou `)` sans contrôle d'appariement : un tampon déséquilibré
    /// échoue simplement (et silencieusement) à l'évaluation souple.
    pub fn parenthese(&mut self, c: char) {
        if c != '(' && c != ')' {
            return;
        }
        self.impulsion(false);
        let avant = self.instantane();

        self.tampon.push(c);
        self.vient_de_valider = false;
        self.eval_souple();

        self.diffuse_si_change(avant);
    }

    /// Ajoute `nom(` — ouvre toujours un appel. N'évalue pas (l'argument est
    /// forcément incomplet).
    pub fn fonction(&mut self, f: Fonction) {
        self.impulsion(false);
        let avant = self.instantane();

        self.tampon.push_str(f.nom());
        self.tampon.push('(');

        self.diffuse_si_change(avant);
    }

    /// Ajoute le nom d'une constante, puis tente une lecture.
    pub fn constante(&mut self, c: Constante) {
        self.impulsion(false);
        let avant = self.instantane();

        self.tampon.push_str(c.nom());
        self.eval_souple();

        self.diffuse_si_change(avant);
    }

    /// Efface le dernier caractère (no-op sur tampon vide, n'échoue jamais).
    pub fn retour(&mut self) {
        self.impulsion(false);
        let avant = self.instantane();

        self.tampon.pop();
        self.eval_souple();

        self.diffuse_si_change(avant);
    }

    /// Remise à zéro : tampon vide, résultat initial, état `Vide`.
    pub fn effacer(&mut self) {
        self.impulsion(false);
        let avant = self.instantane();

        self.tampon.clear();
        self.resultat = self.config.resultat_initial.clone();
        self.vient_de_valider = false;

        self.diffuse_si_change(avant);
    }

    /// Valide le tampon. Succès : le texte formaté du résultat REMPLACE le
    /// tampon (le prochain chiffre repart de zéro) et le drapeau "validé" est
    /// levé. Échec : rien ne bouge, le no-op est le signal.
    pub fn egal(&mut self) {
        self.impulsion(true);
        let avant = self.instantane();

        if self.tampon.is_empty() || self.tampon.ends_with(est_operateur) {
            return;
        }

        match eval_expression(&self.tampon) {
            Ok(v) => {
                let texte = format_resultat(v);
                self.tampon = texte.clone();
                self.resultat = texte;
                self.vient_de_valider = true;
            }
            Err(e) => {
                log::debug!("égal refusé sur {:?}: {e}", self.tampon);
            }
        }

        self.diffuse_si_change(avant);
    }

    /* ------------------------ Interne ------------------------ */

    /// Évaluation "souple" : meilleure lecture possible du tampon courant.
    /// Tout échec laisse le résultat précédent en place. Le tampon vide
    /// republie le résultat initial ; un opérateur final n'est même pas
    /// soumis au pipeline.
    fn eval_souple(&mut self) {
        if self.tampon.is_empty() {
            self.resultat = self.config.resultat_initial.clone();
            return;
        }
        if self.tampon.ends_with(est_operateur) {
            return;
        }
        if let Ok(v) = eval_expression(&self.tampon) {
            self.resultat = format_resultat(v);
        }
    }

    /// Plus long suffixe du tampon fait de chiffres et de points :
    /// le segment numérique en cours de frappe.
    fn segment_numerique(&self) -> &str {
        self.tampon
            .split(|c: char| !c.is_ascii_digit() && c != '.')
            .next_back()
            .unwrap_or("")
    }

    fn impulsion(&mut self, forte: bool) {
        if let Some(h) = self.haptique.as_mut() {
            h.impulsion(forte);
        }
    }

    fn instantane(&self) -> (String, String) {
        (self.tampon.clone(), self.resultat.clone())
    }

    /// Diffuse la paire courante si la commande a changé quelque chose.
    fn diffuse_si_change(&mut self, avant: (String, String)) {
        if avant.0 != self.tampon || avant.1 != self.resultat {
            self.diffuseur.publier(&self.tampon, &self.resultat);
        }
    }
}
