//! Noyau calcul — pipeline sûr (jamais d'exécution de code construit)
//!
//! Organisation interne :
//! - jetons.rs    : tokenisation (texte -> jetons positionnés)
//! - expr.rs      : AST + fonctions/constantes connues
//! - analyse.rs   : descente récursive (jetons -> AST)
//! - eval.rs      : évaluation f64 + pipeline complet
//! - format.rs    : arrondi 10 décimales + texte canonique
//! - machine.rs   : machine à états de saisie (la surface de commandes)
//! - diffusion.rs : publication (expression, résultat) vers l'UI

pub mod analyse;
pub mod diffusion;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod machine;

#[cfg(test)]
mod tests_scenarios;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::eval_expression;
pub use expr::{Constante, Fonction};
pub use machine::{Calculatrice, Config, Etat, RetourHaptique};
