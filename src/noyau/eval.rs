// src/noyau/eval.rs
//
// Évaluation numérique (f64) + pipeline complet :
//
//   tokenize -> parse -> eval_ast
//
// L'évaluation est tout-ou-rien : une erreur n'importe où invalide le tampon
// entier, jamais de résultat partiel. Aucune valeur non finie (NaN, ±inf) ne
// sort d'ici : elle devient ErreurDomaine::NonFini.

use std::fmt;

use super::analyse::{parse, ErreurSyntaxe};
use super::expr::{Expr, Fonction, Op};
use super::jetons::{tokenize, ErreurLex};

/// Erreurs de domaine numérique.
#[derive(Clone, Debug, PartialEq)]
pub enum ErreurDomaine {
    DivisionParZero,
    /// Argument hors domaine : √ d'un négatif, ln/log d'un ≤ 0,
    /// base négative avec exposant fractionnaire.
    OperandeInvalide,
    /// Valeur intermédiaire ou finale non finie (NaN, ±inf).
    NonFini,
}

impl fmt::Display for ErreurDomaine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErreurDomaine::DivisionParZero => write!(f, "division par zéro"),
            ErreurDomaine::OperandeInvalide => write!(f, "opérande hors domaine"),
            ErreurDomaine::NonFini => write!(f, "résultat non fini"),
        }
    }
}

impl std::error::Error for ErreurDomaine {}

/// Erreur globale du pipeline, une variante par étage.
#[derive(Clone, Debug, PartialEq)]
pub enum ErreurCalcul {
    Lex(ErreurLex),
    Syntaxe(ErreurSyntaxe),
    Domaine(ErreurDomaine),
}

impl fmt::Display for ErreurCalcul {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErreurCalcul::Lex(e) => write!(f, "{e}"),
            ErreurCalcul::Syntaxe(e) => write!(f, "{e}"),
            ErreurCalcul::Domaine(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ErreurCalcul {}

impl From<ErreurLex> for ErreurCalcul {
    fn from(e: ErreurLex) -> Self {
        ErreurCalcul::Lex(e)
    }
}
impl From<ErreurSyntaxe> for ErreurCalcul {
    fn from(e: ErreurSyntaxe) -> Self {
        ErreurCalcul::Syntaxe(e)
    }
}
impl From<ErreurDomaine> for ErreurCalcul {
    fn from(e: ErreurDomaine) -> Self {
        ErreurCalcul::Domaine(e)
    }
}

/// Évalue un AST.
///
/// Cas particulier hérité de l'application d'origine (substitution textuelle
/// `%` -> `/100`) : `Bin(Percent, a, b)` vaut `eval(a) / 100` et IGNORE `b`,
/// qui n'est même pas évalué. Ainsi `50%10` vaut 0.5. Comportement surprenant
/// mais reproduit volontairement — voir DESIGN.md.
pub fn eval_ast(e: &Expr) -> Result<f64, ErreurDomaine> {
    let v = match e {
        Expr::Num(x) => *x,
        Expr::Const(c) => c.valeur(),

        Expr::Neg(x) => -eval_ast(x)?,

        Expr::Bin(op, a, b) => {
            let va = eval_ast(a)?;
            match op {
                Op::Add => va + eval_ast(b)?,
                Op::Sub => va - eval_ast(b)?,
                Op::Mul => va * eval_ast(b)?,
                Op::Div => {
                    let vb = eval_ast(b)?;
                    if vb == 0.0 {
                        return Err(ErreurDomaine::DivisionParZero);
                    }
                    va / vb
                }
                Op::Percent => va / 100.0,
                Op::Pow => {
                    let vb = eval_ast(b)?;
                    // powf donnerait NaN ; on classe plus précisément
                    if va < 0.0 && vb.fract() != 0.0 {
                        return Err(ErreurDomaine::OperandeInvalide);
                    }
                    va.powf(vb)
                }
            }
        }

        Expr::Call(f, arg) => {
            let x = eval_ast(arg)?;
            match f {
                Fonction::Sin => x.sin(),
                Fonction::Cos => x.cos(),
                Fonction::Tan => x.tan(),
                Fonction::Sqrt => {
                    if x < 0.0 {
                        return Err(ErreurDomaine::OperandeInvalide);
                    }
                    x.sqrt()
                }
                Fonction::Ln => {
                    if x <= 0.0 {
                        return Err(ErreurDomaine::OperandeInvalide);
                    }
                    x.ln()
                }
                Fonction::Log => {
                    if x <= 0.0 {
                        return Err(ErreurDomaine::OperandeInvalide);
                    }
                    x.log10()
                }
            }
        }
    };

    // Contrôle à chaque nœud : aucune valeur non finie ne remonte.
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurDomaine::NonFini)
    }
}

/// API publique : pipeline complet texte -> valeur.
pub fn eval_expression(texte: &str) -> Result<f64, ErreurCalcul> {
    let jetons = tokenize(texte)?;
    let ast = parse(&jetons, texte.chars().count())?;
    let v = eval_ast(&ast)?;
    Ok(v)
}
