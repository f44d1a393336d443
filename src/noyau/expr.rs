// src/noyau/expr.rs
//
// AST du noyau : arbre possédé exclusivement (Box), pas de partage, pas de
// cycle. Le domaine numérique est f64 de bout en bout.

/// Opérateur binaire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    /// `%` : héritage de l'application d'origine — divise l'opérande GAUCHE
    /// par 100 et ignore l'opérande droite (voir eval.rs pour le détail).
    Percent,
    /// `^` : associatif à droite.
    Pow,
}

/// Fonctions unaires connues. Trig en radians ; `Log` = base 10, `Ln` = népérien.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Ln,
    Log,
}

impl Fonction {
    /// Nom minuscule -> fonction connue. None si inconnu.
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        match nom {
            "sin" => Some(Fonction::Sin),
            "cos" => Some(Fonction::Cos),
            "tan" => Some(Fonction::Tan),
            "sqrt" => Some(Fonction::Sqrt),
            "ln" => Some(Fonction::Ln),
            "log" => Some(Fonction::Log),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Sqrt => "sqrt",
            Fonction::Ln => "ln",
            Fonction::Log => "log",
        }
    }
}

/// Constantes connues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn depuis_nom(nom: &str) -> Option<Constante> {
        match nom {
            "pi" => Some(Constante::Pi),
            "e" => Some(Constante::E),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Constante::Pi => "pi",
            Constante::E => "e",
        }
    }

    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => std::f64::consts::PI,
            Constante::E => std::f64::consts::E,
        }
    }
}

/// Nœud d'expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Const(Constante),
    Neg(Box<Expr>),
    Bin(Op, Box<Expr>, Box<Expr>),
    Call(Fonction, Box<Expr>),
}
