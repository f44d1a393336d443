// src/noyau/jetons.rs

use std::fmt;

/// Jeton produit par la tokenisation.
///
/// Le texte d'un nombre est conservé tel quel (la conversion f64 se fait au
/// parse). Les identifiants sont normalisés en minuscules — `SIN(PI)` et
/// `sin(pi)` sont le même texte — et c'est le parse qui décide ensuite si un
/// identifiant est une fonction connue, une constante connue, ou une erreur.
#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(String),
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret, // ^

    LPar,
    RPar,
}

/// Erreur de tokenisation : un seul cas possible, caractère hors alphabet.
/// Alphabet accepté : `[0-9] . + - * / % ^ ( ) a-zA-Z`.
#[derive(Clone, Debug, PartialEq)]
pub enum ErreurLex {
    CaractereInvalide { pos: usize, c: char },
}

impl fmt::Display for ErreurLex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErreurLex::CaractereInvalide { pos, c } => {
                write!(f, "caractère inattendu: '{c}' (position {pos})")
            }
        }
    }
}

impl std::error::Error for ErreurLex {}

/// Tokenize une chaîne en jetons, chacun avec sa position de départ.
///
/// - chiffres et points consécutifs fusionnent en UN jeton Num (gourmand) ;
/// - lettres consécutives fusionnent en UN jeton Ident (minuscules) ;
/// - les espaces sont ignorés (défense en profondeur : la machine à états ne
///   produit jamais d'espace, mais l'API pipeline reste appelable à la main).
pub fn tokenize(s: &str) -> Result<Vec<(Tok, usize)>, ErreurLex> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Opérateurs et parenthèses : un caractère, un jeton.
        let simple = match c {
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '%' => Some(Tok::Percent),
            '^' => Some(Tok::Caret),
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            _ => None,
        };
        if let Some(tok) = simple {
            out.push((tok, i));
            i += 1;
            continue;
        }

        // Nombre : plus longue suite de chiffres/points.
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let texte: String = chars[start..i].iter().collect();
            out.push((Tok::Num(texte), start));
            continue;
        }

        // Identifiant : plus longue suite de lettres ASCII, en minuscules.
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();
            out.push((Tok::Ident(mot.to_lowercase()), start));
            continue;
        }

        return Err(ErreurLex::CaractereInvalide { pos: i, c });
    }

    Ok(out)
}
