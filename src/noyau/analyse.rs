// src/noyau/analyse.rs
//
// Analyse syntaxique : descente récursive sur la grammaire suivante
// (précédence croissante ; `^` associatif à droite, le reste à gauche) :
//
//   expr   := term (('+'|'-') term)*
//   term   := power (('*'|'/'|'%') power)*
//   power  := unary ('^' power)?
//   unary  := '-' unary | atom
//   atom   := NOMBRE | CONSTANTE | FONCTION '(' expr ')' | '(' expr ')'
//
// Chaque échec porte la position du caractère fautif dans le texte d'origine.
// Un '+' en tête de tampon est toléré par la machine à états (signe en
// attente) mais n'appartient PAS à la grammaire : il échoue ici, en silence
// côté évaluation souple.

use std::fmt;

use super::expr::{Constante, Expr, Fonction, Op};
use super::jetons::Tok;

/// Erreurs de syntaxe, une par condition d'échec distincte.
#[derive(Clone, Debug, PartialEq)]
pub enum ErreurSyntaxe {
    /// Aucun jeton (la machine à états intercepte ce cas avant le parse ;
    /// le pipeline brut peut quand même le rencontrer).
    EntreeVide,
    /// Fin d'entrée alors qu'une opérande était attendue ("5+", "sqrt(").
    OperateurFinal(usize),
    /// '(' jamais fermée, ou ')' sans ouvrante.
    ParentheseNonAppariee(usize),
    /// Identifiant qui n'est ni une fonction ni une constante connue.
    IdentifiantInconnu { pos: usize, nom: String },
    /// Opérande attendue, autre chose trouvé ("**", "()", "sqrt()").
    OperandeVide(usize),
    /// Littéral numérique non convertible en f64 ("1.2.3").
    /// Inatteignable via la surface de commandes (point() borne les points),
    /// mais le pipeline brut accepte du texte arbitraire.
    NombreInvalide(usize),
}

impl fmt::Display for ErreurSyntaxe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErreurSyntaxe::EntreeVide => write!(f, "entrée vide"),
            ErreurSyntaxe::OperateurFinal(pos) => {
                write!(f, "opérande manquante en fin d'expression (position {pos})")
            }
            ErreurSyntaxe::ParentheseNonAppariee(pos) => {
                write!(f, "parenthèse non appariée (position {pos})")
            }
            ErreurSyntaxe::IdentifiantInconnu { pos, nom } => {
                write!(f, "identifiant inconnu: {nom:?} (position {pos})")
            }
            ErreurSyntaxe::OperandeVide(pos) => {
                write!(f, "opérande attendue (position {pos})")
            }
            ErreurSyntaxe::NombreInvalide(pos) => {
                write!(f, "nombre invalide (position {pos})")
            }
        }
    }
}

impl std::error::Error for ErreurSyntaxe {}

/// Construit l'AST d'une suite de jetons.
///
/// `fin` = longueur (en caractères) du texte d'origine, pour positionner les
/// erreurs "fin d'entrée".
pub fn parse(jetons: &[(Tok, usize)], fin: usize) -> Result<Expr, ErreurSyntaxe> {
    if jetons.is_empty() {
        return Err(ErreurSyntaxe::EntreeVide);
    }

    let mut a = Analyseur { jetons, i: 0, fin };
    let e = a.expr()?;

    // Jetons restants = expression mal terminée ("1)2", "(1)(2)").
    if let Some((tok, pos)) = a.courant() {
        return Err(match tok {
            Tok::RPar => ErreurSyntaxe::ParentheseNonAppariee(pos),
            _ => ErreurSyntaxe::OperandeVide(pos),
        });
    }

    Ok(e)
}

struct Analyseur<'a> {
    jetons: &'a [(Tok, usize)],
    i: usize,
    fin: usize,
}

impl Analyseur<'_> {
    fn courant(&self) -> Option<(&Tok, usize)> {
        self.jetons.get(self.i).map(|(t, p)| (t, *p))
    }

    fn avance(&mut self) {
        self.i += 1;
    }

    // expr := term (('+'|'-') term)*
    fn expr(&mut self) -> Result<Expr, ErreurSyntaxe> {
        let mut gauche = self.term()?;
        while let Some((tok, _)) = self.courant() {
            let op = match tok {
                Tok::Plus => Op::Add,
                Tok::Minus => Op::Sub,
                _ => break,
            };
            self.avance();
            let droite = self.term()?;
            gauche = Expr::Bin(op, Box::new(gauche), Box::new(droite));
        }
        Ok(gauche)
    }

    // term := power (('*'|'/'|'%') power)*
    fn term(&mut self) -> Result<Expr, ErreurSyntaxe> {
        let mut gauche = self.power()?;
        while let Some((tok, _)) = self.courant() {
            let op = match tok {
                Tok::Star => Op::Mul,
                Tok::Slash => Op::Div,
                Tok::Percent => Op::Percent,
                _ => break,
            };
            self.avance();
            let droite = self.power()?;
            gauche = Expr::Bin(op, Box::new(gauche), Box::new(droite));
        }
        Ok(gauche)
    }

    // power := unary ('^' power)?   — associatif à droite
    fn power(&mut self) -> Result<Expr, ErreurSyntaxe> {
        let base = self.unary()?;
        if let Some((Tok::Caret, _)) = self.courant() {
            self.avance();
            let exposant = self.power()?;
            return Ok(Expr::Bin(Op::Pow, Box::new(base), Box::new(exposant)));
        }
        Ok(base)
    }

    // unary := '-' unary | atom
    fn unary(&mut self) -> Result<Expr, ErreurSyntaxe> {
        if let Some((Tok::Minus, _)) = self.courant() {
            self.avance();
            let x = self.unary()?;
            return Ok(Expr::Neg(Box::new(x)));
        }
        self.atom()
    }

    // atom := NOMBRE | CONSTANTE | FONCTION '(' expr ')' | '(' expr ')'
    fn atom(&mut self) -> Result<Expr, ErreurSyntaxe> {
        let Some((tok, pos)) = self.courant() else {
            // fin d'entrée là où une opérande était attendue : le jeton
            // précédent est forcément un opérateur (ou une '(' ouvrante)
            return Err(ErreurSyntaxe::OperateurFinal(self.fin));
        };

        match tok {
            Tok::Num(texte) => {
                let v: f64 = texte
                    .parse()
                    .map_err(|_| ErreurSyntaxe::NombreInvalide(pos))?;
                self.avance();
                Ok(Expr::Num(v))
            }

            Tok::Ident(nom) => {
                if let Some(f) = Fonction::depuis_nom(nom) {
                    self.avance();
                    return self.appel_fonction(f, pos);
                }
                if let Some(c) = Constante::depuis_nom(nom) {
                    self.avance();
                    return Ok(Expr::Const(c));
                }
                Err(ErreurSyntaxe::IdentifiantInconnu {
                    pos,
                    nom: nom.clone(),
                })
            }

            Tok::LPar => {
                self.avance();
                let e = self.expr()?;
                self.attend_fermante(pos)?;
                Ok(e)
            }

            // ')' ou opérateur là où une opérande était attendue
            // ("()", "sqrt()", "**", "5*/2", '+' en tête).
            Tok::RPar | Tok::Plus | Tok::Star | Tok::Slash | Tok::Percent | Tok::Caret => {
                Err(ErreurSyntaxe::OperandeVide(pos))
            }

            // Minus est consommé par unary() : ne peut pas arriver ici.
            Tok::Minus => Err(ErreurSyntaxe::OperandeVide(pos)),
        }
    }

    // FONCTION '(' expr ')'  — le nom est déjà consommé.
    fn appel_fonction(&mut self, f: Fonction, pos_nom: usize) -> Result<Expr, ErreurSyntaxe> {
        match self.courant() {
            Some((Tok::LPar, pos_par)) => {
                self.avance();
                let arg = self.expr()?;
                self.attend_fermante(pos_par)?;
                Ok(Expr::Call(f, Box::new(arg)))
            }
            // "sqrt2" : la grammaire exige '(' après un nom de fonction
            Some((_, pos)) => Err(ErreurSyntaxe::OperandeVide(pos)),
            None => Err(ErreurSyntaxe::OperateurFinal(pos_nom)),
        }
    }

    /// Consomme la ')' attendue ; sinon, erreur positionnée sur la '(' ouvrante.
    fn attend_fermante(&mut self, pos_ouvrante: usize) -> Result<(), ErreurSyntaxe> {
        match self.courant() {
            Some((Tok::RPar, _)) => {
                self.avance();
                Ok(())
            }
            _ => Err(ErreurSyntaxe::ParentheseNonAppariee(pos_ouvrante)),
        }
    }
}
