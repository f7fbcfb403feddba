// src/noyau/syntaxe.rs
//
// Descente récursive (une règle par niveau de précédence) :
//
//   expression := terme (('+' | '-') terme)*
//   terme      := facteur (('*' | '/' | '%') facteur)*
//   facteur    := NOMBRE | '-' facteur | '(' expression ')'
//
// Règles:
// - associativité à gauche pour tous les binaires (boucles, pas de récursion)
// - moins unaire plus fort que tout binaire : "-3 * -(2+1)"
// - pas de plus unaire : "2++3" est refusé
// - pas de multiplication implicite : "2(3+4)" est refusé (grammaire sans ambiguïté)
// - imbrication ( '(' et '-' unaire ) bornée par profondeur_max

use super::erreur::ErreurCalcul;
use super::expr::Expr;
use super::format::decimal_exact;
use super::jetons::{Jeton, Op, Tok};

// Filet si la suite ne se termine pas par Tok::Fin (tokenize en met toujours un).
static FIN: Tok = Tok::Fin;

struct Parseur<'a> {
    jetons: &'a [Jeton],
    i: usize,
    profondeur: usize,
    profondeur_max: usize,
}

/// Construit l’AST. Tous les jetons doivent être consommés (jusqu’à `Tok::Fin`).
pub fn parse(jetons: &[Jeton], profondeur_max: usize) -> Result<Expr, ErreurCalcul> {
    let mut p = Parseur {
        jetons,
        i: 0,
        profondeur: 0,
        profondeur_max,
    };

    if matches!(p.courant(), Tok::Fin) {
        return Err(ErreurCalcul::syntaxe("entrée vide", p.position()));
    }

    let e = p.expression()?;

    match p.courant() {
        Tok::Fin => Ok(e),
        Tok::RPar => Err(ErreurCalcul::syntaxe(
            "parenthèse fermante sans ouvrante",
            p.position(),
        )),
        Tok::LPar | Tok::Num(_) => Err(ErreurCalcul::syntaxe(
            format!(
                "entrée en trop « {} » (multiplication implicite non supportée, utiliser *)",
                decrire(p.courant())
            ),
            p.position(),
        )),
        autre => Err(ErreurCalcul::syntaxe(
            format!("entrée en trop « {} »", decrire(autre)),
            p.position(),
        )),
    }
}

fn decrire(t: &Tok) -> String {
    match t {
        // Littéral tel que tapé (toujours décimal fini en sortie de tokenize).
        Tok::Num(r) => decimal_exact(r).unwrap_or_else(|| r.to_string()),
        Tok::Op(op) => op.to_string(),
        Tok::LPar => "(".into(),
        Tok::RPar => ")".into(),
        Tok::Fin => "fin".into(),
    }
}

impl<'a> Parseur<'a> {
    fn courant(&self) -> &'a Tok {
        self.jetons.get(self.i).map_or(&FIN, |j| &j.tok)
    }

    fn position(&self) -> usize {
        self.jetons
            .get(self.i)
            .or_else(|| self.jetons.last())
            .map_or(0, |j| j.pos)
    }

    fn avancer(&mut self) {
        self.i += 1;
    }

    fn entrer(&mut self) -> Result<(), ErreurCalcul> {
        self.profondeur += 1;
        if self.profondeur > self.profondeur_max {
            return Err(ErreurCalcul::syntaxe(
                format!("imbrication trop profonde (max {})", self.profondeur_max),
                self.position(),
            ));
        }
        Ok(())
    }

    fn sortir(&mut self) {
        self.profondeur -= 1;
    }

    fn expression(&mut self) -> Result<Expr, ErreurCalcul> {
        let mut gauche = self.terme()?;

        while let Tok::Op(op @ (Op::Plus | Op::Moins)) = self.courant() {
            let op = *op;
            self.avancer();
            let droite = self.terme()?;
            gauche = Expr::bin(op, gauche, droite);
        }

        Ok(gauche)
    }

    fn terme(&mut self) -> Result<Expr, ErreurCalcul> {
        let mut gauche = self.facteur()?;

        while let Tok::Op(op @ (Op::Fois | Op::Div | Op::Reste)) = self.courant() {
            let op = *op;
            self.avancer();
            let droite = self.facteur()?;
            gauche = Expr::bin(op, gauche, droite);
        }

        Ok(gauche)
    }

    fn facteur(&mut self) -> Result<Expr, ErreurCalcul> {
        match self.courant() {
            Tok::Num(r) => {
                let e = Expr::lit(r.clone());
                self.avancer();
                Ok(e)
            }

            Tok::Op(Op::Moins) => {
                self.entrer()?;
                self.avancer();
                let x = self.facteur()?;
                self.sortir();
                Ok(Expr::neg(x))
            }

            Tok::LPar => {
                self.entrer()?;
                let ouvrante = self.position();
                self.avancer();
                let e = self.expression()?;

                match self.courant() {
                    Tok::RPar => self.avancer(),
                    Tok::Fin => {
                        return Err(ErreurCalcul::syntaxe(
                            format!("parenthèse ouverte en position {ouvrante} jamais fermée"),
                            self.position(),
                        ))
                    }
                    autre => {
                        return Err(ErreurCalcul::syntaxe(
                            format!("« ) » attendue, trouvé « {} »", decrire(autre)),
                            self.position(),
                        ))
                    }
                }

                self.sortir();
                Ok(e)
            }

            Tok::Fin => Err(ErreurCalcul::syntaxe(
                "opérande manquant en fin d’expression",
                self.position(),
            )),

            autre => Err(ErreurCalcul::syntaxe(
                format!("opérande attendu, trouvé « {} »", decrire(autre)),
                self.position(),
            )),
        }
    }
}
