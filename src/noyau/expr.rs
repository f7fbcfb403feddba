// src/noyau/expr.rs
//
// AST exact (sans flottants).
// - Lit : rationnel exact (tout littéral décimal tient exactement)
// - Neg : moins unaire
// - Bin : opérateur binaire + deux enfants possédés
//
// Display produit la forme canonique : entièrement parenthésée, relisible
// par tokenize + parse en un arbre structurellement égal.
//
// Une chaîne "1-1-1-…" donne un arbre aussi haut que la moitié de l’entrée :
// tout parcours (affichage, égalité, destruction) se fait avec une pile explicite,
// jamais par récursion.

use std::fmt;
use std::mem;

use num_rational::BigRational;
use num_traits::{Signed, Zero};

use super::format::decimal_exact;
use super::jetons::Op;

#[derive(Debug)]
pub enum Expr {
    Lit(BigRational),
    Neg(Box<Expr>),
    Bin(Op, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn lit(r: BigRational) -> Expr {
        Expr::Lit(r)
    }

    pub fn neg(e: Expr) -> Expr {
        Expr::Neg(Box::new(e))
    }

    pub fn bin(op: Op, a: Expr, b: Expr) -> Expr {
        Expr::Bin(op, Box::new(a), Box::new(b))
    }

    /// Hauteur de l’arbre (une feuille vaut 1). Itératif : sûr même sur un arbre profond.
    pub fn hauteur(&self) -> usize {
        let mut max = 0;
        let mut pile: Vec<(&Expr, usize)> = vec![(self, 1)];

        while let Some((e, h)) = pile.pop() {
            max = max.max(h);
            match e {
                Expr::Lit(_) => {}
                Expr::Neg(x) => pile.push((x.as_ref(), h + 1)),
                Expr::Bin(_, a, b) => {
                    pile.push((a.as_ref(), h + 1));
                    pile.push((b.as_ref(), h + 1));
                }
            }
        }
        max
    }
}

fn format_lit(r: &BigRational, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // Un littéral issu du parse est toujours décimal fini et positif.
    // Les autres (construits à la main) restent relisibles, pas forcément en Lit.
    let txt = decimal_exact(&r.abs())
        .unwrap_or_else(|| format!("({} / {})", r.numer().abs(), r.denom()));
    if r.is_negative() {
        write!(f, "-{txt}")
    } else {
        write!(f, "{txt}")
    }
}

enum Morceau<'a> {
    Noeud(&'a Expr),
    Texte(&'static str),
    Op(Op),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pile = vec![Morceau::Noeud(self)];

        while let Some(m) = pile.pop() {
            match m {
                Morceau::Texte(t) => f.write_str(t)?,
                Morceau::Op(op) => write!(f, " {op} ")?,
                Morceau::Noeud(Expr::Lit(r)) => format_lit(r, f)?,
                Morceau::Noeud(Expr::Neg(x)) => {
                    pile.push(Morceau::Noeud(x.as_ref()));
                    pile.push(Morceau::Texte("-"));
                }
                Morceau::Noeud(Expr::Bin(op, a, b)) => {
                    // empilé à l’envers : "(" a op b ")"
                    pile.push(Morceau::Texte(")"));
                    pile.push(Morceau::Noeud(b.as_ref()));
                    pile.push(Morceau::Op(*op));
                    pile.push(Morceau::Noeud(a.as_ref()));
                    pile.push(Morceau::Texte("("));
                }
            }
        }
        Ok(())
    }
}

impl PartialEq for Expr {
    fn eq(&self, autre: &Expr) -> bool {
        let mut pile: Vec<(&Expr, &Expr)> = vec![(self, autre)];

        while let Some(paire) = pile.pop() {
            match paire {
                (Expr::Lit(a), Expr::Lit(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Expr::Neg(a), Expr::Neg(b)) => pile.push((a.as_ref(), b.as_ref())),
                (Expr::Bin(o1, a1, b1), Expr::Bin(o2, a2, b2)) => {
                    if o1 != o2 {
                        return false;
                    }
                    pile.push((a1.as_ref(), a2.as_ref()));
                    pile.push((b1.as_ref(), b2.as_ref()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Expr {}

/// Feuille sans allocation, laissée à la place d’un enfant détaché.
fn feuille_vide() -> Expr {
    Expr::Lit(BigRational::zero())
}

/// Détache les enfants de `e` vers `pile` (ils ne seront plus détruits récursivement).
fn detacher(e: &mut Expr, pile: &mut Vec<Expr>) {
    match e {
        Expr::Lit(_) => {}
        Expr::Neg(x) => pile.push(mem::replace(x.as_mut(), feuille_vide())),
        Expr::Bin(_, a, b) => {
            pile.push(mem::replace(a.as_mut(), feuille_vide()));
            pile.push(mem::replace(b.as_mut(), feuille_vide()));
        }
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pile = Vec::new();
        detacher(self, &mut pile);
        while let Some(mut e) = pile.pop() {
            detacher(&mut e, &mut pile);
            // `e` tombe ici : ses enfants sont des feuilles.
        }
    }
}
