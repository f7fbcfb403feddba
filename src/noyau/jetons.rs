// src/noyau/jetons.rs

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;

use super::erreur::ErreurCalcul;
use super::format::decimal_exact;

/// Opérateurs binaires (le moins sert aussi de moins unaire).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Plus,
    Moins,
    Fois,
    Div,
    Reste, // %
}

impl Op {
    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Moins => '-',
            Op::Fois => '*',
            Op::Div => '/',
            Op::Reste => '%',
        }
    }

    /// Reconnaît un opérateur, y compris les glyphes des boutons (× ÷).
    fn depuis_char(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Plus),
            '-' => Some(Op::Moins),
            '*' | '×' => Some(Op::Fois),
            '/' | '÷' => Some(Op::Div),
            '%' => Some(Op::Reste),
            _ => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbole())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    Num(BigRational),
    Op(Op),
    LPar,
    RPar,
    Fin,
}

/// Jeton + position (index de caractère, pas d’octet) dans l’entrée.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Jeton {
    pub tok: Tok,
    pub pos: usize,
}

impl Jeton {
    fn new(tok: Tok, pos: usize) -> Self {
        Self { tok, pos }
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (12, 3.5, .5, 5.) : au plus un point
/// - opérateurs + - * / % (et × ÷ des boutons)
/// - parenthèses ( )
///
/// Le dernier jeton est toujours `Tok::Fin`, positionné en fin d’entrée.
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, ErreurCalcul> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c == '(' {
            out.push(Jeton::new(Tok::LPar, i));
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Jeton::new(Tok::RPar, i));
            i += 1;
            continue;
        }

        if let Some(op) = Op::depuis_char(c) {
            out.push(Jeton::new(Tok::Op(op), i));
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let litteral: String = chars[start..i].iter().collect();
            let r = lire_nombre(&litteral, start)?;
            out.push(Jeton::new(Tok::Num(r), start));
            continue;
        }

        return Err(ErreurCalcul::lexicale(c, i, "caractère inattendu"));
    }

    out.push(Jeton::new(Tok::Fin, chars.len()));
    Ok(out)
}

/// "12.50" -> 1250/100 (exact, réduit par BigRational).
fn lire_nombre(litteral: &str, pos: usize) -> Result<BigRational, ErreurCalcul> {
    let mal_forme = || ErreurCalcul::lexicale(litteral, pos, "nombre mal formé");

    let (entier, frac) = match litteral.split_once('.') {
        Some((_, f)) if f.contains('.') => return Err(mal_forme()),
        Some((e, f)) => (e, f),
        None => (litteral, ""),
    };
    if entier.is_empty() && frac.is_empty() {
        return Err(mal_forme());
    }

    let chiffres = format!("{entier}{frac}");
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or_else(mal_forme)?;
    let d = BigInt::from(10).pow(frac.len() as u32);

    Ok(BigRational::new(n, d))
}

/// Format utilitaire (debug/démarche) : liste de jetons en texte.
pub fn format_tokens(jetons: &[Jeton]) -> String {
    fn format_num(r: &BigRational) -> String {
        decimal_exact(r).unwrap_or_else(|| format!("{}/{}", r.numer(), r.denom()))
    }

    jetons
        .iter()
        .filter_map(|j| match &j.tok {
            Tok::Num(r) => Some(format_num(r)),
            Tok::Op(op) => Some(op.to_string()),
            Tok::LPar => Some("(".to_string()),
            Tok::RPar => Some(")".to_string()),
            Tok::Fin => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}
