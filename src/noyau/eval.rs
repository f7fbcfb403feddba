//! Noyau — évaluation (pipeline réel)
//!
//! entrée -> bornes -> jetons -> AST -> valeur exacte -> lecture décimale
//!
//! Aucun état partagé : chaque appel alloue puis jette ses jetons et son arbre.
//! Appelable depuis plusieurs threads sans verrou.

use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

use super::erreur::ErreurCalcul;
use super::expr::Expr;
use super::format::lecture_decimale;
use super::jetons::{format_tokens, tokenize, Op};
use super::reglages::Reglages;
use super::syntaxe::parse;

/// Étapes intermédiaires, pour le panneau “Démarche”.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub jetons: String,
    pub arbre: String,
}

/// Résultat d’un calcul réussi.
#[derive(Clone, Debug)]
pub struct Resultat {
    /// Valeur exacte.
    pub exact: BigRational,
    /// Même valeur en double précision (pour un collaborateur qui veut un nombre).
    /// `None` si elle sort de la plage finie des `f64` (littéral de 400 chiffres).
    pub valeur: Option<f64>,
    /// Lecture décimale (exacte, ou tronquée à `Reglages::decimales`).
    pub lecture: String,
    /// "<entrée> = <lecture>"
    pub texte: String,
    pub demarche: Demarche,
}

/// Tâches du parcours postfixe de `evaluate`.
enum Tache<'a> {
    Visiter(&'a Expr),
    Negation,
    Appliquer(Op),
}

/// Évalue un arbre. Gauche avant droite.
/// Pile explicite : la hauteur de l’arbre ne consomme pas de pile d’appel.
pub fn evaluate(expr: &Expr) -> Result<BigRational, ErreurCalcul> {
    let mut taches = vec![Tache::Visiter(expr)];
    let mut valeurs: Vec<BigRational> = Vec::new();

    while let Some(t) = taches.pop() {
        match t {
            Tache::Visiter(Expr::Lit(r)) => valeurs.push(r.clone()),
            Tache::Visiter(Expr::Neg(x)) => {
                taches.push(Tache::Negation);
                taches.push(Tache::Visiter(x.as_ref()));
            }
            Tache::Visiter(Expr::Bin(op, a, b)) => {
                taches.push(Tache::Appliquer(*op));
                taches.push(Tache::Visiter(b.as_ref()));
                taches.push(Tache::Visiter(a.as_ref()));
            }
            Tache::Negation => {
                if let Some(v) = valeurs.last_mut() {
                    let oppose = -&*v;
                    *v = oppose;
                }
            }
            Tache::Appliquer(op) => {
                let (Some(vb), Some(va)) = (valeurs.pop(), valeurs.pop()) else {
                    unreachable!("pile de valeurs vide sous un opérateur binaire");
                };
                valeurs.push(appliquer(op, va, vb)?);
            }
        }
    }

    let Some(v) = valeurs.pop() else {
        unreachable!("un arbre produit toujours une valeur");
    };
    Ok(v)
}

fn appliquer(op: Op, a: BigRational, b: BigRational) -> Result<BigRational, ErreurCalcul> {
    match op {
        Op::Plus => Ok(a + b),
        Op::Moins => Ok(a - b),
        Op::Fois => Ok(a * b),
        Op::Div => {
            if b.is_zero() {
                return Err(ErreurCalcul::Arithmetique { operateur: op });
            }
            Ok(a / b)
        }
        Op::Reste => {
            if b.is_zero() {
                return Err(ErreurCalcul::Arithmetique { operateur: op });
            }
            // Reste tronqué : le signe suit le dividende (-7 % 3 = -1).
            let q = (&a / &b).trunc();
            Ok(a - b * q)
        }
    }
}

/// API publique, réglages par défaut.
pub fn compute_expression(entree: &str) -> Result<Resultat, ErreurCalcul> {
    compute_expression_avec(entree, &Reglages::default())
}

/// API publique : évalue une expression arithmétique.
/// Ne panique jamais ; toute faute revient en `ErreurCalcul`.
#[tracing::instrument(level = "debug", skip(reglages))]
pub fn compute_expression_avec(
    entree: &str,
    reglages: &Reglages,
) -> Result<Resultat, ErreurCalcul> {
    // 0) Borne de longueur AVANT tout travail (protège la pile du parseur).
    let longueur = entree.chars().count();
    if longueur > reglages.longueur_max() {
        return Err(ErreurCalcul::syntaxe(
            format!(
                "entrée trop longue ({longueur} caractères, max {})",
                reglages.longueur_max()
            ),
            reglages.longueur_max(),
        ));
    }

    // 1) Jetons
    let jetons = tokenize(entree)?;
    let jetons_txt = format_tokens(&jetons);

    // 2) AST
    let expr = parse(&jetons, reglages.profondeur_max())?;
    tracing::debug!(jetons = %jetons_txt, hauteur = expr.hauteur(), "analyse terminée");

    // 3) Valeur exacte
    let exact = evaluate(&expr)?;

    // 4) Lecture
    let lecture = lecture_decimale(&exact, reglages.decimales());
    let valeur = exact.to_f64().filter(|v| v.is_finite());
    let texte = format!("{} = {}", entree.trim(), lecture);

    Ok(Resultat {
        exact,
        valeur,
        lecture,
        texte,
        demarche: Demarche {
            jetons: jetons_txt,
            arbre: expr.to_string(),
        },
    })
}
