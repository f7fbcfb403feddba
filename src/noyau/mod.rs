//! Noyau sûr : évaluation arithmétique sans évaluateur générique
//!
//! Organisation interne :
//! - jetons.rs   : tokenisation (+ - * / %, parenthèses, décimaux)
//! - expr.rs     : AST exact + forme canonique (Display)
//! - syntaxe.rs  : descente récursive, précédence par niveaux
//! - eval.rs     : évaluation + pipeline complet (compute_expression)
//! - format.rs   : lecture décimale (exacte ou tronquée)
//! - erreur.rs   : erreurs lexicales / syntaxiques / arithmétiques
//! - reglages.rs : bornes (longueur, imbrication) + décimales

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod reglages;
pub mod syntaxe;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{ErreurCalcul, GenreErreur};
pub use eval::{compute_expression, compute_expression_avec, Demarche, Resultat};
pub use reglages::Reglages;
