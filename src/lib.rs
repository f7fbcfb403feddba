//! Calculatrice sûre — noyau réutilisable.
//!
//! L’UI (src/app) et la ligne de commande (src/main.rs) ne font que fournir
//! un texte et afficher le résultat ; toute l’évaluation vit ici.

pub mod noyau;

pub use noyau::{compute_expression, compute_expression_avec, ErreurCalcul, GenreErreur, Reglages, Resultat};
