// src/noyau/erreur.rs
//
// Erreurs du noyau.
// Trois familles seulement (lexicale / syntaxique / arithmétique) : le
// collaborateur (UI, CLI) peut tout replier en un seul message, mais la
// distinction reste disponible via genre().

use super::jetons::Op;

/// Famille d’une erreur, sans le détail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenreErreur {
    Lexicale,
    Syntaxique,
    Arithmetique,
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ErreurCalcul {
    /// Caractère non reconnu ou nombre mal formé.
    #[error("{raison} « {fragment} » (position {position})")]
    Lexicale {
        fragment: String,
        position: usize,
        raison: &'static str,
    },

    /// La suite de jetons ne respecte pas la grammaire.
    #[error("{message} (position {position})")]
    Syntaxique { message: String, position: usize },

    /// Division ou reste par zéro exact.
    #[error("division par zéro (opérateur « {operateur} »)")]
    Arithmetique { operateur: Op },
}

impl ErreurCalcul {
    pub fn lexicale(fragment: impl Into<String>, position: usize, raison: &'static str) -> Self {
        Self::Lexicale {
            fragment: fragment.into(),
            position,
            raison,
        }
    }

    pub fn syntaxe(message: impl Into<String>, position: usize) -> Self {
        Self::Syntaxique {
            message: message.into(),
            position,
        }
    }

    pub fn genre(&self) -> GenreErreur {
        match self {
            Self::Lexicale { .. } => GenreErreur::Lexicale,
            Self::Syntaxique { .. } => GenreErreur::Syntaxique,
            Self::Arithmetique { .. } => GenreErreur::Arithmetique,
        }
    }

    /// Position (en caractères) de la faute, si elle est localisable.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Lexicale { position, .. } | Self::Syntaxique { position, .. } => Some(*position),
            Self::Arithmetique { .. } => None,
        }
    }
}
