//! Réglages du noyau : bornes anti-abus + précision de la lecture décimale.
//!
//! Même contrat que l’état UI : constantes par défaut, garde-fous par clamp,
//! jamais d’erreur sur un réglage hors bornes (on le ramène dans les bornes).

/// Longueur d’entrée par défaut (en caractères).
pub const LONGUEUR_MAX_DEFAUT: usize = 1_000;

/// Plafond dur : au-delà, même un réglage explicite est ramené ici.
pub const LONGUEUR_MAX_ABSOLUE: usize = 10_000;

/// Imbrication par défaut (parenthèses + moins unaires enchaînés).
pub const PROFONDEUR_MAX_DEFAUT: usize = 128;

/// Plafond dur de l’imbrication (descente récursive => pile).
/// Trois cadres de pile par niveau de parenthèse : tient dans une pile de thread de 2 Mio.
pub const PROFONDEUR_MAX_ABSOLUE: usize = 256;

/// Chiffres après la virgule pour la lecture décimale.
pub const DECIMALES_DEFAUT: usize = 15;

pub const DECIMALES_MAX: usize = 200;

/// Champs privés : seuls `Default` et les `avec_*` (qui bornent) construisent des réglages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    longueur_max: usize,
    profondeur_max: usize,
    decimales: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            longueur_max: LONGUEUR_MAX_DEFAUT,
            profondeur_max: PROFONDEUR_MAX_DEFAUT,
            decimales: DECIMALES_DEFAUT,
        }
    }
}

impl Reglages {
    pub fn longueur_max(&self) -> usize {
        self.longueur_max
    }

    pub fn profondeur_max(&self) -> usize {
        self.profondeur_max
    }

    pub fn decimales(&self) -> usize {
        self.decimales
    }

    pub fn avec_longueur_max(mut self, n: usize) -> Self {
        self.longueur_max = n.clamp(1, LONGUEUR_MAX_ABSOLUE);
        self
    }

    pub fn avec_profondeur_max(mut self, n: usize) -> Self {
        self.profondeur_max = n.clamp(1, PROFONDEUR_MAX_ABSOLUE);
        self
    }

    pub fn avec_decimales(mut self, n: usize) -> Self {
        self.decimales = n.min(DECIMALES_MAX);
        self
    }
}
