// src/noyau/format.rs
//
// Affichage des rationnels exacts en décimal.
// - decimal_exact : seulement si le développement est fini (dénominateur 2^a·5^b)
// - lecture_decimale : exact si ça tient, sinon tronqué vers zéro

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
/// Zéros finaux retirés ; jamais de "-0".
fn scaled_to_decimal(scaled: &BigInt, digits: usize) -> String {
    if scaled.is_zero() {
        return "0".to_string();
    }

    let neg = scaled.is_negative();
    let abs = scaled.abs();

    let scale = pow10(digits);
    let int_part = &abs / &scale;
    let frac_part = &abs % &scale;

    let mut txt = int_part.to_str_radix(10);
    if digits > 0 && !frac_part.is_zero() {
        let mut frac = frac_part.to_str_radix(10);
        while frac.len() < digits {
            frac.insert(0, '0');
        }
        let frac = frac.trim_end_matches('0');
        txt.push('.');
        txt.push_str(frac);
    }

    if neg {
        txt.insert(0, '-');
    }
    txt
}

/// Nombre de chiffres après la virgule du développement fini de r, s’il existe.
fn decimales_finies(r: &BigRational) -> Option<usize> {
    let two = BigInt::from(2);
    let five = BigInt::from(5);

    let mut d = r.denom().clone();
    let (mut a2, mut a5) = (0usize, 0usize);

    while (&d % &two).is_zero() {
        d /= &two;
        a2 += 1;
    }
    while (&d % &five).is_zero() {
        d /= &five;
        a5 += 1;
    }

    if d == BigInt::from(1) {
        Some(a2.max(a5))
    } else {
        None
    }
}

/// Texte décimal exact (ex: 13/4 -> "3.25"), None si développement infini (1/3).
pub fn decimal_exact(r: &BigRational) -> Option<String> {
    let k = decimales_finies(r)?;
    let scaled = (r.numer() * pow10(k)) / r.denom();
    Some(scaled_to_decimal(&scaled, k))
}

/// Lecture décimale pour l’affichage :
/// - exacte si elle tient en `decimales` chiffres
/// - sinon tronquée vers zéro à `decimales` chiffres
pub fn lecture_decimale(r: &BigRational, decimales: usize) -> String {
    if let Some(k) = decimales_finies(r) {
        if k <= decimales {
            let scaled = (r.numer() * pow10(k)) / r.denom();
            return scaled_to_decimal(&scaled, k);
        }
    }

    // Division BigInt : troncature vers zéro.
    let scaled = (r.numer() * pow10(decimales)) / r.denom();
    scaled_to_decimal(&scaled, decimales)
}
