//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global (large : debug + CI lente)
//! - invariant clé : forme canonique -> jetons -> AST redonne le même arbre
//! - pires formes d’arbre aux plafonds durs, sur des threads à pile standard (2 Mio)

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;
use pretty_assertions::assert_eq;

use super::eval::{compute_expression, compute_expression_avec, evaluate};
use super::expr::Expr;
use super::jetons::{tokenize, Op};
use super::reglages::{
    Reglages, LONGUEUR_MAX_ABSOLUE, PROFONDEUR_MAX_ABSOLUE, PROFONDEUR_MAX_DEFAUT,
};
use super::syntaxe::parse;
use super::GenreErreur;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’arbres (bornée) ------------------------ */

fn gen_lit(rng: &mut Rng) -> Expr {
    // zéro fréquent : les divisions par zéro doivent arriver
    let n = if rng.pick(8) == 0 {
        BigInt::from(0)
    } else {
        BigInt::from(rng.pick(1000))
    };
    let k = rng.pick(4);
    let d = BigInt::from(10).pow(k);
    Expr::lit(BigRational::new(n, d))
}

fn gen_op(rng: &mut Rng) -> Op {
    match rng.pick(5) {
        0 => Op::Plus,
        1 => Op::Moins,
        2 => Op::Fois,
        3 => Op::Div,
        _ => Op::Reste,
    }
}

fn gen_arbre(rng: &mut Rng, depth: usize) -> Expr {
    if depth == 0 {
        return gen_lit(rng);
    }

    match rng.pick(6) {
        0 => gen_lit(rng),
        1 => Expr::neg(gen_arbre(rng, depth - 1)),
        _ => {
            let op = gen_op(rng);
            let a = gen_arbre(rng, depth - 1);
            let b = gen_arbre(rng, depth - 1);
            Expr::bin(op, a, b)
        }
    }
}

/// Soupe de caractères : tout l’alphabet accepté + quelques intrus.
fn gen_soupe(rng: &mut Rng) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '7', '9', '.', '+', '-', '*', '/', '%', '(', ')', ' ', '×', '÷', 'x', '^', 'é',
    ];
    let len = rng.pick(24) as usize;
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_aller_retour_forme_canonique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let arbre = gen_arbre(&mut rng, 6);
        let texte = arbre.to_string();

        let jetons = tokenize(&texte).unwrap_or_else(|e| panic!("texte={texte:?} err={e}"));
        let relu = parse(&jetons, PROFONDEUR_MAX_DEFAUT)
            .unwrap_or_else(|e| panic!("texte={texte:?} err={e}"));

        assert_eq!(relu, arbre, "texte={texte:?}");
    }
}

#[test]
fn fuzz_texte_et_arbre_donnent_la_meme_valeur() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let arbre = gen_arbre(&mut rng, 5);
        let texte = arbre.to_string();

        match (evaluate(&arbre), compute_expression(&texte)) {
            (Ok(v), Ok(r)) => {
                assert_eq!(r.exact, v, "texte={texte:?}");
                seen_ok += 1;
            }
            (Err(e1), Err(e2)) => {
                assert_eq!(e1, e2, "texte={texte:?}");
                assert_eq!(e2.genre(), GenreErreur::Arithmetique);
                seen_err += 1;
            }
            (a, b) => panic!("divergence texte={texte:?}: arbre={a:?} texte={:?}", b.map(|r| r.lecture)),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune division par zéro vue: fuzz trop “sage”");
}

#[test]
fn fuzz_soupe_jamais_de_panique_et_idempotent() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..500 {
        budget(t0, max);

        let s = gen_soupe(&mut rng);
        let a = compute_expression(&s).map(|r| r.lecture);
        let b = compute_expression(&s).map(|r| r.lecture);
        assert_eq!(a, b, "entrée={s:?}");
    }
}

#[test]
fn imbrication_profonde_refusee_sans_debordement() {
    let profond = format!("{}1{}", "(".repeat(400), ")".repeat(400));
    let e = compute_expression(&profond).unwrap_err();
    assert_eq!(e.genre(), GenreErreur::Syntaxique);
    assert!(e.to_string().contains("imbrication trop profonde"));

    let moins = format!("{}1", "-".repeat(900));
    assert_eq!(
        compute_expression(&moins).unwrap_err().genre(),
        GenreErreur::Syntaxique
    );
}

#[test]
fn longue_chaine_a_la_limite() {
    // 500 termes => 999 caractères, sous la borne par défaut (1000)
    let s = vec!["1"; 500].join("+");
    let r = compute_expression(&s).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(r.lecture, "500");

    let trop = vec!["1"; 501].join("+");
    assert_eq!(
        compute_expression(&trop).unwrap_err().genre(),
        GenreErreur::Syntaxique
    );
}

#[test]
fn appels_concurrents_sans_verrou() {
    let entrees: Vec<String> = (0..50).map(|i| format!("({i} + 0.5) * {i} % 7 - {i}/4")).collect();
    let attendu: Vec<String> = entrees
        .iter()
        .map(|s| compute_expression(s).unwrap().lecture)
        .collect();

    std::thread::scope(|scope| {
        let poignees: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    entrees
                        .iter()
                        .map(|s| compute_expression(s).unwrap().lecture)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for p in poignees {
            assert_eq!(p.join().unwrap(), attendu);
        }
    });
}

/* ------------------------ Plafonds durs, pile de thread standard ------------------------ */

/// Pile par défaut d’un `std::thread::spawn`.
const PILE_THREAD: usize = 2 * 1024 * 1024;

fn reglages_plafond() -> Reglages {
    Reglages::default()
        .avec_longueur_max(usize::MAX)
        .avec_profondeur_max(usize::MAX)
}

/// (entrée, lecture attendue) : formes les plus hautes admises par les plafonds.
fn pires_formes() -> Vec<(String, String)> {
    let p = PROFONDEUR_MAX_ABSOLUE;

    // chaîne gauche : hauteur = nombre de termes
    let termes = LONGUEUR_MAX_ABSOLUE / 2;
    let chaine = vec!["1"; termes].join("-");
    assert_eq!(chaine.chars().count(), LONGUEUR_MAX_ABSOLUE - 1);

    let parens = format!("{}1{}", "(".repeat(p), ")".repeat(p));
    let moins = format!("{}1", "-".repeat(p));
    let alterne = format!("{}7{}", "-(".repeat(p / 2), ")".repeat(p / 2));

    // chaîne longue au fond de l’imbrication maximale
    let fond = vec!["2"; 4000].join("*");
    let enfouie = format!("{}{fond}%3{}", "(".repeat(p), ")".repeat(p));
    assert!(enfouie.chars().count() <= LONGUEUR_MAX_ABSOLUE);

    vec![
        (chaine, format!("{}", 2 - termes as i64)),
        (parens, "1".into()),
        (moins, "1".into()),
        (alterne, "7".into()),
        // 2^4000 mod 3 = 1 (exposant pair)
        (enfouie, "1".into()),
    ]
}

#[test]
fn pires_formes_au_plafond_sur_pile_standard() {
    let reglages = reglages_plafond();
    let cas = pires_formes();

    let poignee = std::thread::Builder::new()
        .stack_size(PILE_THREAD)
        .spawn(move || {
            for (entree, attendu) in &cas {
                let r = compute_expression_avec(entree, &reglages)
                    .unwrap_or_else(|e| panic!("entrée de {} car.: {e}", entree.len()));
                assert_eq!(&r.lecture, attendu);
                assert!(r.texte.ends_with(attendu.as_str()));
                assert!(!r.demarche.arbre.is_empty());
            }
        })
        .unwrap();
    poignee.join().unwrap();
}

#[test]
fn au_dela_des_plafonds_refuse_sur_pile_standard() {
    let reglages = reglages_plafond();
    let p = PROFONDEUR_MAX_ABSOLUE + 1;

    let poignee = std::thread::Builder::new()
        .stack_size(PILE_THREAD)
        .spawn(move || {
            let trop_long = vec!["1"; LONGUEUR_MAX_ABSOLUE / 2 + 1].join("-");
            let trop_profond = format!("{}1{}", "(".repeat(p), ")".repeat(p));
            let trop_de_moins = format!("{}1", "-".repeat(p));

            for entree in [trop_long, trop_profond, trop_de_moins] {
                let e = compute_expression_avec(&entree, &reglages).unwrap_err();
                assert_eq!(e.genre(), GenreErreur::Syntaxique);
            }
        })
        .unwrap();
    poignee.join().unwrap();
}

#[test]
fn appels_concurrents_au_plafond() {
    let reglages = reglages_plafond();
    let cas = pires_formes();

    std::thread::scope(|scope| {
        let poignees: Vec<_> = (0..4)
            .map(|_| {
                std::thread::Builder::new()
                    .stack_size(PILE_THREAD)
                    .spawn_scoped(scope, || {
                        cas.iter()
                            .map(|(entree, _)| {
                                compute_expression_avec(entree, &reglages)
                                    .map(|r| r.lecture)
                                    .unwrap_or_else(|e| panic!("err: {e}"))
                            })
                            .collect::<Vec<_>>()
                    })
                    .unwrap()
            })
            .collect();

        let attendu: Vec<String> = cas.iter().map(|(_, l)| l.clone()).collect();
        for p in poignees {
            assert_eq!(p.join().unwrap(), attendu);
        }
    });
}
