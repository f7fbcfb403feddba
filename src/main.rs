// src/main.rs
//
// Calculatrice sûre — point d’entrée NATIF + WEB (WASM)
// -----------------------------------------------------
// But:
// - NATIF (Linux/Windows/macOS) : eframe::run_native, ou `--eval` sans fenêtre
// - WEB  (wasm32)              : eframe::WebRunner + WebOptions + <canvas>
//
// Côté WEB (WASM) : index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>
//
// IMPORTANT (structure projet):
// - `impl eframe::App for AppCalc` vit dans src/app.rs
// - Toute l’évaluation vit dans le noyau (src/noyau, via la lib)

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;

use app::AppCalc;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
mod natif {
    use std::process::ExitCode;

    use calculatrice_sure::noyau::reglages::{
        DECIMALES_DEFAUT, LONGUEUR_MAX_DEFAUT, PROFONDEUR_MAX_DEFAUT,
    };
    use calculatrice_sure::{compute_expression_avec, Reglages};
    use clap::Parser;

    use super::{egui, AppCalc, TITRE_APP};

    #[derive(Parser, Debug)]
    #[command(name = "calculatrice_sure", version, about = "Calculatrice (évaluation arithmétique sûre)")]
    pub struct Cli {
        /// Évalue une expression et affiche le résultat, sans ouvrir la fenêtre.
        #[arg(long, value_name = "EXPRESSION", allow_hyphen_values = true)]
        eval: Option<String>,

        /// Chiffres après la virgule pour les résultats non décimaux finis (1/3).
        #[arg(long, default_value_t = DECIMALES_DEFAUT)]
        decimales: usize,

        /// Longueur maximale de l’entrée, en caractères.
        #[arg(long, default_value_t = LONGUEUR_MAX_DEFAUT)]
        longueur_max: usize,

        /// Imbrication maximale (parenthèses, moins unaires enchaînés).
        #[arg(long, default_value_t = PROFONDEUR_MAX_DEFAUT)]
        profondeur_max: usize,

        /// Journal détaillé (niveau debug) sur stderr.
        #[arg(short, long)]
        verbose: bool,
    }

    impl Cli {
        fn reglages(&self) -> Reglages {
            Reglages::default()
                .avec_decimales(self.decimales)
                .avec_longueur_max(self.longueur_max)
                .avec_profondeur_max(self.profondeur_max)
        }
    }

    fn installer_journal(verbose: bool) {
        let niveau = if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        };
        tracing_subscriber::fmt()
            .with_max_level(niveau)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    pub fn main() -> ExitCode {
        let cli = Cli::parse();
        installer_journal(cli.verbose);

        let reglages = cli.reglages();

        if let Some(expr) = &cli.eval {
            return match compute_expression_avec(expr, &reglages) {
                Ok(r) => {
                    println!("{}", r.texte);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Expression invalide : {e}");
                    ExitCode::FAILURE
                }
            };
        }

        tracing::info!(?reglages, "ouverture de la fenêtre");

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(TITRE_APP)
                .with_inner_size([320.0, 420.0])
                .with_min_inner_size([300.0, 380.0]),
            ..Default::default()
        };

        let res = eframe::run_native(
            TITRE_APP,
            options,
            Box::new(move |_cc| Ok(Box::new(AppCalc::new(reglages)))),
        );

        match res {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(erreur = %e, "fenêtre impossible à ouvrir");
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    natif::main()
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|_cc| Ok(Box::<AppCalc>::default())),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
