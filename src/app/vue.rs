// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Disposition classique : historique, entrée, pavé 5 colonnes
// - Clavier : Enter évalue (quand le champ est focus), Échap géré dans app.rs
// - Tactile : focus redonné après clic (focus_entree)

use eframe::egui;

use calculatrice_sure::compute_expression_avec;

use super::etat::{AppCalc, LigneHistorique};

const TAILLE_BOUTON: [f32; 2] = [50.0, 35.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        self.ui_historique(ui);
        ui.add_space(6.0);
        self.ui_entree(ui);
        ui.add_space(8.0);
        self.ui_pave(ui);
        ui.add_space(8.0);
        self.ui_demarche(ui);
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                egui::ScrollArea::vertical()
                    .id_salt("historique")
                    .max_height(100.0)
                    .min_scrolled_height(100.0)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for ligne in &self.historique {
                            match ligne {
                                LigneHistorique::Resultat(t) => {
                                    ui.monospace(t);
                                }
                                LigneHistorique::Erreur(msg) => {
                                    ui.colored_label(ui.visuals().error_fg_color, msg);
                                }
                            }
                        }
                    });
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        // IMPORTANT : id stable + focus contrôlé
        let mut sortie = egui::TextEdit::singleline(&mut self.entree)
            .desired_width(ui.available_width())
            .hint_text("Entrée pour voir le résultat")
            .id_salt("entree_edit")
            .code_editor()
            .show(ui);
        let resp = sortie.response.clone();

        // Après une erreur : tout sélectionner pour retaper par-dessus.
        if self.selection_entree {
            let fin = egui::text::CCursor::new(self.entree.chars().count());
            let tout = egui::text::CCursorRange::two(egui::text::CCursor::new(0), fin);
            sortie.state.cursor.set_char_range(Some(tout));
            sortie.state.store(ui.ctx(), resp.id);
            self.selection_entree = false;
        }

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Enter : TextEdit perd le focus sur Enter, d’où lost_focus().
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.lost_focus() && enter {
            self.eval_via_noyau();
        }
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.touche(ui, "1", "1", None);
                self.touche(ui, "2", "2", None);
                self.touche(ui, "3", "3", None);
                self.touche(ui, "+", "+", Some("Addition [+]"));
                if bouton(ui, "Clear", "Effacer l’entrée [Échap]") {
                    self.clear_entree();
                }
                ui.end_row();

                self.touche(ui, "4", "4", None);
                self.touche(ui, "5", "5", None);
                self.touche(ui, "6", "6", None);
                self.touche(ui, "-", "-", Some("Soustraction [-]"));
                let undo = ui.add_enabled_ui(self.peut_annuler(), |ui| {
                    bouton(ui, "Undo", "Annuler la dernière modification")
                });
                if undo.inner {
                    self.annuler();
                }
                ui.end_row();

                self.touche(ui, "7", "7", None);
                self.touche(ui, "8", "8", None);
                self.touche(ui, "9", "9", None);
                self.touche(ui, "×", "×", Some("Multiplication [*]"));
                let eq = ui
                    .add_sized(
                        TAILLE_BOUTON,
                        egui::Button::new(egui::RichText::new("=").strong())
                            .fill(egui::Color32::from_rgb(0x00, 0x77, 0xff)),
                    )
                    .on_hover_text("Calculer le résultat");
                if eq.clicked() {
                    self.eval_via_noyau();
                }
                ui.end_row();

                self.touche(ui, "%", "%", Some("Reste [%]"));
                self.touche(ui, "0", "0", None);
                self.touche(ui, ".", ".", None);
                self.touche(ui, "÷", "÷", Some("Division [/]"));
                if bouton(ui, "CLR", "Effacer l’historique") {
                    self.clear_historique();
                }
                ui.end_row();

                self.touche(ui, "(", "(", None);
                self.touche(ui, ")", ")", None);
                ui.end_row();
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        let Some(d) = &self.demarche else {
            return;
        };
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                ui.label("Jetons :");
                ui.monospace(&d.jetons);
                ui.label("Arbre :");
                ui.monospace(&d.arbre);
            });
    }

    fn touche(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, tip: Option<&str>) {
        let mut resp = ui.add_sized(TAILLE_BOUTON, egui::Button::new(label));
        if let Some(tip) = tip {
            resp = resp.on_hover_text(tip);
        }
        if resp.clicked() {
            self.inserer(to_insert);
        }
    }

    /// Évalue l’entrée via le noyau, puis dépose résultat ou erreur dans l’état UI.
    fn eval_via_noyau(&mut self) {
        // Entrée vide : rien à faire (pas de ligne d’erreur pour un "=" à vide).
        if self.entree.trim().is_empty() {
            self.focus_entree = true;
            return;
        }

        match compute_expression_avec(&self.entree, &self.reglages) {
            Ok(r) => {
                tracing::debug!(texte = %r.texte, "calcul réussi");
                self.set_resultat(r);
            }
            Err(e) => {
                tracing::debug!(erreur = %e, genre = ?e.genre(), "calcul refusé");
                self.set_erreur(&e);
            }
        }
    }
}

fn bouton(ui: &mut egui::Ui, label: &str, tip: &str) -> bool {
    ui.add_sized(TAILLE_BOUTON, egui::Button::new(label))
        .on_hover_text(tip)
        .clicked()
}
