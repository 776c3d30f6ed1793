// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (champ focus) ; hors champ, les touches passent
//   par Action::depuis_caractere
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Panneaux repliables : Démarche, Fractions
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)
// - Enter suffit (clavier PC + “Enter” virtuel mobile selon navigateur)

use eframe::egui;

use crate::noyau::fractions::OpFraction;

use super::entree::Action;
use super::etat::AppCalc;

/// Touches de fonction : (étiquette, nom au registre).
const TOUCHES_FONCTIONS: [[(&str, &str); 6]; 3] = [
    [
        ("sin", "sin"),
        ("cos", "cos"),
        ("tan", "tan"),
        ("asin", "asin"),
        ("acos", "acos"),
        ("atan", "atan"),
    ],
    [
        ("ln", "ln"),
        ("log", "log10"),
        ("log2", "log2"),
        ("e^x", "exp"),
        ("sqrt", "sqrt"),
        ("cbrt", "cbrt"),
    ],
    [
        ("x²", "square"),
        ("x³", "cube"),
        ("x!", "factorial"),
        ("x!!", "double_factorial"),
        ("1/x", "reciprocal"),
        ("Γ", "gamma"),
    ],
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.ui_ecran(ui);
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_touches(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
                self.ui_fractions(ui);
            });
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&self.ecran).monospace().size(26.0).strong());
                });
            });

        if !self.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2pi, sin(90), log(8, 2), 2^-1")
                .id_source("entree_edit")
                .code_editor(),
        );

        if resp.changed() {
            self.entree_editee();
        }

        // Si on a cliqué un bouton, on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (resp.has_focus() || resp.lost_focus()) && enter {
            self.appliquer(Action::Egal);
        }
    }

    fn ui_touches(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("touches_fonctions")
            .num_columns(6)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in TOUCHES_FONCTIONS {
                    for (label, nom) in rangee {
                        self.bouton(ui, label, Action::Fonction(nom));
                    }
                    ui.end_row();
                }
            });

        ui.add_space(6.0);

        // Pavé principal (disposition de la calculatrice de bureau)
        egui::Grid::new("pave_principal")
            .num_columns(6)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton(ui, "π", Action::Constante("pi"));
                self.bouton(ui, "e", Action::Constante("e"));
                self.bouton(ui, "x^y", Action::Operateur('^'));
                self.bouton(ui, "±", Action::ChangerSigne);
                self.bouton(ui, "C", Action::EffacerEntree);
                self.bouton(ui, "AC", Action::ToutEffacer);
                ui.end_row();

                self.bouton(ui, "7", Action::Chiffre('7'));
                self.bouton(ui, "8", Action::Chiffre('8'));
                self.bouton(ui, "9", Action::Chiffre('9'));
                self.bouton(ui, "/", Action::Operateur('/'));
                self.bouton(ui, "(", Action::Parenthese('('));
                self.bouton(ui, ")", Action::Parenthese(')'));
                ui.end_row();

                self.bouton(ui, "4", Action::Chiffre('4'));
                self.bouton(ui, "5", Action::Chiffre('5'));
                self.bouton(ui, "6", Action::Chiffre('6'));
                self.bouton(ui, "*", Action::Operateur('*'));
                self.bouton(ui, "%", Action::Pourcentage);
                self.bouton(ui, "DEL", Action::Supprimer);
                ui.end_row();

                self.bouton(ui, "1", Action::Chiffre('1'));
                self.bouton(ui, "2", Action::Chiffre('2'));
                self.bouton(ui, "3", Action::Chiffre('3'));
                self.bouton(ui, "-", Action::Operateur('-'));
                ui.label("");
                ui.label("");
                ui.end_row();

                self.bouton(ui, "0", Action::Chiffre('0'));
                self.bouton(ui, ".", Action::Point);
                self.bouton(ui, "=", Action::Egal);
                self.bouton(ui, "+", Action::Operateur('+'));
                ui.label("");
                ui.label("");
                ui.end_row();
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Normalisé", "demarche_norm", &self.demarche.normalise);
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
            });
    }

    fn ui_fractions(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Fractions")
            .default_open(false)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    Self::champ_entier(ui, &mut self.fractions.a_num);
                    ui.label("/");
                    Self::champ_entier(ui, &mut self.fractions.a_den);

                    egui::ComboBox::from_id_salt("op_fraction")
                        .selected_text(self.fractions.op.symbole())
                        .width(40.0)
                        .show_ui(ui, |ui| {
                            for op in [
                                OpFraction::Plus,
                                OpFraction::Moins,
                                OpFraction::Fois,
                                OpFraction::Div,
                            ] {
                                ui.selectable_value(&mut self.fractions.op, op, op.symbole());
                            }
                        });

                    Self::champ_entier(ui, &mut self.fractions.b_num);
                    ui.label("/");
                    Self::champ_entier(ui, &mut self.fractions.b_den);
                });

                ui.horizontal(|ui| {
                    if ui.button("=").clicked() {
                        self.calculer_fractions();
                    }
                    if ui.button("Simplifier").clicked() {
                        self.simplifier_fraction();
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Décimal :");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.fractions.decimal)
                            .desired_width(120.0)
                            .hint_text("0.75, pi…"),
                    );
                    ui.add(
                        egui::DragValue::new(&mut self.fractions.den_max)
                            .speed(10)
                            .range(1..=1_000_000_000u64)
                            .prefix("dén. ≤ "),
                    );
                    if ui.button("Convertir").clicked() {
                        self.convertir_decimal();
                    }
                });

                if !self.fractions.resultat.is_empty() {
                    Self::champ_monospace(ui, "fraction_out", &self.fractions.resultat, 1);
                }
            });
    }

    /// Panneau latéral : historique (plus récent en haut) + bouton d’effacement.
    pub fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Historique");
            if ui.button("Effacer").clicked() {
                self.effacer_historique();
            }
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if self.session.historique.is_empty() {
                    ui.weak("(vide)");
                }
                for e in self.session.historique.iter().rev() {
                    ui.monospace(e.expression());
                    ui.label(egui::RichText::new(format!("= {}", e.resultat())).strong());
                    ui.add_space(4.0);
                }
            });
    }

    fn champ_entier(ui: &mut egui::Ui, texte: &mut String) {
        ui.add(egui::TextEdit::singleline(texte).desired_width(48.0));
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, label: &str, action: Action) {
        let resp = ui.add_sized([52.0, 32.0], egui::Button::new(label));
        if resp.clicked() {
            self.appliquer(action);
        }
    }
}
