// src/app.rs
//
// Calculatrice scientifique — module App (racine)
// ----------------------------------------------
// Rôle:
// - Déclarer les sous-modules
// - Ré-exporter AppCalc (pour main.rs)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - Enter dans le champ est géré par vue.rs (quand le champ a le focus).
// - Ici : Escape global, et touches “calculatrice” quand aucun champ n’a le focus.

pub mod affichage;
pub mod entree;
pub mod etat;
pub mod historique;
pub mod reglages;
pub mod vue;

// Ré-export pratique : `use calculatrice_sci::app::AppCalc;`
pub use entree::Action;
pub use etat::AppCalc;
pub use reglages::Reglages;

use eframe::egui;

impl AppCalc {
    /// Clavier hors champ de saisie : chiffres, opérateurs, Enter, Backspace.
    fn clavier_global(&mut self, ctx: &egui::Context) {
        if ctx.memory(|m| m.focused().is_some()) {
            return;
        }

        let events = ctx.input(|i| i.events.clone());
        for ev in events {
            let action = match ev {
                egui::Event::Text(t) => t.chars().find_map(Action::depuis_caractere),
                egui::Event::Key {
                    key, pressed: true, ..
                } => match key {
                    egui::Key::Enter => Some(Action::Egal),
                    // Backspace = C (efface l’entrée)
                    egui::Key::Backspace => Some(Action::EffacerEntree),
                    _ => None,
                },
                _ => None,
            };
            if let Some(a) = action {
                self.appliquer(a);
            }
        }
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = remise à zéro (comme bouton "AC")
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.appliquer(Action::ToutEffacer);
        }

        self.clavier_global(ctx);

        egui::SidePanel::right("panneau_historique")
            .resizable(true)
            .default_width(170.0)
            .show(ctx, |ui| {
                self.ui_historique(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
