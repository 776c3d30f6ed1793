// src/lib.rs
//
// Calculatrice scientifique : noyau (pur, testable) + adaptateur egui.

pub mod app;
pub mod noyau;
