//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para sanitizar la entrada numérica
//! y convertir las cadenas de dígitos en valores del dominio.

use chrono::{Datelike, Local};
use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;

lazy_static! {
    static ref NON_DIGIT: Regex = Regex::new(r"[^0-9]").expect("regex de dígitos válida");
}

/// Quitar todo carácter que no sea dígito
pub fn sanitize_digits(value: &str) -> String {
    NON_DIGIT.replace_all(value, "").into_owned()
}

/// Convertir una cadena de dígitos; vacía (o sin dígitos) vale el default.
/// Una cadena que desborda el tipo satura en `overflow`.
pub fn parse_digits<T: FromStr + Default>(value: &str, overflow: T) -> T {
    let digits = sanitize_digits(value);
    if digits.is_empty() {
        return T::default();
    }
    digits.parse().unwrap_or(overflow)
}

/// Interpretar un umbral de filtro: vacío o no numérico es "sin restricción"
pub fn parse_threshold(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Año calendario actual (hora local)
pub fn current_year() -> i32 {
    Local::now().year()
}
