//! Utilidades del sistema
//!
//! Manejo de errores, saneamiento numérico, URLs de imágenes y formato.

pub mod errors;
pub mod format;
pub mod image;
pub mod validation;
