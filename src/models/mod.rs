//! Modelos del sistema
//!
//! Vehículo persistido, payload del formulario y estado editable del formulario.

pub mod form_state;
pub mod vehicle;
