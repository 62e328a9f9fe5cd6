pub mod form_controller;
pub mod vehicle_controller;
