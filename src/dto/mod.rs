//! DTOs de la API HTTP

pub mod form_dto;
pub mod vehicle_dto;
