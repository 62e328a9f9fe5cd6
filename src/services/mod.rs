//! Servicios del catálogo
//!
//! Lógica del dominio: formulario, vista previa, carrusel, filtros y vistas.

pub mod carousel;
pub mod catalog_filter;
pub mod contact;
pub mod preview;
pub mod vehicle_form;
pub mod vehicle_views;
