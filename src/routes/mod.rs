pub mod form_routes;
pub mod image_routes;
pub mod vehicle_routes;
