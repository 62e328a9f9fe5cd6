//! Enlaces de contacto por WhatsApp

/// Número por defecto de la concesionaria
pub const DEFAULT_CONTACT_PHONE: &str = "5492284635692";

fn whatsapp_link(phone: &str, message: &str) -> String {
    format!("https://wa.me/{}?text={}", phone, urlencoding::encode(message))
}

/// Enlace con mensaje precargado sobre un vehículo
pub fn vehicle_contact_link(phone: &str, make: &str, model: &str) -> String {
    whatsapp_link(phone, &format!("Hola, estoy interesado en el {} {}.", make, model))
}

/// Enlace de contacto general
pub fn general_contact_link(phone: &str) -> String {
    whatsapp_link(phone, "Hola, estoy interesado en sus vehículos.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_link_is_encoded() {
        let link = vehicle_contact_link(DEFAULT_CONTACT_PHONE, "Citroën", "C3");
        assert_eq!(
            link,
            "https://wa.me/5492284635692?text=Hola%2C%20estoy%20interesado%20en%20el%20Citro%C3%ABn%20C3."
        );
    }

    #[test]
    fn test_general_link() {
        let link = general_contact_link("123");
        assert!(link.starts_with("https://wa.me/123?text=Hola%2C"));
        assert!(link.contains("veh%C3%ADculos"));
    }
}
