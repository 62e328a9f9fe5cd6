//! Formato de valores para mostrar (convención es-AR)

/// Agrupar miles con punto: 1234567 -> "1.234.567"
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn format_price(price: i64) -> String {
    format!("${}", format_thousands(price))
}

pub fn format_mileage(mileage: i64) -> String {
    format!("{} km", format_thousands(mileage))
}
