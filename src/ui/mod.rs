//! UI components module

pub mod catalog_panel;
pub mod notifications;
pub mod product_form;
pub mod settings_panel;
pub mod storefront;

/// Thousands-separated rupee display, e.g. `Rs 2,800`.
pub fn format_rupees(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        let remaining = digits.len() - i;
        if i > 0 && remaining % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("Rs {grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_rupees(0), "Rs 0");
        assert_eq!(format_rupees(950), "Rs 950");
        assert_eq!(format_rupees(2800), "Rs 2,800");
        assert_eq!(format_rupees(1234567), "Rs 1,234,567");
    }
}
