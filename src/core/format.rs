/// Masses at or above this many grams are shown in kilograms.
pub const KILOGRAM_THRESHOLD: f64 = 1000.0;

/// Rounds to one decimal place.
pub fn round_tenth(grams: f64) -> f64 {
    (grams * 10.0).round() / 10.0
}

/// `409.58` → `409.6g`, `13.0` → `13g`, `1092.0` → `1.09kg`.
///
/// The unit is chosen on the raw mass, before rounding, so `999.96` still
/// reads `1000g` while `1000.0` reads `1.00kg`.
pub fn format_mass(grams: f64) -> String {
    if grams < KILOGRAM_THRESHOLD {
        format!("{}g", round_tenth(grams))
    } else {
        format!("{:.2}kg", grams / KILOGRAM_THRESHOLD)
    }
}

/// Shortest rendering of a plain number (`273`, `262.5`).
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_tenth() {
        assert_eq!(round_tenth(198.24), 198.2);
        assert_eq!(round_tenth(198.25), 198.3);
        assert_eq!(round_tenth(2.0), 2.0);
    }

    #[test]
    fn test_format_grams() {
        assert_eq!(format_mass(409.58), "409.6g");
        assert_eq!(format_mass(13.0), "13g");
        assert_eq!(format_mass(0.04), "0g");
        assert_eq!(format_mass(999.94), "999.9g");
    }

    #[test]
    fn test_unit_is_picked_before_rounding() {
        assert_eq!(format_mass(999.95), "1000g");
        assert_eq!(format_mass(999.96), "1000g");
        assert_eq!(format_mass(999.999), "1000g");
        assert_eq!(format_mass(1000.0), "1.00kg");
    }

    #[test]
    fn test_format_kilograms() {
        assert_eq!(format_mass(1000.0), "1.00kg");
        assert_eq!(format_mass(1092.0), "1.09kg");
        assert_eq!(format_mass(10_000.0), "10.00kg");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(273.0), "273");
        assert_eq!(format_number(262.5), "262.5");
    }
}
