/// Largest denominator tried when showing a quantity as a fraction
const MAX_DENOMINATOR: u32 = 16;
const TOLERANCE: f64 = 0.01;

/// Display form of an ingredient quantity: `1 1/2`, `3/4`, `2`, or a decimal
/// when no small fraction is close enough.
pub fn format_quantity(quantity: f64) -> String {
    if !quantity.is_finite() {
        return String::new();
    }
    let negative = quantity < 0.0;
    let value = quantity.abs();
    let whole = value.trunc();
    let fraction = value - whole;

    let formatted = match closest_fraction(fraction) {
        Some((0, _)) => format!("{}", whole as u64),
        Some((n, d)) if n == d => format!("{}", whole as u64 + 1),
        Some((n, d)) if whole == 0.0 => format!("{}/{}", n, d),
        Some((n, d)) => format!("{} {}/{}", whole as u64, n, d),
        None => trim_decimal(value),
    };
    if negative {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Smallest-denominator fraction within tolerance of `fraction` (0 <= f < 1)
fn closest_fraction(fraction: f64) -> Option<(u32, u32)> {
    (1..=MAX_DENOMINATOR).find_map(|d| {
        let n = (fraction * f64::from(d)).round();
        ((fraction - n / f64::from(d)).abs() < TOLERANCE).then_some((n as u32, d))
    })
}

fn trim_decimal(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_numbers() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(1.999), "2");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(format_quantity(0.5), "1/2");
        assert_eq!(format_quantity(1.25), "1 1/4");
        assert_eq!(format_quantity(2.0 / 3.0), "2/3");
        assert_eq!(format_quantity(0.75), "3/4");
    }

    #[test]
    fn test_unrepresentable_falls_back_to_decimal() {
        assert_eq!(format_quantity(0.03), "0.03");
    }
}
