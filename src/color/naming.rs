use super::Rgba;

/// Builds a human-readable name for a color ramp applied over a window.
///
/// Encodes the window bounds with two decimals followed by `unit`, then the
/// two end colors as hex: `0.00m-0.30m-FFA500_to_800080`.
#[must_use]
pub fn ramp_name(min: f64, max: f64, unit: &str, start: &Rgba, end: &Rgba) -> String {
    format!(
        "{min:.2}{unit}-{max:.2}{unit}-{}_to_{}",
        start.to_hex(),
        end.to_hex()
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn encodes_window_and_colors() {
        let orange = Rgba::from_hex("#FFA500", 1.0).unwrap();
        let purple = Rgba::from_hex("#800080", 1.0).unwrap();
        assert_eq!(
            ramp_name(0.0, 0.3, "m", &orange, &purple),
            "0.00m-0.30m-FFA500_to_800080"
        );
        assert_eq!(
            ramp_name(1.234, 12.5, "um", &purple, &orange),
            "1.23um-12.50um-800080_to_FFA500"
        );
    }
}
