use plotters::style::{FontDesc, FontFamily, FontStyle};

pub fn font(size: u32) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, f64::from(size), FontStyle::Normal)
}

/// Compact decimal rendering for tick labels
pub fn format_tick(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-3..1e6).contains(&magnitude) {
        return format!("{value:.1e}");
    }
    let fixed = format!("{value:.4}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

pub fn truncate_label(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_tick_trims_zeros() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(2.0), "2");
        assert_eq!(format_tick(-0.5), "-0.5");
        assert_eq!(format_tick(1000.0), "1000");
        assert_eq!(format_tick(0.125), "0.125");
        assert_eq!(format_tick(2_500_000.0), "2.5e6");
        assert_eq!(format_tick(-0.00001), "-1.0e-5");
    }

    #[test]
    fn truncate_label_adds_ellipsis() {
        assert_eq!(truncate_label("hello", 10), "hello");
        assert_eq!(truncate_label("abcdefghijklmnopqrstuvwxyz", 8), "abcde...");
    }
}
