use chrono::{DateTime, Local};

/// `$1,234,567.89`, or `N/A` when there is no amount.
pub fn format_currency(amount: Option<f64>) -> String {
    let Some(amount) = amount else {
        return "N/A".to_string();
    };

    let formatted = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}

/// Lowercased name with everything outside `[a-z0-9_-]` replaced by `_`,
/// so the slug is always a single path component.
fn safe_company_slug(company_name: &str) -> String {
    company_name
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' | '-' => c,
            _ => '_',
        })
        .collect()
}

/// `report_<slug>_<YYYYmmdd_HHMMSS>`; the slug is capped at 20 characters.
pub fn generate_report_id(company_name: &str, at: DateTime<Local>) -> String {
    let slug: String = safe_company_slug(company_name).chars().take(20).collect();
    format!("report_{}_{}", slug, at.format("%Y%m%d_%H%M%S"))
}

pub fn report_url(company_name: &str, at: DateTime<Local>) -> String {
    format!(
        "/reports/{}_{}.pdf",
        company_name.to_lowercase(),
        at.format("%Y%m%d_%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Some(1234.5)), "$1,234.50");
        assert_eq!(format_currency(Some(40000.0)), "$40,000.00");
        assert_eq!(format_currency(Some(999.999)), "$1,000.00");
        assert_eq!(format_currency(Some(12.0)), "$12.00");
        assert_eq!(format_currency(Some(-1500.0)), "-$1,500.00");
        assert_eq!(format_currency(None), "N/A");
    }

    #[test]
    fn test_generate_report_id() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            generate_report_id("Acme Data Analytics International", at),
            "report_acme_data_analytics__20240309_140507"
        );
        assert_eq!(generate_report_id("TestCo", at), "report_testco_20240309_140507");
    }

    #[test]
    fn test_report_id_is_a_single_path_component() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let id = generate_report_id("../../../../pwn", at);
        assert_eq!(id, "report_____________pwn_20240309_140507");

        let id = generate_report_id("a\\b/c.d:e", at);
        assert!(!id.contains(['/', '\\', '.', ':']));
        assert!(id.starts_with("report_a_b_c_d_e_"));
    }

    #[test]
    fn test_report_url() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(report_url("TestCo", at), "/reports/testco_20240309_140507.pdf");
    }
}
