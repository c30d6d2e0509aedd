use crate::domain::model::{OutputFormat, SupportResult};
use crate::utils::error::{EtlError, Result};

/// Longest support first. `sort_by` is stable, so equal periods keep
/// catalog order.
pub fn rank_products(mut results: Vec<SupportResult>) -> Vec<SupportResult> {
    results.sort_by(|a, b| b.support_period_days.cmp(&a.support_period_days));
    results
}

pub fn top_n(ranked: &[SupportResult], n: usize) -> &[SupportResult] {
    &ranked[..n.min(ranked.len())]
}

/// `"<name> <cycle> <days>"` lines for the first `n` ranked results.
pub fn report(ranked: &[SupportResult], n: usize) -> Vec<String> {
    top_n(ranked, n)
        .iter()
        .map(|r| format!("{} {} {}", r.name, r.cycle, r.support_period_days))
        .collect()
}

pub fn render(results: &[SupportResult], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report(results, results.len())
            .into_iter()
            .map(|line| line + "\n")
            .collect()),
        OutputFormat::Csv => render_csv(results),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(results)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn render_csv(results: &[SupportResult]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for result in results {
        writer.serialize(result)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| EtlError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, cycle: &str, days: i64) -> SupportResult {
        SupportResult {
            name: name.to_string(),
            cycle: cycle.to_string(),
            support_period_days: days,
        }
    }

    fn names(results: &[SupportResult]) -> Vec<&str> {
        results.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_rank_is_descending_and_stable() {
        let ranked = rank_products(vec![
            result("A", "1", 100),
            result("B", "1", 200),
            result("C", "1", 200),
        ]);
        assert_eq!(names(&ranked), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_report_truncates_to_top_n() {
        let ranked = rank_products(vec![
            result("A", "a", 5),
            result("B", "b", 4),
            result("C", "c", 3),
            result("D", "d", 2),
            result("E", "e", 1),
        ]);
        assert_eq!(report(&ranked, 2), vec!["A a 5", "B b 4"]);
        assert_eq!(report(&ranked, 50).len(), 5);
        assert!(report(&ranked, 0).is_empty());
    }

    #[test]
    fn test_report_line_with_empty_cycle() {
        assert_eq!(report(&[result("Nothing", "", 0)], 1), vec!["Nothing  0"]);
    }

    #[test]
    fn test_render_text_is_newline_terminated() {
        let text = render(&[result("Ubuntu", "14.04", 4018)], OutputFormat::Text).unwrap();
        assert_eq!(text, "Ubuntu 14.04 4018\n");
        assert_eq!(render(&[], OutputFormat::Text).unwrap(), "");
    }

    #[test]
    fn test_render_csv() {
        let csv = render(
            &[result("Ubuntu", "14.04", 4018), result("Alpine", "3.0", 730)],
            OutputFormat::Csv,
        )
        .unwrap();
        assert_eq!(
            csv,
            "name,cycle,support_period_days\nUbuntu,14.04,4018\nAlpine,3.0,730\n"
        );
    }

    #[test]
    fn test_render_json() {
        let json = render(&[result("Ubuntu", "14.04", 4018)], OutputFormat::Json).unwrap();
        let parsed: Vec<SupportResult> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![result("Ubuntu", "14.04", 4018)]);
    }
}
