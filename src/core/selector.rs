use crate::core::date::is_valid_date;
use crate::core::support::support_period;
use crate::domain::model::{FieldNames, ProductEntry, SupportResult, VersionEntry};
use crate::utils::error::Result;

/// Running maximum threaded through the fold: `(period, cycle)`.
type Best = (i64, String);

/// Picks the version with the longest support window. Versions with a
/// missing or unparseable date are skipped; ties keep the earlier one.
pub fn select_best_cycle(product: &ProductEntry, fields: &FieldNames) -> Result<SupportResult> {
    let (support_period_days, cycle) = product
        .versions
        .iter()
        .try_fold((0, String::new()), |best, version| {
            consider(best, version, fields)
        })?;

    tracing::debug!(
        "{}: best cycle '{}' with {} days",
        product.name,
        cycle,
        support_period_days
    );

    Ok(SupportResult {
        name: product.name.clone(),
        cycle,
        support_period_days,
    })
}

fn consider(best: Best, version: &VersionEntry, fields: &FieldNames) -> Result<Best> {
    let Some(release_field) = fields.release_field_of(version) else {
        tracing::debug!("skipping version without release date: {}", version.0);
        return Ok(best);
    };
    if !version.contains(&fields.eol) {
        tracing::debug!("skipping version without eol: {}", version.0);
        return Ok(best);
    }
    if !is_valid_date(version, release_field) || !is_valid_date(version, &fields.eol) {
        tracing::debug!("skipping version with malformed dates: {}", version.0);
        return Ok(best);
    }

    let period = support_period(version, release_field, &fields.eol)?;
    if period > best.0 {
        Ok((period, version.label(&fields.cycle)))
    } else {
        Ok(best)
    }
}
