//! Asset totals per individual

use super::require;
use crate::error::AnalysisError;
use crate::table::{Table, Value};
use std::collections::BTreeMap;

/// Individual with the largest total holding in one currency
#[derive(Debug, Clone, PartialEq)]
pub struct TopHolder {
    pub id: String,
    pub currency: String,
    pub total: f64,
    /// `risk_tolerance` of the first row carrying this `_id`
    pub risk_tolerance: Value,
}

/// Sum `asset_value` per `_id` over rows whose `asset_currency` equals
/// `currency`. Null values are skipped; rows with a null `_id` are ignored.
pub fn totals_by_holder(
    table: &Table,
    currency: &str,
) -> Result<BTreeMap<String, f64>, AnalysisError> {
    let id = require(table, "_id")?;
    let value = require(table, "asset_value")?;
    let currency_col = require(table, "asset_currency")?;

    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for row in table.rows() {
        if row[currency_col].as_str() != Some(currency) {
            continue;
        }
        let Some(key) = row[id].key() else {
            continue;
        };
        let total = totals.entry(key).or_insert(0.0);
        if let Some(v) = row[value].as_f64() {
            *total += v;
        }
    }
    Ok(totals)
}

/// Find the individual with the highest total `asset_value` in `currency`.
///
/// Ties go to the lexicographically smallest `_id`. Returns `None` when no
/// row is in `currency`.
pub fn top_holder(table: &Table, currency: &str) -> Result<Option<TopHolder>, AnalysisError> {
    let risk = require(table, "risk_tolerance")?;
    let id = require(table, "_id")?;
    let totals = totals_by_holder(table, currency)?;

    let mut best: Option<(&String, f64)> = None;
    for (holder, &total) in &totals {
        if best.is_none_or(|(_, max)| total > max) {
            best = Some((holder, total));
        }
    }

    Ok(best.map(|(holder, total)| {
        let risk_tolerance = table
            .rows()
            .iter()
            .find(|row| row[id].key().as_ref() == Some(holder))
            .map(|row| row[risk].clone())
            .unwrap_or(Value::Null);
        TopHolder {
            id: holder.clone(),
            currency: currency.to_string(),
            total,
            risk_tolerance,
        }
    }))
}
