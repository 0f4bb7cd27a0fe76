//! Pearson correlation between numeric columns

use super::require;
use crate::error::AnalysisError;
use crate::table::Table;

/// Square matrix of pairwise correlations, in the order of `columns`.
///
/// A cell is `None` when the pair has fewer than two rows with both values
/// present, or when either column is constant over those rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Correlation of two named columns
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }
}

/// Correlate every pair of `columns`, using the rows where both are numeric.
pub fn correlation(table: &Table, columns: &[String]) -> Result<CorrelationMatrix, AnalysisError> {
    let data: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|name| {
            let idx = require(table, name)?;
            Ok(table.rows().iter().map(|row| row[idx].as_f64()).collect())
        })
        .collect::<Result<_, AnalysisError>>()?;

    let values = data
        .iter()
        .map(|x| data.iter().map(|y| pearson(x, y)).collect())
        .collect();

    Ok(CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    })
}

fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let (dx, dy) = (a - mean_x, b - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}
