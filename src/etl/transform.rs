//! Transformer trait for data transformation

use crate::error::Result;

/// Transformer trait for deriving new data from extracted inputs
///
/// Inputs are borrowed so the pipeline can still persist them after the
/// transformation.
pub trait Transformer: Send + Sync {
    /// Input type
    type Input;

    /// Output type after transformation
    type Output;

    /// Transform the input
    ///
    /// # Errors
    /// Returns an error if transformation fails (missing columns, etc.)
    fn transform(&self, input: &Self::Input) -> Result<Self::Output>;
}
