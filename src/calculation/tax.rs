//! Tax policy seam.
//!
//! Tax is never inferred by the engine itself: it is computed by a
//! pluggable [`TaxPolicy`] collaborator keyed by gross income. The
//! bracket-table implementation here is the reference policy loaded from
//! configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bracket/rate lookup keyed by monthly gross income.
///
/// Implementations must be deterministic. The engine calls this once per
/// employee per preview with the gross computed so far.
pub trait TaxPolicy: Send + Sync {
    /// Returns the tax amount for a monthly gross income.
    fn monthly_tax(&self, gross: Decimal) -> Decimal;
}

/// A single tax bracket.
///
/// Tax within a bracket is `fixed + (gross - from) × rate / 100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// The lower bound of the bracket (inclusive).
    pub from: Decimal,
    /// The marginal rate applied to income above `from`, in percent.
    pub rate: Decimal,
    /// The fixed tax accumulated by the brackets below this one.
    #[serde(default)]
    pub fixed: Decimal,
}

/// The bracket-table tax policy.
///
/// Brackets are kept sorted ascending by lower bound; lookup picks the
/// highest bracket whose lower bound does not exceed the gross.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{BracketTaxPolicy, TaxBracket, TaxPolicy};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let policy = BracketTaxPolicy::new(vec![
///     TaxBracket {
///         from: Decimal::ZERO,
///         rate: Decimal::ZERO,
///         fixed: Decimal::ZERO,
///     },
///     TaxBracket {
///         from: Decimal::from_str("50000").unwrap(),
///         rate: Decimal::from_str("5").unwrap(),
///         fixed: Decimal::ZERO,
///     },
/// ]);
///
/// // 60000 gross: 5% of the 10000 above the 50000 threshold.
/// assert_eq!(
///     policy.monthly_tax(Decimal::from_str("60000").unwrap()),
///     Decimal::from_str("500").unwrap(),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct BracketTaxPolicy {
    brackets: Vec<TaxBracket>,
}

impl BracketTaxPolicy {
    /// Creates a policy from a bracket table, sorting it by lower bound.
    pub fn new(mut brackets: Vec<TaxBracket>) -> Self {
        brackets.sort_by(|a, b| a.from.cmp(&b.from));
        Self { brackets }
    }

    /// Returns the configured brackets, ascending by lower bound.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

impl TaxPolicy for BracketTaxPolicy {
    fn monthly_tax(&self, gross: Decimal) -> Decimal {
        // Brackets are sorted ascending, so the applicable one is the last
        // whose lower bound is at or below the gross.
        let applicable = self.brackets.iter().rfind(|b| b.from <= gross);

        match applicable {
            Some(bracket) => bracket.fixed + (gross - bracket.from) * bracket.rate / Decimal::ONE_HUNDRED,
            None => Decimal::ZERO,
        }
    }
}
