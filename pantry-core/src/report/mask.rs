use crate::ExpandedRow;
use rust_decimal::Decimal;
use time::Date;

/// An expanded row reduced to its group key and masked quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskedRow<'a> {
    pub recipe: &'a str,
    pub ingredient: &'a str,
    pub date: Date,
    pub quantity: Decimal,
}

impl ExpandedRow<'_> {
    /// The candidate ingredient, and the candidate date when present, equal the event ones.
    pub fn matches(&self) -> bool {
        self.ingredient == self.event.ingredient && self.date.is_none_or(|d| d == self.event.date)
    }
}

/// The quantity of the event when the candidates match it, zero otherwise.
pub fn mask(row: &ExpandedRow) -> Decimal {
    if row.matches() {
        row.event.quantity
    } else {
        Decimal::ZERO
    }
}

impl<'a> From<ExpandedRow<'a>> for MaskedRow<'a> {
    fn from(row: ExpandedRow<'a>) -> Self {
        MaskedRow {
            recipe: &row.event.recipe,
            ingredient: row.ingredient,
            date: row.group_date(),
            quantity: mask(&row),
        }
    }
}
