use std::fmt;
use std::str::FromStr;

use crate::server::error::validation::ValidationError;

/// Shared financial item reference in the `<kind>_<id>` form used by group requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupItem {
    Income(i32),
    Expense(i32),
    Asset(i32),
}

impl FromStr for GroupItem {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (constructor, raw_id): (fn(i32) -> GroupItem, &str) =
            if let Some(id) = value.strip_prefix("income_") {
                (GroupItem::Income, id)
            } else if let Some(id) = value.strip_prefix("expense_") {
                (GroupItem::Expense, id)
            } else if let Some(id) = value.strip_prefix("asset_") {
                (GroupItem::Asset, id)
            } else {
                return Err(ValidationError::InvalidItemType);
            };

        raw_id
            .parse::<i32>()
            .ok()
            .filter(|id| *id > 0)
            .map(constructor)
            .ok_or(ValidationError::InvalidNumber("ItemID"))
    }
}

impl fmt::Display for GroupItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income(id) => write!(f, "income_{}", id),
            Self::Expense(id) => write!(f, "expense_{}", id),
            Self::Asset(id) => write!(f, "asset_{}", id),
        }
    }
}
