use std::fmt;
use std::str::FromStr;

use crate::server::error::validation::ValidationError;

/// Global lookup tables that can be listed, extended and pruned through the category API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTable {
    AssetType,
    IncomeType,
    ExpenditureType,
    TaxType,
    GroupType,
    FileType,
    Currency,
    Recurrency,
}

impl LookupTable {
    pub const ALL: [LookupTable; 8] = [
        Self::AssetType,
        Self::IncomeType,
        Self::ExpenditureType,
        Self::TaxType,
        Self::GroupType,
        Self::FileType,
        Self::Currency,
        Self::Recurrency,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Self::AssetType => "assetType",
            Self::IncomeType => "incomeType",
            Self::ExpenditureType => "expenditureType",
            Self::TaxType => "taxType",
            Self::GroupType => "groupType",
            Self::FileType => "fileType",
            Self::Currency => "currency",
            Self::Recurrency => "recurrency",
        }
    }
}

/// Target of a category request, addressed by its `model` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Lookup(LookupTable),
    UserCategory,
}

impl CategoryKind {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Lookup(table) => table.tag(),
            Self::UserCategory => "userCategory",
        }
    }
}

impl FromStr for CategoryKind {
    type Err = ValidationError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        if tag == "userCategory" {
            return Ok(Self::UserCategory);
        }

        LookupTable::ALL
            .into_iter()
            .find(|table| table.tag() == tag)
            .map(Self::Lookup)
            .ok_or(ValidationError::UnknownModel)
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
