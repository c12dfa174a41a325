pub use super::asset_type::Entity as AssetType;
pub use super::currency::Entity as Currency;
pub use super::expenditure_type::Entity as ExpenditureType;
pub use super::file_type::Entity as FileType;
pub use super::group_asset::Entity as GroupAsset;
pub use super::group_expense::Entity as GroupExpense;
pub use super::group_income::Entity as GroupIncome;
pub use super::group_invite::Entity as GroupInvite;
pub use super::group_member::Entity as GroupMember;
pub use super::group_type::Entity as GroupType;
pub use super::income_type::Entity as IncomeType;
pub use super::recurrency::Entity as Recurrency;
pub use super::tax::Entity as Tax;
pub use super::tax_type::Entity as TaxType;
pub use super::user::Entity as User;
pub use super::user_asset::Entity as UserAsset;
pub use super::user_asset_tax::Entity as UserAssetTax;
pub use super::user_category::Entity as UserCategory;
pub use super::user_expense::Entity as UserExpense;
pub use super::user_group::Entity as UserGroup;
pub use super::user_income::Entity as UserIncome;
pub use super::user_income_tax::Entity as UserIncomeTax;
pub use super::user_role::Entity as UserRole;
pub use super::user_type::Entity as UserType;
