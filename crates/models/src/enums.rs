use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle of every business record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Status {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "modified")]
    Modified,
    /// Waiting for approval.
    #[sea_orm(string_value = "passive")]
    Passive,
    #[sea_orm(string_value = "deleted")]
    Deleted,
}

impl Status {
    /// Statuses shown on regular screens.
    pub const VISIBLE: [Status; 2] = [Status::Active, Status::Modified];

    pub fn is_visible(self) -> bool {
        matches!(self, Status::Active | Status::Modified)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum Role {
    #[sea_orm(string_value = "site_administrator")]
    SiteAdministrator,
    #[sea_orm(string_value = "company_administrator")]
    CompanyAdministrator,
    #[sea_orm(string_value = "employee")]
    Employee,
}

impl Role {
    pub fn display_name(self) -> &'static str {
        match self {
            Role::SiteAdministrator => "Site Administrator",
            Role::CompanyAdministrator => "Company Administrator",
            Role::Employee => "Employee",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum LeaveType {
    #[sea_orm(string_value = "annual")]
    Annual,
    #[sea_orm(string_value = "sick")]
    Sick,
    #[sea_orm(string_value = "maternity")]
    Maternity,
    #[sea_orm(string_value = "paternity")]
    Paternity,
    #[sea_orm(string_value = "marriage")]
    Marriage,
    #[sea_orm(string_value = "bereavement")]
    Bereavement,
    #[sea_orm(string_value = "unpaid")]
    Unpaid,
}

/// Payment state of a cash advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "paid")]
    Paid,
}
