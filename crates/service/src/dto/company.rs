use models::company;
use models::enums::Status;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyUpdateDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub sector_id: Uuid,
    pub number_of_employees: i32,
}

impl CompanyUpdateDto {
    pub fn fields(&self) -> company::CompanyFields {
        company::CompanyFields {
            name: self.name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            sector_id: self.sector_id,
            number_of_employees: self.number_of_employees,
        }
    }
}

impl From<company::Model> for CompanyUpdateDto {
    fn from(c: company::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            phone_number: c.phone_number,
            sector_id: c.sector_id,
            number_of_employees: c.number_of_employees,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyVm {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub sector_id: Uuid,
    pub sector_name: Option<String>,
    pub number_of_employees: i32,
    pub status: Status,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: Option<chrono::DateTime<chrono::FixedOffset>>,
}

impl CompanyVm {
    pub fn new(c: company::Model, sector_name: Option<String>) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            phone_number: c.phone_number,
            sector_id: c.sector_id,
            sector_name,
            number_of_employees: c.number_of_employees,
            status: c.status,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
