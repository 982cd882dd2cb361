use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub company_name: String,
    pub company_email: String,
    pub company_phone_number: String,
    pub sector_id: Uuid,
    pub number_of_employees: i32,
    pub email: String,
    pub name: String,
    pub second_name: Option<String>,
    pub surname: String,
    pub title: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

#[derive(ToSchema)]
pub struct LoginRequest { pub user_name: String, pub password: String }

#[derive(ToSchema)]
pub struct SectorRequest { pub name: String }

#[derive(ToSchema)]
pub struct CompanyUpdateRequest {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub sector_id: Uuid,
    pub number_of_employees: i32,
}

#[derive(ToSchema)]
pub struct EmployeeCreateRequest {
    pub email: String,
    pub name: String,
    pub second_name: Option<String>,
    pub surname: String,
    pub title: Option<String>,
    pub blood_group: Option<String>,
    pub profession: Option<String>,
    /// `YYYY-MM-DD`
    pub birth_date: Option<String>,
    pub identity_id: Option<String>,
    pub image_path: Option<String>,
    pub password: String,
}

#[derive(ToSchema)]
pub struct ProfileUpdateRequest {
    pub name: String,
    pub second_name: Option<String>,
    pub surname: String,
    pub title: Option<String>,
    pub blood_group: Option<String>,
    pub profession: Option<String>,
    /// `YYYY-MM-DD`
    pub birth_date: Option<String>,
    pub identity_id: Option<String>,
    pub image_path: Option<String>,
    /// Only changed when present.
    pub password: Option<String>,
}

#[derive(ToSchema)]
pub struct LeaveRequest {
    /// annual, sick, maternity, paternity, marriage, bereavement or unpaid
    pub leave_type: String,
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: String,
}

#[derive(ToSchema)]
pub struct CashAdvanceRequest {
    pub description: String,
    /// Decimal string, e.g. `"1500.00"`
    pub requested_amount: String,
    pub final_date_request: Option<String>,
}

#[derive(ToSchema)]
pub struct ApproveCashAdvanceRequest {
    /// Defaults to the requested amount.
    pub approved_amount: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::sectors::list,
        crate::routes::sectors::create,
        crate::routes::sectors::update,
        crate::routes::sectors::delete,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::admin::list_registrations,
        crate::routes::admin::approve_registration,
        crate::routes::admin::reject_registration,
        crate::routes::admin::list_companies,
        crate::routes::admin::delete_company,
        crate::routes::admin::list_users,
        crate::routes::admin::delete_user,
        crate::routes::company::get,
        crate::routes::company::update,
        crate::routes::company::list_employees,
        crate::routes::company::create_employee,
        crate::routes::company::delete_employee,
        crate::routes::company::list_leaves,
        crate::routes::company::list_leave_requests,
        crate::routes::company::approve_leave,
        crate::routes::company::reject_leave,
        crate::routes::company::list_cash_advances,
        crate::routes::company::list_cash_advance_requests,
        crate::routes::company::approve_cash_advance,
        crate::routes::company::reject_cash_advance,
        crate::routes::company::pay_cash_advance,
        crate::routes::profile::get,
        crate::routes::profile::update,
        crate::routes::leaves::list,
        crate::routes::leaves::create,
        crate::routes::leaves::get,
        crate::routes::leaves::update,
        crate::routes::leaves::delete,
        crate::routes::cash_advances::list,
        crate::routes::cash_advances::create,
        crate::routes::cash_advances::get,
        crate::routes::cash_advances::update,
        crate::routes::cash_advances::delete,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            SectorRequest,
            CompanyUpdateRequest,
            EmployeeCreateRequest,
            ProfileUpdateRequest,
            LeaveRequest,
            CashAdvanceRequest,
            ApproveCashAdvanceRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "sectors"),
        (name = "admin"),
        (name = "company"),
        (name = "profile"),
        (name = "leaves"),
        (name = "cash-advances")
    )
)]
pub struct ApiDoc;
