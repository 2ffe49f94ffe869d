use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct SessionDoc {
    pub token: String,
    /// RFC 3339 timestamp
    pub expires_at: String,
    pub employee: EmployeeDoc,
}

/// One of `Employee`, `Leader`, `Director`.
#[derive(ToSchema)]
pub enum RoleDoc { Employee, Leader, Director }

#[derive(ToSchema)]
pub struct EmployeeDoc {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub document_number: String,
    /// `YYYY-MM-DD`
    pub birth_date: String,
    pub role: RoleDoc,
    pub manager_id: Option<Uuid>,
    pub phones: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct EmployeePageDoc {
    pub items: Vec<EmployeeDoc>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

#[derive(ToSchema)]
pub struct NewEmployeeDoc {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub document_number: String,
    pub birth_date: String,
    pub role: RoleDoc,
    pub manager_id: Option<Uuid>,
    pub phones: Vec<String>,
    pub password: String,
}

/// Full profile replacement; `password` only when changing it.
#[derive(ToSchema)]
pub struct EmployeeUpdateDoc {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub document_number: String,
    pub birth_date: String,
    pub role: RoleDoc,
    pub manager_id: Option<Uuid>,
    pub phones: Vec<String>,
    pub password: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::auth::login,
        crate::auth::logout,
        crate::auth::me,
        crate::employees::list,
        crate::employees::get,
        crate::employees::create,
        crate::employees::update,
        crate::employees::delete,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            SessionDoc,
            RoleDoc,
            EmployeeDoc,
            EmployeePageDoc,
            NewEmployeeDoc,
            EmployeeUpdateDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "employees")
    )
)]
pub struct ApiDoc;
