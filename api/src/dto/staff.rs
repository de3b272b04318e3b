use serde::Deserialize;

use pa_core::domain::entities::account::Role;
use pa_core::errors::ValidationError;
use pa_core::services::CreateStaffCommand;

/// Admin request to create an employee or admin account
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    #[serde(default, alias = "username")]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// `employee` (default) or `admin`
    pub role: Option<String>,
}

impl TryFrom<CreateEmployeeRequest> for CreateStaffCommand {
    type Error = ValidationError;

    fn try_from(request: CreateEmployeeRequest) -> Result<Self, Self::Error> {
        let role = request
            .role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::parse::<Role>)
            .transpose()?;

        Ok(CreateStaffCommand {
            display_name: request.display_name,
            email: request.email,
            password: request.password,
            role,
        })
    }
}
