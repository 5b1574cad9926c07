use crate::api::dashboard::DashboardResponse;
use crate::api::register::RegisterEmployee;
use crate::api::settings::UpdateSettings;
use crate::api::sync::SyncRequest;
use crate::auth::api_key::API_KEY_HEADER;
use crate::model::attendance::{AttendanceLog, EventKind};
use crate::model::settings::Settings;
use crate::model::summary::{DailyWindow, EmployeeDetail, EmployeeSummary};
use crate::registration::RegistrationOutcome;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Tracker API",
        version = "1.0.0",
        description = r#"
## Face-Recognition Attendance Tracker

Collects check-in / check-out events pushed by recognition clients and turns them
into per-employee attendance statistics.

### 🔹 Key Features
- **Sync**
  - Append attendance events reported by a recognition client
- **Employee Statistics**
  - Days present, absences, lateness and overtime for the current month
- **Reports**
  - Excel export for today, this week, this month, a custom range or everything
- **Settings**
  - Standard check-in / check-out times and the overtime cap
- **Registration**
  - Enroll new faces through the registration service

### 🔐 Security
Write endpoints require the shared secret in the **x-api-key** header.
Read endpoints are open.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::sync::sync_event,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee,

        crate::api::export::export,

        crate::api::settings::get_settings,
        crate::api::settings::update_settings,

        crate::api::register::register_employee,

        crate::api::dashboard::dashboard,
        crate::api::dashboard::list_logs
    ),
    components(
        schemas(
            SyncRequest,
            EventKind,
            AttendanceLog,
            EmployeeSummary,
            DailyWindow,
            EmployeeDetail,
            Settings,
            UpdateSettings,
            RegisterEmployee,
            RegistrationOutcome,
            DashboardResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Attendance", description = "Event ingestion and raw logs"),
        (name = "Employee", description = "Per-employee attendance statistics"),
        (name = "Reports", description = "Spreadsheet exports"),
        (name = "Settings", description = "Attendance rules"),
        (name = "Registration", description = "Face enrollment"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/sync",
            "/api/employees",
            "/api/employees/{name}",
            "/api/export",
            "/api/settings",
            "/api/register-employee",
            "/api/dashboard",
            "/api/logs",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let schemes = &doc.components.unwrap().security_schemes;
        assert!(schemes.contains_key("api_key"));
    }
}
