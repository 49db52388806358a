use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, SignupDto};
use crate::modules::ideas::model::{CreateIdeaDto, Idea, IdeaReport, UpdateTitleDto};
use crate::modules::users::model::{MessageResponse, UpdateRoleDto, User, UserRole};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::login,
        crate::modules::ideas::controller::list_ideas,
        crate::modules::ideas::controller::create_idea,
        crate::modules::ideas::controller::cast_vote,
        crate::modules::ideas::controller::get_report,
        crate::modules::ideas::controller::update_title,
        crate::modules::ideas::controller::delete_idea,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::update_role,
        crate::modules::users::controller::my_voted_ideas,
    ),
    components(
        schemas(
            User,
            UserRole,
            SignupDto,
            LoginRequest,
            LoginResponse,
            Idea,
            CreateIdeaDto,
            UpdateTitleDto,
            IdeaReport,
            UpdateRoleDto,
            MessageResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Account creation and login"),
        (name = "Ideas", description = "Idea submission, voting and moderation"),
        (name = "Users", description = "User listing and role management")
    ),
    info(
        title = "Ideaboard API",
        version = "0.1.0",
        description = "An idea submission and voting board with JWT authentication and role-based access control.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
