//! OpenAPI documentation.

use utoipa::OpenApi;

use domain::{NewUser, UserResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::create_user,
    ),
    components(
        schemas(
            NewUser,
            UserResponse,
        )
    ),
    tags(
        (name = "Users", description = "User repository endpoints"),
    )
)]
pub struct ApiDoc;
