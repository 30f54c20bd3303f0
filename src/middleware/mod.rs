pub mod auth;
pub mod payload;
pub mod response;

pub use auth::{jwt_auth_middleware, require_admin, AuthUser};
pub use payload::JsonObject;
pub use response::{ApiResponse, ApiResult};
