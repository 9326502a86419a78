pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod principal;

pub use claims::{Claims, Role};
pub use jwt::JwtService;
pub use middleware::AuthMiddleware;
pub use principal::{AdminPrincipal, Principal, StudentPrincipal};
