// Account registration, login, and bearer-token verification.
// Handlers issue HS256 JWTs; protected routes extract `AuthUser` from the
// Authorization header.

pub mod handlers;
pub mod jwt;
pub mod password;
