/// Middleware modules for the API server
///
/// - `security`: security response headers
/// - `session`: session authentication for `/api` routes

pub mod security;
pub mod session;
