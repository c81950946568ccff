pub mod admin;
pub mod contact;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
