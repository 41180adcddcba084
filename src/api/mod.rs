pub mod health;
pub mod queries;
pub mod recommendations;
pub mod session;
pub mod swagger;
pub mod users;
