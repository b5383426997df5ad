pub mod auth;
pub mod comment;
pub mod media;
pub mod route;
pub mod shared;
pub mod user;
pub mod view;
