pub mod auth;
pub mod comment;
pub mod image;
pub mod route;
pub mod track;
pub mod user;
pub mod view;
