pub mod camping_route;
pub mod comment;
pub mod user;
pub mod view;
