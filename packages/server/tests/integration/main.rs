
mod comment;
mod media;
mod route;
