pub mod download;
pub mod hash;
pub mod jwt;
