pub mod auth;
pub mod feed;
pub mod matches;
pub mod music;
pub mod profile;
pub mod utils;
