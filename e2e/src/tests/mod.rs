mod admin;
mod auth;
mod comments;
mod utils;
