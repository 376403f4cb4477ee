pub mod frankfurter;
pub mod http;
pub mod open_er_api;
