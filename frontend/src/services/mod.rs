pub mod api;
pub mod date_utils;
pub mod export;
pub mod logging;
pub mod request_seq;
