pub mod db_service;
pub mod user;
