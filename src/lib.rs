pub mod db;
pub mod publish;
pub mod search;
pub mod server;
pub mod services;
pub mod web;

pub mod version;
