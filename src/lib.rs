//! voc-dash library - access gate, route guard and fixture loader for the VOC dashboard.

pub mod auth;
pub mod cli;
pub mod colors;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod guard;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;
