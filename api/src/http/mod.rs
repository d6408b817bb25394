pub mod controllers;
pub mod routes;
