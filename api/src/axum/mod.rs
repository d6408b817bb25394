pub mod app;
pub mod errors;
pub mod state;
pub mod stream;
