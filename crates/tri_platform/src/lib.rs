pub mod context;
pub mod window;
