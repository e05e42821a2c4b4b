//! Terminal front end for the task screen.

pub mod app;
pub mod view;

pub use app::run;
