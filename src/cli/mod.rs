mod app;
mod config;
mod serve;

pub use app::run;
