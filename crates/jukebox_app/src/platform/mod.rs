mod app;
mod logging;
mod notify;
mod page;

pub use app::run_app;
