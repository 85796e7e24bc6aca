pub mod app;
pub mod check;
pub mod commands;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod fetch;
pub mod fill;
pub mod mappings;
pub mod output;
pub mod runtime;
pub mod watch;

pub use app::run;
pub use output::OutputFormat;
