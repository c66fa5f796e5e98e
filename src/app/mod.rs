mod commands;

pub use commands::run;
