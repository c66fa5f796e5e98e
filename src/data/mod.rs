mod csv_loader;

pub use csv_loader::load_bar_table;
