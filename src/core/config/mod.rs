pub mod data;
pub mod io;


pub use data::Config;
pub use io::ConfigError;
