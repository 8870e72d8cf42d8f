pub mod initdb;
pub mod serve;
pub mod week_info;

pub use initdb::init_database;
pub use serve::serve;
pub use week_info::print_week_info;
