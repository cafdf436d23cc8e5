mod backend;
pub mod schema;

pub use backend::MySqlStore;
