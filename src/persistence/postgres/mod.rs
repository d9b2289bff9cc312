mod connect;
mod schema;
mod store;

pub use connect::connect;
pub use schema::Schema;
pub use store::PostgresStore;
