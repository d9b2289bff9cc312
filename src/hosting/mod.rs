pub mod casino;
pub mod handlers;
pub mod server;

pub use casino::Casino;
pub use server::Server;
