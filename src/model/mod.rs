pub mod config;
pub mod ident;

pub use config::Config;
pub use ident::ObjectId;
