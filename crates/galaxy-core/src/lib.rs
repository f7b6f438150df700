pub mod activity;
pub mod alerts;
pub mod assistant;
pub mod canvas;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod reports;
pub mod responder;
pub mod store;
pub mod transcript;

pub use activity::*;
pub use alerts::*;
pub use assistant::*;
pub use canvas::*;
pub use catalog::*;
pub use config::*;
pub use error::*;
pub use reports::*;
pub use responder::*;
pub use store::*;
pub use transcript::*;
