pub mod client;
pub mod error;

pub use error::{CliClientResult, ClientError};
