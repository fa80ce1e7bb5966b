pub mod client;
pub mod dates;
pub mod discovery;
pub mod parsing;
pub mod urls;
