pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, ConfigArgs, FetchArgs, ListArgs, MetadataArgs};
pub use output::{OutputFormat, OutputFormatter};
