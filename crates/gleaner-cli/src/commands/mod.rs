//! CLI command implementations

pub mod collect;
pub mod init;
pub mod run;
pub mod validate;
