//! CLI command implementations

pub mod init;
pub mod prepare;
pub mod forget;
pub mod capture;
pub mod recall;
pub mod diff;
pub mod status;
pub mod log;
pub mod timeline;
