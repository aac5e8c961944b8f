//! CLI command implementations.

mod build;
mod check;
mod init;

pub use build::build_site;
pub use check::check_site;
pub use init::init_project;
