//! One module per subcommand.

pub mod auth;
pub mod completions;
pub mod login;
