//! Command modules - one file per CLI command

pub mod check;
pub mod clean;
pub mod list;
pub mod new;
pub mod publish;
pub mod test;
pub mod update;
pub mod updpkgsums;
