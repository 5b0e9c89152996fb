//! Porcelain commands, one file per command, each an `impl Repository`
//! block. The binary dispatches here and renders any error as a single
//! line.

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
