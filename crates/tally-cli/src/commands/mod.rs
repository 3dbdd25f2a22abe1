//! Command implementations

pub(crate) mod common;
pub(crate) mod forget;
pub(crate) mod init;
pub(crate) mod mark;
pub(crate) mod sql;
pub(crate) mod status;
pub(crate) mod version;
