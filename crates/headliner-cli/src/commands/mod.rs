pub mod build;
pub mod countries;
pub mod headlines;
pub mod init;
pub mod weather;
