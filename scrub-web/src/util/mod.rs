pub mod init;
pub mod web;
