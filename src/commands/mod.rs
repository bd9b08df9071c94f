pub mod init;
pub mod issues;
pub mod serve;
