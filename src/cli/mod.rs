pub mod init;
pub mod schema;
pub mod seed;
pub mod serve;
