pub mod account;
pub mod file;

pub use account::PostgresAccountRepository;
pub use file::PostgresFileRepository;
