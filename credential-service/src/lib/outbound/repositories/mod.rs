pub mod credential;
pub mod in_memory;

pub use credential::PostgresCredentialRepository;
pub use in_memory::InMemoryCredentialRepository;
