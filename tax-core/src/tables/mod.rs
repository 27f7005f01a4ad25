pub mod memory;
pub mod repository;

pub use memory::InMemoryTaxTables;
pub use repository::{RepositoryError, TaxTableRepository};
