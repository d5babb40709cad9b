pub mod paths;
pub mod transactions;

pub use paths::SettingsPaths;
pub use transactions::{CachedTransaction, FileTransactionsStorage, TransactionsStorage};
