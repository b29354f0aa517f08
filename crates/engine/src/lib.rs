pub use draft::{AmountField, NewTransaction, TransactionDraft};
pub use error::EngineError;
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder};
pub use report::{CategoryBucket, DateBucket, MonthBucket, Report};
pub use transactions::{Transaction, TransactionKind};

mod draft;
mod error;
pub mod insight;
mod money;
mod ops;
mod report;
mod transactions;

pub(crate) type ResultEngine<T> = Result<T, EngineError>;
