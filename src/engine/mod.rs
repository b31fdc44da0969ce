mod async_engine;
mod records;

pub use async_engine::{AsyncEngine, RunSummary};
pub use records::{ActionKind, RequestRecord};
