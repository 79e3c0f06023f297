pub mod classifier;
pub mod keyword_table;

pub use classifier::{classify, OverrideMap};
pub use keyword_table::{Category, KeywordTable, OTHER_CATEGORY};
