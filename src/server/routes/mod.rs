pub mod entries;
pub mod reorder;
pub mod transfer;
