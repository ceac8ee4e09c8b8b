//! Record types implementing the [`Record`](crate::framework::Record) trait.

pub mod item;
pub mod page;

pub use item::*;
pub use page::*;
