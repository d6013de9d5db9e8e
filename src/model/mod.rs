//! Data model for the sorting session.

mod category;

pub use category::Category;
