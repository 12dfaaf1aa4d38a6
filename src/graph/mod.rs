//! Dynamische waarden die tussen componenten worden doorgegeven.

pub mod value;
