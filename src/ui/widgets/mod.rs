pub mod panel;
pub mod table;
