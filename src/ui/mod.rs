pub mod panels;
pub mod plot;
pub mod presenter;
pub mod table;
