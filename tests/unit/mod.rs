pub mod canvas;
pub mod search;
