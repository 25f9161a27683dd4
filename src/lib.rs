pub mod catalog;
pub mod client;
pub mod definition;
pub mod export;
pub mod graph;
pub mod template;
