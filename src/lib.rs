pub mod categorizer;
pub mod cli;
pub mod config;
pub mod error;
pub mod item_parser;
pub mod models;
pub mod shopping_list;
pub mod store;
