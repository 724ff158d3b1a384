pub mod common;
pub mod clean;
pub mod image2text;
pub mod summarize;
pub mod analytics;
pub mod upload;
pub mod process;
