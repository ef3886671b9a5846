pub mod dashboard;
pub mod editor;
pub mod progress;
