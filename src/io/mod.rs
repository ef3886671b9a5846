pub mod day_store;
pub mod recovery;
pub mod settings_io;
pub mod state;
