pub mod attendance;
pub mod settings;
pub mod summary;
