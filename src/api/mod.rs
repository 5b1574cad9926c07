pub mod dashboard;
pub mod employee;
pub mod export;
pub mod register;
pub mod settings;
pub mod sync;

#[cfg(test)]
pub mod testing;
