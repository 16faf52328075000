pub mod errors;
pub mod db;
pub mod student;
pub mod validation;

#[cfg(test)]
mod tests;
