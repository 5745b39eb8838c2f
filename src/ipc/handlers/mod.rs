pub mod classes;
pub mod core;
pub mod directory;
pub mod palette;
pub mod routine;
pub mod setup;
pub mod subjects;
