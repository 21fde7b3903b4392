pub mod spec;
pub mod version;
