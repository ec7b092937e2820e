pub mod draft;
pub mod image;
