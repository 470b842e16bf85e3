pub mod cursor;
pub mod scroll;
