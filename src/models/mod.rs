pub mod complaint;
pub mod content;
pub mod user;
