//! Book and favorite entities.

pub mod favorite;
pub mod model;

pub use favorite::FavoriteBook;
pub use model::{Book, BookUpdate, NewBook};
