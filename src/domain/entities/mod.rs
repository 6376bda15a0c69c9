//! Domain entity definitions.

mod comment;
mod image_state;
mod post;
mod user;

pub use comment::{Comment, CommentId};
pub use image_state::{ImageHandle, LoadStatus};
pub use post::{Post, PostId};
pub use user::{Address, Company, Geo, User, UserId};
