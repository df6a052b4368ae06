//! Domain records shared by the repository and the user screen.

mod image;
mod user;

pub use image::ImageData;
pub use user::{IdGenerator, User, UserId};
