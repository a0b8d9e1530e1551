//! Image loading and saving utilities.

mod load;
mod save;

pub use load::{image_to_tensor, load_image};
pub use save::{save_image, tensor_to_image};
