//! Asset selection for bundled character illustrations.
//!
//! Characters never carry image data; they store an index that is resolved
//! against this catalog whenever they are rendered.

mod catalog;

pub use catalog::{
    BundledImage, image_count, images, pick_random_index, pick_random_index_with, resolve,
};
