//! The bundled illustration catalog and lookups over it.

use rand::Rng;
use serde::Serialize;

use crate::character::Gender;

/// A static illustration shipped with the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundledImage {
    pub gender: Gender,
    pub index: usize,
    /// Path relative to the application's asset root.
    pub asset_path: &'static str,
}

static CATRIN_IMAGES: [BundledImage; 2] = [
    BundledImage {
        gender: Gender::Catrin,
        index: 0,
        asset_path: "assets/images/catrines/catrin-1.jpg",
    },
    BundledImage {
        gender: Gender::Catrin,
        index: 1,
        asset_path: "assets/images/catrines/catrin-2.jpg",
    },
];

static CATRINA_IMAGES: [BundledImage; 2] = [
    BundledImage {
        gender: Gender::Catrina,
        index: 0,
        asset_path: "assets/images/catrinas/catrina-1.jpg",
    },
    BundledImage {
        gender: Gender::Catrina,
        index: 1,
        asset_path: "assets/images/catrinas/catrina-2.jpg",
    },
];

/// All bundled illustrations for a gender, in index order.
pub fn images(gender: Gender) -> &'static [BundledImage] {
    match gender {
        Gender::Catrin => &CATRIN_IMAGES,
        Gender::Catrina => &CATRINA_IMAGES,
    }
}

/// Number of bundled illustrations for a gender.
pub fn image_count(gender: Gender) -> usize {
    images(gender).len()
}

/// Picks a uniformly random image index for a new character.
pub fn pick_random_index(gender: Gender) -> usize {
    pick_random_index_with(&mut rand::thread_rng(), gender)
}

/// Same as [`pick_random_index`] with a caller-supplied RNG.
pub fn pick_random_index_with<R: Rng + ?Sized>(rng: &mut R, gender: Gender) -> usize {
    rng.gen_range(0..image_count(gender))
}

/// Resolves the illustration for `(gender, index)`.
///
/// Total over every index: out-of-range and negative values wrap modulo the
/// number of images, so a bad index never breaks rendering.
pub fn resolve(gender: Gender, index: i64) -> &'static BundledImage {
    let set = images(gender);
    let wrapped = index.rem_euclid(set.len() as i64) as usize;
    &set[wrapped]
}
