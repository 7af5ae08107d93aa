use std::sync::Mutex;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::Image;
use crate::ImageError;
use crate::ImageService;

/// Image service that ignores the image and flips a coin.
///
/// Stands in for a real recognition backend during manual testing. A seeded
/// instance produces the same sequence of answers on every run.
#[derive(Debug)]
pub struct FakeImageService {
    rng: Mutex<StdRng>,
}

impl FakeImageService {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for FakeImageService {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageService for FakeImageService {
    fn image_contains_cat(
        &self,
        image: &Image,
        confidence_threshold: f32,
    ) -> Result<bool, ImageError> {
        let contains_cat = self
            .rng
            .lock()
            .map_err(|e| ImageError::Unavailable(e.to_string()))?
            .gen_bool(0.5);

        tracing::debug!(
            "Fake analysis of {} byte image (threshold {}): cat={}",
            image.len(),
            confidence_threshold,
            contains_cat
        );
        Ok(contains_cat)
    }
}
