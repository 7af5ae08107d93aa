use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use crate::Image;
use crate::ImageError;
use crate::ImageService;

/// Image service with a scripted answer.
///
/// The answer can be changed between calls through a shared reference, which
/// lets a test flip the camera view while the service is owned elsewhere.
#[derive(Debug, Default)]
pub struct FixedImageService {
    contains_cat: AtomicBool,
    calls: AtomicUsize,
}

impl FixedImageService {
    pub fn new(contains_cat: bool) -> Self {
        Self {
            contains_cat: AtomicBool::new(contains_cat),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_contains_cat(&self, contains_cat: bool) {
        self.contains_cat.store(contains_cat, Ordering::SeqCst);
    }

    /// Number of images analysed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageService for FixedImageService {
    fn image_contains_cat(
        &self,
        _image: &Image,
        _confidence_threshold: f32,
    ) -> Result<bool, ImageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.contains_cat.load(Ordering::SeqCst))
    }
}
