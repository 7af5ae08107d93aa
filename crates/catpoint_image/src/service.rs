use crate::Image;
use crate::ImageError;

/// Trait for cat detection backends
///
/// `confidence_threshold` is a percentage in `0.0..=100.0`: a backend should
/// only report a cat when it is at least that confident.
pub trait ImageService {
    /// Returns true if the image contains a cat.
    fn image_contains_cat(
        &self,
        image: &Image,
        confidence_threshold: f32,
    ) -> Result<bool, ImageError>;
}

impl<T: ImageService + ?Sized> ImageService for Box<T> {
    fn image_contains_cat(
        &self,
        image: &Image,
        confidence_threshold: f32,
    ) -> Result<bool, ImageError> {
        (**self).image_contains_cat(image, confidence_threshold)
    }
}

impl<T: ImageService + ?Sized> ImageService for &T {
    fn image_contains_cat(
        &self,
        image: &Image,
        confidence_threshold: f32,
    ) -> Result<bool, ImageError> {
        (**self).image_contains_cat(image, confidence_threshold)
    }
}
