//! Image analysis for the catpoint security system.
//!
//! The security controller only needs one answer from a camera frame: does it
//! contain a cat? That capability is expressed by [`ImageService`]. Real
//! recognition backends live outside this workspace; the services here are
//! fakes used by the console binary and by tests.

mod error;
mod fake;
mod fixed;
mod image;
mod service;

pub use error::ImageError;
pub use fake::FakeImageService;
pub use fixed::FixedImageService;
pub use image::Image;
pub use service::ImageService;
