use catpoint_image::FakeImageService;
use catpoint_image::FixedImageService;
use catpoint_image::Image;
use catpoint_image::ImageService;

fn detect<S: ImageService>(service: S, image: &Image) -> bool {
    service.image_contains_cat(image, 50.0).unwrap()
}

#[test]
fn test_boxed_service_delegates() {
    let boxed: Box<dyn ImageService> = Box::new(FixedImageService::new(true));
    assert!(detect(boxed, &Image::default()));
}

#[test]
fn test_borrowed_service_delegates() {
    let fixed = FixedImageService::new(false);
    assert!(!detect(&fixed, &Image::default()));
    assert_eq!(fixed.calls(), 1);
}

#[test]
fn test_boxed_fake_is_reproducible() {
    let image = Image::from_bytes(b"not really a jpeg".to_vec());
    let a: Box<dyn ImageService> = Box::new(FakeImageService::with_seed(3));
    let b: Box<dyn ImageService> = Box::new(FakeImageService::with_seed(3));

    for _ in 0..8 {
        assert_eq!(
            a.image_contains_cat(&image, 50.0).unwrap(),
            b.image_contains_cat(&image, 50.0).unwrap()
        );
    }
}
