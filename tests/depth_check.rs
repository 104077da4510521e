use image::{GrayImage, Luma, Rgb, Rgb32FImage, RgbImage};
use event_depth::{DepthMap, Error};
use event_depth::image::image_encoding::ImageEncoding;
use event_depth::io::{depth_check::check_depth_map, load_depth_map, load_disparity_map, save_depth_map};

#[test]
fn test_check_written_depth_map() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("depth.png");
    save_depth_map(&path, &DepthMap::from_row_slice(2, 2, &[0.5, 0.0, 1.0, 0.25])).unwrap();

    let report = check_depth_map(&path).unwrap();
    assert_eq!((report.width, report.height), (2, 2));
    assert_eq!(report.encoding, ImageEncoding::U16);
    assert_eq!((report.raw_min, report.raw_max), (0.0, 256.0));
    assert_eq!((report.depth_min, report.depth_max), (0.0, 1.0));

    let depth = load_depth_map(&path).unwrap();
    assert_eq!(depth.buffer[(0,0)], 0.5);
    assert_eq!(depth.buffer[(1,1)], 0.25);
}

#[test]
fn test_check_rejects_all_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("depth.png");
    save_depth_map(&path, &DepthMap::zeros(3, 3)).unwrap();
    assert!(matches!(check_depth_map(&path), Err(Error::InvalidInput(_))));
}

#[test]
fn test_check_rejects_wrong_layout() {
    let dir = tempfile::tempdir().unwrap();
    let rgb_path = dir.path().join("rgb.png");
    RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3])).save(&rgb_path).unwrap();
    assert!(matches!(check_depth_map(&rgb_path), Err(Error::InvalidInput(_))));

    let gray_path = dir.path().join("gray.png");
    GrayImage::from_pixel(2, 2, Luma([9])).save(&gray_path).unwrap();
    assert!(matches!(check_depth_map(&gray_path), Err(Error::InvalidInput(_))));
}

#[test]
fn test_check_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(check_depth_map(&dir.path().join("missing.png")), Err(Error::Io{..})));
}

#[test]
fn test_check_float_depth_map() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("depth.exr");
    let mut image = Rgb32FImage::from_pixel(3, 2, Rgb([0.0, 0.0, 0.0]));
    image.put_pixel(1, 0, Rgb([2.5, 2.5, 2.5]));
    image.put_pixel(2, 1, Rgb([0.75, 0.75, 0.75]));
    image.save(&path).unwrap();

    let report = check_depth_map(&path).unwrap();
    assert_eq!((report.width, report.height), (3, 2));
    assert_eq!(report.encoding, ImageEncoding::F32);
    assert_eq!((report.raw_min, report.raw_max), (0.0, 2.5));
    assert_eq!((report.depth_min, report.depth_max), (0.0, 2.5));
}

#[test]
fn test_check_float_rejects_negative_and_mixed_channels() {
    let dir = tempfile::tempdir().unwrap();
    let negative_path = dir.path().join("negative.exr");
    let mut negative = Rgb32FImage::from_pixel(2, 2, Rgb([1.0, 1.0, 1.0]));
    negative.put_pixel(0, 1, Rgb([-0.5, -0.5, -0.5]));
    negative.save(&negative_path).unwrap();
    assert!(matches!(check_depth_map(&negative_path), Err(Error::InvalidInput(_))));

    let color_path = dir.path().join("color.exr");
    Rgb32FImage::from_pixel(2, 2, Rgb([1.0, 2.0, 1.0])).save(&color_path).unwrap();
    assert!(matches!(check_depth_map(&color_path), Err(Error::InvalidInput(_))));
}

#[test]
fn test_rgb8_raster_keeps_codes() {
    let dir = tempfile::tempdir().unwrap();
    let rgb_path = dir.path().join("rgb.png");
    RgbImage::from_pixel(2, 1, Rgb([100, 100, 100])).save(&rgb_path).unwrap();
    let gray_path = dir.path().join("gray.png");
    GrayImage::from_pixel(2, 1, Luma([100])).save(&gray_path).unwrap();

    let from_rgb = load_disparity_map(&rgb_path).unwrap();
    let from_gray = load_disparity_map(&gray_path).unwrap();
    assert_eq!(from_rgb.buffer[(0,1)], 100.0 / 256.0);
    assert_eq!(from_rgb, from_gray);
}
