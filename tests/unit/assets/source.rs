use super::*;
use crate::{
    assets::{decode::encode_png, fetch::FetchConfig},
    foundation::error::BannerError,
};

#[test]
fn parse_distinguishes_urls_from_paths() {
    assert_eq!(
        ImageSource::parse(" https://cdn.example.com/a.jpg "),
        ImageSource::Url("https://cdn.example.com/a.jpg".to_string())
    );
    assert_eq!(
        ImageSource::parse("HTTP://example.com/b.png"),
        ImageSource::Url("HTTP://example.com/b.png".to_string())
    );
    assert_eq!(
        ImageSource::parse("assets/bg.png"),
        ImageSource::File(PathBuf::from("assets/bg.png"))
    );
    assert_eq!(
        ImageSource::parse("ftp://example.com/c.png"),
        ImageSource::File(PathBuf::from("ftp://example.com/c.png"))
    );
}

#[test]
fn file_source_loads_from_disk() {
    let dir = std::env::temp_dir().join(format!("promocard_source_test_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("p.png");
    let img = image::RgbaImage::from_pixel(4, 5, image::Rgba([1, 2, 3, 255]));
    std::fs::write(&path, encode_png(&img).unwrap()).unwrap();

    let fetcher = ImageFetcher::new(FetchConfig::default()).unwrap();
    let loaded = ImageSource::File(path).load(&fetcher).unwrap();
    assert_eq!((loaded.width(), loaded.height()), (4, 5));
}

#[test]
fn file_source_reports_undecodable_file() {
    let dir = std::env::temp_dir().join(format!("promocard_source_bad_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bad.png");
    std::fs::write(&path, b"garbage").unwrap();

    let fetcher = ImageFetcher::new(FetchConfig::default()).unwrap();
    let err = ImageSource::File(path).load(&fetcher).unwrap_err();
    assert!(matches!(err, BannerError::Decode(ref m) if m.contains("bad.png")));
}
