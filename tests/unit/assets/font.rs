use super::*;
use crate::testing::host_font;

#[test]
fn missing_source_resolves_to_builtin_without_notice() {
    let r = resolve_font(None, 80.0);
    assert!(r.handle.is_builtin());
    assert!(r.notice.is_none());
    assert_eq!(r.handle.size_px(), None);
}

#[test]
fn malformed_bytes_fall_back_with_font_load_notice() {
    let src = FontSource::from_bytes(b"this is not a font".to_vec());
    let r = resolve_font(Some(&src), 80.0);
    assert!(r.handle.is_builtin());
    assert!(matches!(r.notice, Some(BannerError::FontLoad(_))));
}

#[test]
fn empty_bytes_fall_back_with_notice() {
    let src = FontSource::from_bytes(Vec::new());
    let r = resolve_font(Some(&src), 48.0);
    assert!(r.handle.is_builtin());
    assert!(r.notice.unwrap().is_recoverable());
}

#[test]
fn bad_size_falls_back_with_notice() {
    let Some(src) = host_font() else {
        return;
    };
    for size in [0.0, -3.0, f32::NAN, f32::INFINITY] {
        let r = resolve_font(Some(&src), size);
        assert!(r.handle.is_builtin());
        assert!(matches!(r.notice, Some(BannerError::FontLoad(_))));
    }
}

#[test]
fn one_source_resolves_at_many_sizes() {
    let Some(src) = host_font() else {
        return;
    };
    for size in [80.0, 192.0, 12.5] {
        let r = resolve_font(Some(&src), size);
        assert!(r.notice.is_none());
        assert_eq!(r.handle.size_px(), Some(size));
        assert!(!r.handle.family_name().unwrap().trim().is_empty());
    }
}

#[test]
fn layout_line_grows_with_size() {
    let Some(src) = host_font() else {
        return;
    };
    let FontHandle::Outline(small) = resolve_font(Some(&src), 20.0).handle else {
        panic!("expected outline face");
    };
    let FontHandle::Outline(large) = resolve_font(Some(&src), 80.0).handle else {
        panic!("expected outline face");
    };
    let brush = TextBrushRgba8::default();
    let a = small.layout_line("Go", brush).unwrap();
    let b = large.layout_line("Go", brush).unwrap();
    assert!(a.lines().next().is_some());
    assert!(b.width() > a.width());
    assert!(b.height() > a.height());
}

#[test]
fn source_load_reports_missing_file() {
    let err = FontSource::load(Path::new("/nonexistent/promocard/font.ttf")).unwrap_err();
    assert!(err.to_string().contains("read font"));
}
