use super::*;

#[test]
fn builtin_dimensions_scale() {
    let s = Stencil::builtin(1).unwrap();
    assert_eq!((s.width(), s.height()), (16, 16));

    let s = Stencil::builtin(3).unwrap();
    assert_eq!((s.width(), s.height()), (48, 48));
    // Top-left corner is transparent, the cap top is drawn.
    assert_eq!(s.texel(0, 0), Some(Rgb8::BLACK));
    assert_eq!(s.texel(6 * 3, 0), Some(Rgb8::new(0xD8, 0x28, 0x00)));
    assert_eq!(s.texel(48, 0), None);

    assert!(Stencil::builtin(0).is_err());
}

#[test]
fn from_rgb8_validates_length() {
    let s = Stencil::from_rgb8(2, 1, &[1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(s.texel(1, 0), Some(Rgb8::new(4, 5, 6)));

    let err = Stencil::from_rgb8(2, 2, &[0; 6]).unwrap_err();
    assert!(err.to_string().contains("expects 12 RGB bytes"));
}

#[test]
fn prepare_decodes_png_relative_to_root() {
    let dir = std::path::PathBuf::from("target").join("stencil_prepare");
    std::fs::create_dir_all(&dir).unwrap();

    let img = image::RgbImage::from_raw(2, 1, vec![10, 20, 30, 0, 0, 0]).unwrap();
    img.save(dir.join("sprite.png")).unwrap();

    let src = StencilSource::Png {
        path: PathBuf::from("sprite.png"),
    };
    let s = Stencil::prepare(&src, &dir).unwrap();
    assert_eq!((s.width(), s.height()), (2, 1));
    assert_eq!(s.texel(0, 0), Some(Rgb8::new(10, 20, 30)));
    assert_eq!(s.texel(1, 0), Some(Rgb8::BLACK));

    let missing = StencilSource::Png {
        path: PathBuf::from("nope.png"),
    };
    assert!(Stencil::prepare(&missing, &dir).is_err());
}

#[test]
fn source_serde_defaults_scale() {
    let src: StencilSource = serde_json::from_str(r#"{"kind":"builtin"}"#).unwrap();
    assert_eq!(src, StencilSource::Builtin { scale: 1 });
}

#[test]
fn builtin_rejects_scales_that_overflow() {
    assert_eq!(Stencil::builtin_size(4), Some((64, 64)));
    assert_eq!(Stencil::builtin_size(300_000_000), None);

    let err = Stencil::builtin(300_000_000).unwrap_err();
    assert!(matches!(err, SpriteError::Validation(_)));
    assert!(err.to_string().contains("scale 300000000 is too large"));
}
