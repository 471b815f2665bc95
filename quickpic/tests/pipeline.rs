use anyhow::Result;
use imageproc::image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use quickpic::image::decode;
use quickpic::pipeline::{self, Input};
use quickpic::{Canvas, Error, OversizePolicy, Session, SourceImage, Tool, ToolConfig};

use std::io::Cursor;

fn encoded(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

#[test]
fn jpeg_file_becomes_splash_png() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("photo.JPG");
    let jpeg = encoded(
        DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 200, Rgb([40, 80, 120]))),
        ImageFormat::Jpeg,
    );
    std::fs::write(&input, jpeg)?;

    let artifact = pipeline::run(&Input::Path(input), &ToolConfig::default())?;
    assert_eq!(artifact.file_name, "photo-1284x2778.png");
    assert_eq!(artifact.dimensions, (1284, 2778));
    assert_eq!(artifact.source_dimensions, (300, 200));
    assert_eq!(artifact.offset, (492, 1289));

    let out_dir = dir.path().join("out");
    let written = artifact.write_to(&out_dir)?;
    assert_eq!(written, out_dir.join("photo-1284x2778.png"));

    let png = decode("photo-1284x2778.png", &std::fs::read(&written)?)?;
    assert_eq!(png.dimensions(), (1284, 2778));
    assert_eq!(png.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    assert_eq!(png.get_pixel(491, 1289)[3], 0);
    assert_eq!(png.get_pixel(492, 1289)[3], 255);
    assert_eq!(png.get_pixel(791, 1488)[3], 255);
    assert_eq!(png.get_pixel(792, 1488)[3], 0);
    Ok(())
}

#[test]
fn pasted_bytes_keep_exact_pixels() -> Result<()> {
    let src = RgbaImage::from_fn(9, 5, |x, y| Rgba([x as u8 * 20, y as u8 * 40, 7, 99]));
    let input = Input::Bytes {
        name: "archive.tar.gz".to_string(),
        data: encoded(DynamicImage::ImageRgba8(src.clone()), ImageFormat::Png),
    };

    let artifact = pipeline::run(&input, &ToolConfig::default())?;
    assert_eq!(artifact.file_name, "archive.tar-1284x2778.png");

    let png = decode(&artifact.file_name, &artifact.png)?;
    let (ox, oy) = (637, 1386);
    assert_eq!(artifact.offset, (ox as i64, oy as i64));
    for (x, y, px) in src.enumerate_pixels() {
        assert_eq!(png.get_pixel(ox + x, oy + y), px);
    }
    Ok(())
}

#[test]
fn same_input_gives_identical_bytes() -> Result<()> {
    let data = encoded(
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 64, Rgba([1, 2, 3, 4]))),
        ImageFormat::Png,
    );
    let input = Input::Bytes {
        name: "image".to_string(),
        data,
    };
    let config = ToolConfig {
        canvas: Tool::Square.into(),
        ..Default::default()
    };

    let first = pipeline::run(&input, &config)?;
    let second = pipeline::run(&input, &config)?;
    assert_eq!(first.file_name, "image-1284x2778.png");
    assert_eq!(first.png, second.png);
    assert_eq!(first.data_url(), second.data_url());
    assert!(first.data_url().starts_with("data:image/png;base64,iVBORw0KGgo"));
    Ok(())
}

#[test]
fn oversized_sources_follow_the_policy() -> Result<()> {
    let canvas = Canvas::custom(50, 40)?;
    let source = SourceImage::from_pixels(
        "wide.png",
        RgbaImage::from_pixel(120, 30, Rgba([255, 255, 255, 255])),
    )?;

    let mut session = Session::new(ToolConfig {
        canvas,
        oversize: OversizePolicy::Crop,
        ..Default::default()
    });
    session.load(source.clone());
    let cropped = session.render()?;
    assert_eq!(cropped.dimensions, (50, 40));
    assert_eq!(cropped.offset, (-35, 5));

    let mut session = Session::new(ToolConfig {
        canvas,
        oversize: OversizePolicy::Reject,
        ..Default::default()
    });
    session.load(source.clone());
    assert!(matches!(session.render(), Err(Error::Oversized { .. })));

    let mut session = Session::new(ToolConfig {
        canvas,
        oversize: OversizePolicy::Fit,
        ..Default::default()
    });
    session.load(source);
    let fitted = session.render()?;
    assert_eq!(fitted.dimensions, (50, 40));
    assert_eq!(fitted.offset, (0, 14));
    assert_eq!(fitted.file_name, "wide-50x40.png");
    Ok(())
}

#[test]
fn undecodable_upload_is_an_explicit_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("broken.png");
    std::fs::write(&input, b"\x89PNG but not really")?;

    let err = pipeline::run(&Input::Path(input), &ToolConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Decode { ref name, .. } if name == "broken.png"));

    let session = Session::default();
    let err = session.save(dir.path()).unwrap_err();
    assert!(matches!(err, Error::NothingLoaded));
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}
