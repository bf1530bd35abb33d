use depth_sketch::context::pick_surface_format;
use wgpu::TextureFormat;

#[test]
fn prefers_a_linear_surface_format() {
    let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
    assert_eq!(pick_surface_format(&formats), Some(TextureFormat::Bgra8Unorm));
}

#[test]
fn falls_back_to_the_first_format_with_a_linear_view() {
    let formats = [TextureFormat::Rgba8UnormSrgb];
    let format = pick_surface_format(&formats).unwrap();
    assert_eq!(format, TextureFormat::Rgba8UnormSrgb);
    // Rendering goes through the view format, which never encodes to sRGB.
    assert!(!format.remove_srgb_suffix().is_srgb());
}

#[test]
fn no_format_without_capabilities() {
    assert_eq!(pick_surface_format(&[]), None);
}
