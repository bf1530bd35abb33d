#[cfg(feature = "integration-tests")]
mod common;

/// Without a model the depth target stays cleared, so the whole quad shows the far colour.
#[test]
#[cfg(feature = "integration-tests")]
fn should_fill_the_view_with_the_far_colour() {
    use common::test_utils::MockLoader;
    use depth_sketch::{SketchConfig, flow::ImageTestResult};

    golden_image_test!(
        SketchConfig::skull(),
        MockLoader::failing(),
        3,
        |ctx: &depth_sketch::context::Context, image: &image::RgbaImage| {
            let width = ctx.config.width;
            let height = ctx.config.height;
            let centre = *image.get_pixel(width / 2, height / 2);
            assert_ne!(centre, image::Rgba([0, 0, 0, 255]), "quad was not drawn");
            // far colour green is 0.10, written without sRGB encoding (26, not 89)
            assert!((24..=28).contains(&centre[1]), "far colour stored as {centre:?}");
            for (x, y) in [(width / 4, height / 4), (3 * width / 4, 3 * height / 4)] {
                assert_eq!(*image.get_pixel(x, y), centre, "gradient not uniform at ({x}, {y})");
            }
            ImageTestResult::Passed
        }
    );
}
