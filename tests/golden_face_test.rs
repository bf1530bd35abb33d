#[cfg(feature = "integration-tests")]
mod common;

/// White background, black strips: without a model every strip shows `1 - 1 = 0`.
#[test]
#[cfg(feature = "integration-tests")]
fn should_draw_dark_strips_over_the_clear_colour() {
    use common::test_utils::MockLoader;
    use depth_sketch::{SketchConfig, flow::ImageTestResult};

    let mut config = SketchConfig::face();
    config.clear_colour = wgpu::Color::WHITE;

    golden_image_test!(
        config,
        MockLoader::failing(),
        3,
        |ctx: &depth_sketch::context::Context, image: &image::RgbaImage| {
            let x = ctx.config.width / 2;
            let column: Vec<_> = (0..ctx.config.height)
                .map(|y| image.get_pixel(x, y)[1])
                .collect();
            assert!(column.iter().any(|&g| g < 32), "no strip in the centre column");
            assert!(column.iter().any(|&g| g > 224), "background missing");
            ImageTestResult::Passed
        }
    );
}
