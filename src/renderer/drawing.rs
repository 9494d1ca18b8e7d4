use crate::renderer::fonts::FontConfig;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut,
};
use imageproc::rect::Rect;

pub fn horizontal_line(image: &mut RgbaImage, x: u32, y: u32, width: u32) {
    draw_line_segment_mut(
        image,
        (x as f32, y as f32),
        (width as f32, y as f32),
        Rgba([60, 60, 60, 255]),
    );
}

pub fn text(
    image: &mut RgbaImage,
    colour: Rgba<u8>,
    x: i32,
    y: i32,
    font_config: &FontConfig,
    text: &str,
) {
    draw_text_mut(
        image,
        colour,
        x,
        y,
        font_config.scale,
        &font_config.font,
        text,
    );
}

/// Filled box with a one pixel border, used behind each label.
pub fn panel_box(
    image: &mut RgbaImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    fill: Rgba<u8>,
    border: Rgba<u8>,
) {
    if width == 0 || height == 0 {
        return;
    }
    let rect = Rect::at(x, y).of_size(width, height);
    draw_filled_rect_mut(image, rect, fill);
    draw_hollow_rect_mut(image, rect, border);
}

/// `fraction` is clamped to [0, 1] before drawing.
#[allow(clippy::too_many_arguments)]
pub fn progress_bar(
    image: &mut RgbaImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    fraction: f32,
    track: Rgba<u8>,
    colour: Rgba<u8>,
) {
    if width == 0 || height == 0 {
        return;
    }

    // Track
    draw_filled_rect_mut(image, Rect::at(x, y).of_size(width, height), track);

    // Progress
    let bar_width = (fraction.clamp(0.0, 1.0) * width as f32) as u32;

    if bar_width > 0 {
        draw_filled_rect_mut(image, Rect::at(x, y).of_size(bar_width, height), colour);
    }

    // Border
    draw_hollow_rect_mut(
        image,
        Rect::at(x, y).of_size(width, height),
        Rgba([100, 100, 100, 255]),
    );
}
