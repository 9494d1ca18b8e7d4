use crate::dashboard::{DashboardState, TITLE};
use crate::renderer::colours::Colours;
use crate::renderer::drawing;
use crate::renderer::fonts::Fonts;
use image::RgbaImage;
use std::time::Instant;

pub(crate) struct RenderContext<'a> {
    pub state: &'a DashboardState,
    pub fonts: Option<&'a Fonts>,
    pub colours: &'a Colours,
    pub image: &'a mut RgbaImage,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub now: Instant,
}

pub(crate) fn render_header(ctx: &mut RenderContext) {
    let Some(fonts) = ctx.fonts else {
        return;
    };

    drawing::text(
        ctx.image,
        ctx.colours.header,
        (ctx.x + 10) as i32,
        ctx.y as i32,
        &fonts.title,
        TITLE,
    );

    // Time of the last accepted reading at top right
    if let Some(updated) = ctx.state.last_update() {
        let updated_text = updated.format("%H:%M:%S").to_string();
        drawing::text(
            ctx.image,
            ctx.colours.header,
            ctx.width as i32 - 90,
            ctx.y as i32,
            &fonts.label,
            &updated_text,
        );
    }
}

pub(crate) fn render_metric_panels(ctx: &mut RenderContext, height: u32) {
    let panels = ctx.state.panels();
    let slot_height = height / panels.len().max(1) as u32;

    let box_height = 40;
    let text_offset = 10;
    let bar_gap = 8;
    let bar_height = 24;
    let inner_width = ctx.width.saturating_sub(20);

    let mut y_pos = ctx.y;

    for panel in panels {
        let x = (ctx.x + 10) as i32;

        drawing::panel_box(
            ctx.image,
            x,
            y_pos as i32,
            inner_width,
            box_height,
            ctx.colours.panel,
            ctx.colours.border,
        );

        if let Some(fonts) = ctx.fonts {
            drawing::text(
                ctx.image,
                panel.highlight().colour_at(ctx.now),
                x + 12,
                (y_pos + text_offset) as i32,
                &fonts.label,
                panel.text(),
            );
        }

        drawing::progress_bar(
            ctx.image,
            x,
            (y_pos + box_height + bar_gap) as i32,
            inner_width,
            bar_height,
            panel.fill_fraction(),
            ctx.colours.panel,
            ctx.colours.bar,
        );

        y_pos += slot_height.max(box_height + bar_gap + bar_height);
    }
}
