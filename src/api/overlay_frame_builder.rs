use crate::core::{HostChart, PixelPoint};
use crate::interaction::Trendline;
use crate::render::{
    CirclePrimitive, LinePrimitive, LineStrokeStyle, OverlayFrame, OverlaySurface,
    clip_segment_to_bottom,
};

use super::engine::sanitize_ratio;
use super::{OverlayStyle, TrendlineEngine};

#[cfg(feature = "cairo-backend")]
use crate::error::ChartResult;
#[cfg(feature = "cairo-backend")]
use crate::render::CairoOverlayRenderer;

/// Per-pass inputs shared by every trendline in the frame.
#[derive(Debug, Clone, Copy)]
struct OverlayRenderContext {
    /// Lowest y a segment may reach; `None` leaves segments unclipped.
    clip_bottom: Option<f64>,
    style: OverlayStyle,
}

impl OverlayRenderContext {
    fn contains_y(self, y: f64) -> bool {
        self.clip_bottom.is_none_or(|bottom| y <= bottom)
    }
}

impl<H: HostChart, S: OverlaySurface> TrendlineEngine<H, S> {
    /// Materializes the overlay for the current state and scales.
    ///
    /// Returns `None` while the host has no drawable plot area.
    #[must_use]
    pub fn overlay_frame(&self) -> Option<OverlayFrame> {
        self.build_overlay_frame()
    }

    pub(super) fn build_overlay_frame(&self) -> Option<OverlayFrame> {
        let viewport = self.host.plot_size();
        if !viewport.is_valid() {
            return None;
        }
        let mut frame = OverlayFrame::new(viewport, sanitize_ratio(self.host.device_pixel_ratio()));
        let ctx = OverlayRenderContext {
            clip_bottom: self
                .main_pane_floor_y()
                .map(|floor| floor + self.config.pane_clip_margin_px),
            style: self.config.overlay_style,
        };

        for trendline in self.trendlines.values() {
            self.append_trendline_primitives(&mut frame, trendline, ctx);
        }
        self.append_preview_primitives(&mut frame, ctx);
        Some(frame)
    }

    fn append_trendline_primitives(
        &self,
        frame: &mut OverlayFrame,
        trendline: &Trendline,
        ctx: OverlayRenderContext,
    ) {
        let Some((start, end)) = self.resolve_pixels(trendline) else {
            return;
        };
        let Some((clipped_start, clipped_end)) = clip_segment(start, end, ctx) else {
            return;
        };
        let style = ctx.style;

        let (stroke_width, color, endpoint_radius) = if trendline.is_dragging {
            (
                trendline.line_width + style.dragging_width_bonus_px,
                trendline.color.with_alpha(trendline.color.alpha * style.dragging_alpha),
                style.dragging_endpoint_radius_px,
            )
        } else if trendline.is_selected {
            (
                trendline.line_width + style.selected_width_bonus_px,
                trendline.color,
                style.selected_endpoint_radius_px,
            )
        } else {
            (trendline.line_width, trendline.color, style.endpoint_radius_px)
        };

        frame.lines.push(LinePrimitive::new(
            clipped_start.x,
            clipped_start.y,
            clipped_end.x,
            clipped_end.y,
            stroke_width,
            color,
        ));

        let show_grab_handle = trendline.is_selected && !trendline.is_dragging;
        for endpoint in [start, end] {
            if !ctx.contains_y(endpoint.y) {
                continue;
            }
            frame.circles.push(
                CirclePrimitive::new(endpoint.x, endpoint.y, endpoint_radius, trendline.color)
                    .with_outline(style.endpoint_outline_color, style.endpoint_outline_width_px),
            );
            if show_grab_handle {
                append_grab_handle(frame, endpoint, style);
            }
        }
    }

    fn append_preview_primitives(&self, frame: &mut OverlayFrame, ctx: OverlayRenderContext) {
        let (Some(pending), Some(preview_end)) =
            (self.current_trendline.as_ref(), self.preview_end_point)
        else {
            return;
        };
        let mapper = self.mapper();
        let (Some(start), Some(end)) = (
            mapper.to_pixel(pending.start_point),
            mapper.to_pixel(preview_end),
        ) else {
            return;
        };
        let Some((start, end)) = clip_segment(start, end, ctx) else {
            return;
        };
        let style = ctx.style;
        frame.lines.push(
            LinePrimitive::new(
                start.x,
                start.y,
                end.x,
                end.y,
                pending.line_width,
                pending.color.with_alpha(pending.color.alpha * style.preview_alpha),
            )
            .with_stroke_style(LineStrokeStyle::Dashed {
                dash_px: style.preview_dash_px,
                gap_px: style.preview_gap_px,
            }),
        );
    }
}

fn clip_segment(
    start: PixelPoint,
    end: PixelPoint,
    ctx: OverlayRenderContext,
) -> Option<(PixelPoint, PixelPoint)> {
    match ctx.clip_bottom {
        Some(bottom) => clip_segment_to_bottom(start, end, bottom),
        None => Some((start, end)),
    }
}

fn append_grab_handle(frame: &mut OverlayFrame, center: PixelPoint, style: OverlayStyle) {
    let accent = style.accent_color;
    frame.circles.push(
        CirclePrimitive::new(
            center.x,
            center.y,
            style.grab_handle_outer_radius_px,
            accent.with_alpha(accent.alpha * style.grab_handle_outer_alpha),
        )
        .with_outline(
            style.endpoint_outline_color,
            style.grab_handle_outline_width_px,
        ),
    );
    frame.circles.push(CirclePrimitive::new(
        center.x,
        center.y,
        style.grab_handle_inner_radius_px,
        accent,
    ));
}

#[cfg(feature = "cairo-backend")]
impl<H: HostChart> TrendlineEngine<H, CairoOverlayRenderer> {
    /// Draws the current overlay into an external cairo context, typically
    /// from a GTK draw callback. The context must already be in CSS pixels.
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()> {
        if !self.enter() {
            return Ok(());
        }
        let Some(frame) = self.build_overlay_frame() else {
            return Ok(());
        };
        match self.surface.as_mut() {
            Some(surface) => surface.render_on_cairo_context(context, &frame),
            None => Ok(()),
        }
    }
}
