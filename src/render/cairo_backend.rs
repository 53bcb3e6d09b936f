use cairo::{Context, Format, ImageSurface, LineCap, Operator};
use std::f64::consts::TAU;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, CursorStyle, LineStrokeStyle, OverlayFrame, OverlaySurface, PointerPolicy,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub circles_drawn: usize,
}

/// Cairo overlay backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `OverlaySurface::render`
/// - in-place rendering on an external Cairo context (for example a GTK
///   `DrawingArea` callback) through `render_on_cairo_context`
///
/// The offscreen surface is transparent between frames so it can be
/// composited over the chart.
#[derive(Debug)]
pub struct CairoOverlayRenderer {
    surface: ImageSurface,
    pointer_policy: PointerPolicy,
    cursor: CursorStyle,
    last_stats: CairoRenderStats,
    detached: bool,
}

impl CairoOverlayRenderer {
    pub fn new(viewport: Viewport, device_pixel_ratio: f64) -> ChartResult<Self> {
        Ok(Self {
            surface: create_surface(viewport, device_pixel_ratio)?,
            pointer_policy: PointerPolicy::default(),
            cursor: CursorStyle::default(),
            last_stats: CairoRenderStats::default(),
            detached: false,
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn pointer_policy(&self) -> (PointerPolicy, CursorStyle) {
        (self.pointer_policy, self.cursor)
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Draws a frame into an external context that is already in CSS pixel
    /// space; the device scale is left to the caller.
    pub fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &OverlayFrame,
    ) -> ChartResult<()> {
        frame.validate()?;
        self.last_stats = draw_frame(context, frame)?;
        Ok(())
    }
}

impl OverlaySurface for CairoOverlayRenderer {
    fn resize(&mut self, viewport: Viewport, device_pixel_ratio: f64) -> ChartResult<()> {
        if self.detached {
            return Err(ChartError::Surface("cairo overlay is detached".to_owned()));
        }
        self.surface = create_surface(viewport, device_pixel_ratio)?;
        Ok(())
    }

    fn render(&mut self, frame: &OverlayFrame) -> ChartResult<()> {
        if self.detached {
            return Err(ChartError::Surface("cairo overlay is detached".to_owned()));
        }
        frame.validate()?;

        let (width, height) = frame.backing_size();
        if i64::from(self.surface.width()) != i64::from(width)
            || i64::from(self.surface.height()) != i64::from(height)
        {
            self.surface = create_surface(frame.viewport, frame.device_pixel_ratio)?;
        }

        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        context.set_operator(Operator::Clear);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        context.set_operator(Operator::Over);
        context.scale(frame.device_pixel_ratio, frame.device_pixel_ratio);

        self.last_stats = draw_frame(&context, frame)?;
        self.surface.flush();
        Ok(())
    }

    fn set_pointer_policy(&mut self, policy: PointerPolicy, cursor: CursorStyle) {
        self.pointer_policy = policy;
        self.cursor = cursor;
    }

    fn detach(&mut self) {
        self.detached = true;
    }
}

fn draw_frame(context: &Context, frame: &OverlayFrame) -> ChartResult<CairoRenderStats> {
    let mut stats = CairoRenderStats::default();
    context.set_line_cap(LineCap::Round);

    for line in &frame.lines {
        apply_color(context, line.color);
        context.set_line_width(line.stroke_width);
        match line.stroke_style {
            LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
            LineStrokeStyle::Dashed { dash_px, gap_px } => {
                context.set_dash(&[dash_px, gap_px], 0.0);
            }
        }
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        stats.lines_drawn += 1;
    }
    context.set_dash(&[], 0.0);

    for circle in &frame.circles {
        context.new_path();
        context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
        apply_color(context, circle.fill_color);
        match circle.outline {
            Some(outline) => {
                context
                    .fill_preserve()
                    .map_err(|err| map_backend_error("failed to fill circle", err))?;
                apply_color(context, outline.color);
                context.set_line_width(outline.width);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke circle outline", err))?;
            }
            None => {
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill circle", err))?;
            }
        }
        stats.circles_drawn += 1;
    }

    Ok(stats)
}

fn create_surface(viewport: Viewport, device_pixel_ratio: f64) -> ChartResult<ImageSurface> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    let (width, height) = viewport.scaled(device_pixel_ratio);
    let width = i32::try_from(width)
        .map_err(|_| ChartError::Surface("overlay backing width exceeds i32".to_owned()))?;
    let height = i32::try_from(height)
        .map_err(|_| ChartError::Surface("overlay backing height exceeds i32".to_owned()))?;
    ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Surface(format!("{prefix}: {err}"))
}
