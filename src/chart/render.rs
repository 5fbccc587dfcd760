use std::io::Cursor;
use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use plotters::prelude::*;

use super::{ChartData, ChartError};

pub const CHART_WIDTH: u32 = 1000;
pub const CHART_HEIGHT: u32 = 600;
pub const CHART_TITLE: &str = "Rate List of Sweets";
pub const BAR_COLOR: RGBColor = RGBColor(0, 0, 128);

const BAR_WIDTH: f64 = 0.8;

/// Family every chart text style resolves to, including plotters' own defaults.
const FONT_FAMILY: &str = "sans-serif";
static FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static FONT_REGISTRATION: OnceLock<Result<(), String>> = OnceLock::new();

/// Registers the bundled font with plotters. Runs once per process; later
/// calls return the first outcome.
pub fn ensure_font() -> Result<(), ChartError> {
    FONT_REGISTRATION
        .get_or_init(|| {
            plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES)
                .map_err(|_| "bundled chart font could not be parsed".to_string())
        })
        .clone()
        .map_err(ChartError::RenderError)
}

/// Rasterizes the chart and encodes it as PNG.
pub fn render_png(data: &ChartData) -> Result<Vec<u8>, ChartError> {
    ensure_font()?;
    let mut pixels = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    draw(data, &mut pixels)?;
    encode_png(pixels)
}

/// Wraps PNG bytes in a `data:` URI suitable for an `<img src>`.
pub fn data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

fn draw(data: &ChartData, pixels: &mut [u8]) -> Result<(), ChartError> {
    let root = BitMapBackend::with_buffer(pixels, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(CHART_TITLE, (FONT_FAMILY, 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(data.x_range(), data.y_range())
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(data.categories().len().max(1))
        .x_label_formatter(&|x| data.label_at(*x).unwrap_or_default().to_string())
        .y_desc("Cost")
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(data.bars().iter().map(|bar| {
            let centre = bar.category as f64;
            Rectangle::new(
                [
                    (centre - BAR_WIDTH / 2.0, 0.0),
                    (centre + BAR_WIDTH / 2.0, bar.cost as f64),
                ],
                BAR_COLOR.filled(),
            )
        }))
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    Ok(())
}

fn encode_png(pixels: Vec<u8>) -> Result<Vec<u8>, ChartError> {
    let image = image::RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, pixels).ok_or_else(|| {
        ChartError::RenderError("pixel buffer does not match chart size".to_string())
    })?;
    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, image::ImageFormat::Png)
        .map_err(render_error)?;
    Ok(png.into_inner())
}

fn render_error(e: impl std::fmt::Display) -> ChartError {
    ChartError::RenderError(e.to_string())
}
