//! Rasterization of [`ChartSpec`]s into PNG files.

use super::font::{draw_text, fill_rect, text_height, text_width};
use super::{ChartKind, ChartSpec};
use crate::error::{Result, ScrapeError};
use image::{ImageFormat, Rgb, RgbImage};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path;

/// Turns a chart description into a file.
pub trait ChartRenderer {
    fn render(&self, chart: &ChartSpec, path: &Path) -> Result<()>;
}

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([40, 40, 40]);
const AXIS: Rgb<u8> = Rgb([160, 160, 160]);

/// Slice and series colors, cycled.
const PALETTE: [Rgb<u8>; 8] = [
    Rgb([253, 214, 55]),
    Rgb([107, 174, 214]),
    Rgb([240, 96, 96]),
    Rgb([116, 196, 118]),
    Rgb([158, 154, 200]),
    Rgb([253, 141, 60]),
    Rgb([99, 99, 99]),
    Rgb([231, 41, 138]),
];

const TITLE_SCALE: u32 = 3;
const LABEL_SCALE: u32 = 1;
const TITLE_BAND: i64 = 70;
const MARGIN: i64 = 50;

/// PNG renderer backed by the `image` crate.
#[derive(Debug, Clone, Copy)]
pub struct PngRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Drawing area below the title band.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
}

impl PlotArea {
    fn width(&self) -> i64 {
        self.right - self.left
    }

    fn height(&self) -> i64 {
        self.bottom - self.top
    }
}

impl PngRenderer {
    /// Draw `chart` into a fresh image.
    pub fn draw(&self, chart: &ChartSpec) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.width, self.height, BACKGROUND);
        self.draw_title(&mut img, &chart.title);

        let area = PlotArea {
            left: MARGIN,
            top: TITLE_BAND,
            right: self.width as i64 - MARGIN,
            bottom: self.height as i64 - MARGIN,
        };
        if area.width() <= 0 || area.height() <= 0 {
            return img;
        }

        let values: Vec<f64> = chart.points.iter().map(|p| clamp_value(p.value)).collect();
        match chart.kind {
            ChartKind::Bar => {
                draw_axes(&mut img, area);
                draw_bars(&mut img, area, &values);
            }
            ChartKind::Line => {
                draw_axes(&mut img, area);
                draw_polyline(&mut img, area, &values);
            }
            ChartKind::Pie => {
                let labels: Vec<&str> = chart.points.iter().map(|p| p.label.as_str()).collect();
                draw_pie(&mut img, area, &values, &labels);
            }
        }
        img
    }

    fn draw_title(&self, img: &mut RgbImage, title: &str) {
        let w = text_width(title, TITLE_SCALE) as i64;
        let x = ((self.width as i64 - w) / 2).max(0);
        let y = (TITLE_BAND - text_height(TITLE_SCALE) as i64) / 2;
        draw_text(img, x, y, title, TITLE_SCALE, INK);
    }
}

impl ChartRenderer for PngRenderer {
    fn render(&self, chart: &ChartSpec, path: &Path) -> Result<()> {
        self.draw(chart)
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| ScrapeError::Image {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Negative and non-finite values draw as zero.
fn clamp_value(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

fn max_value(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

fn draw_axes(img: &mut RgbImage, area: PlotArea) {
    fill_rect(img, area.left, area.top, 1, area.height() + 1, AXIS);
    fill_rect(img, area.left, area.bottom, area.width() + 1, 1, AXIS);
}

/// `918` for whole numbers, `6.90` otherwise.
fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

/// Height in pixels of `value` on a scale topping out at `max`.
fn scaled(value: f64, max: f64, span: i64) -> i64 {
    if max <= 0.0 {
        return 0;
    }
    ((value / max) * span as f64).round() as i64
}

fn draw_bars(img: &mut RgbImage, area: PlotArea, values: &[f64]) {
    if values.is_empty() {
        return;
    }
    let max = max_value(values);
    let slot = area.width() as f64 / values.len() as f64;
    let bar_w = ((slot * 0.7).round() as i64).max(1);

    for (i, v) in values.iter().enumerate() {
        let h = scaled(*v, max, area.height());
        let x = area.left + 1 + (i as f64 * slot + (slot - bar_w as f64) / 2.0).round() as i64;
        fill_rect(img, x, area.bottom - h, bar_w, h, PALETTE[0]);
    }
}

fn draw_polyline(img: &mut RgbImage, area: PlotArea, values: &[f64]) {
    if values.is_empty() {
        return;
    }
    let max = max_value(values);
    let step = if values.len() > 1 {
        area.width() as f64 / (values.len() - 1) as f64
    } else {
        0.0
    };

    let points: Vec<(i64, i64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if values.len() > 1 {
                area.left + (i as f64 * step).round() as i64
            } else {
                area.left + area.width() / 2
            };
            (x, area.bottom - scaled(*v, max, area.height()))
        })
        .collect();

    for pair in points.windows(2) {
        draw_line(img, pair[0], pair[1], PALETTE[1]);
        draw_line(img, (pair[0].0, pair[0].1 - 1), (pair[1].0, pair[1].1 - 1), PALETTE[1]);
    }
    for (x, y) in &points {
        fill_rect(img, x - 2, y - 2, 5, 5, PALETTE[1]);
    }
}

/// Bresenham line, clipped per pixel.
fn draw_line(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        fill_rect(img, x, y, 1, 1, color);
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn draw_pie(img: &mut RgbImage, area: PlotArea, values: &[f64], labels: &[&str]) {
    // Pie on the left two thirds, legend on the right third.
    let pie_w = area.width() * 2 / 3;
    let radius = (pie_w.min(area.height()) / 2 - 10).max(1);
    let cx = area.left + pie_w / 2;
    let cy = area.top + area.height() / 2;

    let total: f64 = values.iter().sum();
    if total > 0.0 {
        // Cumulative fraction at the end of each slice.
        let mut bounds = Vec::with_capacity(values.len());
        let mut acc = 0.0;
        for v in values {
            acc += v / total;
            bounds.push(acc);
        }

        for py in (cy - radius)..=(cy + radius) {
            for px in (cx - radius)..=(cx + radius) {
                let (dx, dy) = ((px - cx) as f64, (py - cy) as f64);
                if dx * dx + dy * dy > (radius * radius) as f64 {
                    continue;
                }
                // Clockwise from twelve o'clock, in [0, 1).
                let angle = (dy.atan2(dx) + FRAC_PI_2).rem_euclid(TAU) / TAU;
                let slice = bounds
                    .iter()
                    .position(|b| angle < *b)
                    .unwrap_or(values.len() - 1);
                fill_rect(img, px, py, 1, 1, PALETTE[slice % PALETTE.len()]);
            }
        }
    } else {
        draw_circle_outline(img, cx, cy, radius, AXIS);
    }

    draw_legend(img, area.left + pie_w + 10, area.top + 10, area.bottom, values, labels);
}

fn draw_circle_outline(img: &mut RgbImage, cx: i64, cy: i64, radius: i64, color: Rgb<u8>) {
    let steps = (radius * 8).max(8);
    for i in 0..steps {
        let t = i as f64 / steps as f64 * TAU;
        let x = cx + (radius as f64 * t.cos()).round() as i64;
        let y = cy + (radius as f64 * t.sin()).round() as i64;
        fill_rect(img, x, y, 1, 1, color);
    }
}

fn draw_legend(img: &mut RgbImage, x: i64, top: i64, bottom: i64, values: &[f64], labels: &[&str]) {
    let line = text_height(LABEL_SCALE) as i64 + 8;
    let mut y = top;
    for (i, (label, value)) in labels.iter().zip(values).enumerate() {
        if y + line > bottom {
            break;
        }
        fill_rect(img, x, y, 8, 8, PALETTE[i % PALETTE.len()]);
        let text = format!("{label} ({})", format_value(*value));
        draw_text(img, x + 14, y, &text, LABEL_SCALE, INK);
        y += line;
    }
}
