//! Rasterization of panels into shape images

use crate::generator::Puzzle;
use crate::io::configuration::{CELL_PIXELS, PANEL_SIZE, SHEET_MARGIN};
use crate::panel::Panel;
use crate::schema::{Attribute, SIZE_SCALES};
use image::{Rgba, RgbaImage};
use std::f64::consts::PI;

/// RGBA fills for the ten `color` ordinals
const COLOR_PALETTE: [[u8; 4]; 10] = [
    [220, 50, 47, 255],   // red
    [60, 160, 60, 255],   // green
    [50, 100, 220, 255],  // blue
    [235, 200, 40, 255],  // yellow
    [130, 70, 180, 255],  // purple
    [240, 140, 30, 255],  // orange
    [235, 130, 180, 255], // pink
    [140, 90, 50, 255],   // brown
    [130, 130, 130, 255], // gray
    [20, 20, 20, 255],    // black
];

const BACKGROUND: [u8; 4] = [255, 255, 255, 255];
const GRID_LINE: [u8; 4] = [190, 190, 190, 255];
const BLANK_CELL: [u8; 4] = [235, 235, 235, 255];

/// Pixel width and height of one rendered panel
pub const fn panel_pixels() -> u32 {
    CELL_PIXELS * PANEL_SIZE as u32
}

/// Rasterize one panel into a square image
///
/// Each occupied cell gets its entity drawn as a filled shape: `type`
/// picks the outline (triangle through circle), `size` scales it within
/// the cell, `angle` rotates it in 45-degree steps, `color` selects the
/// fill. Empty cells show only the cell grid.
pub fn render_panel(panel: &Panel) -> RgbaImage {
    let side = panel_pixels();
    let mut image = RgbaImage::from_pixel(side, side, Rgba(BACKGROUND));
    draw_panel_onto(&mut image, panel, 0, 0);
    image
}

/// Render the 3x3 context sheet with the bottom-right cell left blank
pub fn render_context_sheet(puzzle: &Puzzle) -> RgbaImage {
    let side = panel_pixels();
    let panels = PANEL_SIZE as u32;
    let full = panels * side + (panels + 1) * SHEET_MARGIN;
    let mut sheet = RgbaImage::from_pixel(full, full, Rgba(BACKGROUND));

    for (index, panel) in puzzle.grid.iter().enumerate() {
        let origin_x = SHEET_MARGIN + (index % PANEL_SIZE) as u32 * (side + SHEET_MARGIN);
        let origin_y = SHEET_MARGIN + (index / PANEL_SIZE) as u32 * (side + SHEET_MARGIN);
        if index + 1 == puzzle.grid.len() {
            fill_rect(&mut sheet, origin_x, origin_y, side, side, BLANK_CELL);
        } else {
            draw_panel_onto(&mut sheet, panel, origin_x, origin_y);
        }
    }
    sheet
}

/// Render the shuffled candidates as a single horizontal strip
pub fn render_candidate_strip(puzzle: &Puzzle) -> RgbaImage {
    let side = panel_pixels();
    let count = puzzle.candidates.len().max(1) as u32;
    let width = count * side + (count + 1) * SHEET_MARGIN;
    let height = side + 2 * SHEET_MARGIN;
    let mut strip = RgbaImage::from_pixel(width, height, Rgba(BACKGROUND));

    for (index, panel) in puzzle.candidates.iter().enumerate() {
        let origin_x = SHEET_MARGIN + index as u32 * (side + SHEET_MARGIN);
        draw_panel_onto(&mut strip, panel, origin_x, SHEET_MARGIN);
    }
    strip
}

fn draw_panel_onto(image: &mut RgbaImage, panel: &Panel, origin_x: u32, origin_y: u32) {
    let side = panel_pixels();
    for offset in 0..=PANEL_SIZE as u32 {
        let line = (offset * CELL_PIXELS).min(side - 1);
        for along in 0..side {
            image.put_pixel(origin_x + line, origin_y + along, Rgba(GRID_LINE));
            image.put_pixel(origin_x + along, origin_y + line, Rgba(GRID_LINE));
        }
    }

    for row in 0..PANEL_SIZE {
        for col in 0..PANEL_SIZE {
            if let Some(entity) = panel.entity(row, col) {
                let cell_x = origin_x + col as u32 * CELL_PIXELS;
                let cell_y = origin_y + row as u32 * CELL_PIXELS;
                draw_entity(image, &entity, cell_x, cell_y);
            }
        }
    }
}

fn draw_entity(image: &mut RgbaImage, entity: &[i32; 5], cell_x: u32, cell_y: u32) {
    let shape = entity.get(Attribute::Type.slot()).copied().unwrap_or(1);
    let size = entity.get(Attribute::Size.slot()).copied().unwrap_or(1);
    let angle = entity.get(Attribute::Angle.slot()).copied().unwrap_or(0);
    let color = entity.get(Attribute::Color.slot()).copied().unwrap_or(0);

    let scale = usize::try_from(size - 1)
        .ok()
        .and_then(|offset| SIZE_SCALES.get(offset).copied())
        .unwrap_or(0.6);
    let radius = f64::from(CELL_PIXELS) * 0.5 * scale;
    let center = f64::from(CELL_PIXELS) * 0.5;
    let rotation = f64::from(angle) * PI / 4.0;
    let fill = usize::try_from(color)
        .ok()
        .and_then(|offset| COLOR_PALETTE.get(offset).copied())
        .unwrap_or([20, 20, 20, 255]);

    for pixel_y in 0..CELL_PIXELS {
        for pixel_x in 0..CELL_PIXELS {
            let x = f64::from(pixel_x) - center + 0.5;
            let y = f64::from(pixel_y) - center + 0.5;
            if covers(shape, radius, rotation, x, y) {
                image.put_pixel(cell_x + pixel_x, cell_y + pixel_y, Rgba(fill));
            }
        }
    }
}

// Shape ordinals: 1 triangle, 2 square, 3 pentagon, 4 hexagon, 5 circle
fn covers(shape: i32, radius: f64, rotation: f64, x: f64, y: f64) -> bool {
    if shape == 5 {
        return x.mul_add(x, y * y) <= radius * radius;
    }
    let sides = match shape {
        1 => 3,
        2 => 4,
        3 => 5,
        _ => 6,
    };
    inside_polygon(x, y, &polygon_vertices(sides, radius, rotation))
}

fn polygon_vertices(sides: usize, radius: f64, rotation: f64) -> Vec<(f64, f64)> {
    // Squares sit flat at angle 0; the odd-sided shapes point up
    let base = if sides == 4 { PI / 4.0 } else { -PI / 2.0 };
    let step = 2.0 * PI / sides as f64;
    (0..sides)
        .map(|vertex| {
            let theta = (vertex as f64).mul_add(step, base + rotation);
            (radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

fn inside_polygon(x: f64, y: f64, vertices: &[(f64, f64)]) -> bool {
    let mut inside = false;
    let count = vertices.len();
    for index in 0..count {
        let Some(&(x1, y1)) = vertices.get(index) else {
            continue;
        };
        let Some(&(x2, y2)) = vertices.get((index + 1) % count) else {
            continue;
        };
        if (y1 > y) != (y2 > y) {
            let crossing = (x2 - x1).mul_add((y - y1) / (y2 - y1), x1);
            if x < crossing {
                inside = !inside;
            }
        }
    }
    inside
}

fn fill_rect(image: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: [u8; 4]) {
    for offset_y in 0..height {
        for offset_x in 0..width {
            image.put_pixel(x + offset_x, y + offset_y, Rgba(color));
        }
    }
}
