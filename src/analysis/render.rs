// src/analysis/render.rs
// Raster rendering of the planner graph. Vertices are projected orthographically
// onto the x-y plane (y crosses the passage), scaled to fit the canvas while
// keeping the aspect ratio.

use super::style::{Color, EdgeStyle, VertexStyle};
use crate::error::Result;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut};
use nalgebra::Vector3;
use std::path::Path;

/// Canvas settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Width and height in pixels
    pub size: u32,
    /// Empty border in pixels
    pub margin: f32,
    /// Canvas fill
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            size: 600,
            margin: 20.0,
            background: Color::White,
        }
    }
}

/// An edge to draw between two vertex indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyledEdge {
    /// Source vertex index
    pub source: usize,
    /// Target vertex index
    pub target: usize,
    /// Stroke
    pub style: EdgeStyle,
}

/// World-to-pixel mapping.
struct Projection {
    min_x: f64,
    min_y: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    size: f64,
    margin: f64,
}

impl Projection {
    fn fit(positions: &[Vector3<f64>], config: &RenderConfig) -> Self {
        let size = config.size as f64;
        let margin = config.margin as f64;
        let drawable = (size - 2.0 * margin).max(1.0);

        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in positions {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        if positions.is_empty() {
            (min_x, max_x, min_y, max_y) = (0.0, 0.0, 0.0, 0.0);
        }

        let span = (max_x - min_x).max(max_y - min_y);
        let scale = if span > f64::EPSILON { drawable / span } else { 1.0 };
        Projection {
            min_x,
            min_y,
            scale,
            offset_x: (drawable - (max_x - min_x) * scale) / 2.0,
            offset_y: (drawable - (max_y - min_y) * scale) / 2.0,
            size,
            margin,
        }
    }

    fn to_pixel(&self, p: &Vector3<f64>) -> (f32, f32) {
        let px = self.margin + self.offset_x + (p.x - self.min_x) * self.scale;
        // image rows grow downwards
        let py = self.size - (self.margin + self.offset_y + (p.y - self.min_y) * self.scale);
        (px as f32, py as f32)
    }
}

/// Draws the graph: plain edges, highlighted edges, ordinary vertices, then
/// the larger (start/goal) vertices on top.
pub fn render(
    positions: &[Vector3<f64>],
    vertex_styles: &[VertexStyle],
    edges: &[StyledEdge],
    config: &RenderConfig,
) -> RgbImage {
    let mut image = RgbImage::from_pixel(config.size, config.size, config.background.rgb());
    let projection = Projection::fit(positions, config);
    let pixels: Vec<(f32, f32)> = positions.iter().map(|p| projection.to_pixel(p)).collect();

    let mut ordered_edges: Vec<&StyledEdge> = edges.iter().collect();
    ordered_edges.sort_by(|a, b| a.style.width.total_cmp(&b.style.width));
    for edge in ordered_edges {
        let (Some(&a), Some(&b)) = (pixels.get(edge.source), pixels.get(edge.target)) else {
            continue;
        };
        draw_thick_line(&mut image, a, b, edge.style.width, edge.style.color.rgb());
    }

    let mut ordered_vertices: Vec<usize> = (0..pixels.len().min(vertex_styles.len())).collect();
    ordered_vertices.sort_by(|&a, &b| vertex_styles[a].size.total_cmp(&vertex_styles[b].size));
    for v in ordered_vertices {
        let (x, y) = pixels[v];
        let center = (x.round() as i32, y.round() as i32);
        let radius = (vertex_styles[v].size / 2.0).round().max(1.0) as i32;
        draw_filled_circle_mut(&mut image, center, radius, vertex_styles[v].fill.rgb());
        draw_hollow_circle_mut(&mut image, center, radius, Color::Black.rgb());
    }
    image
}

/// Renders and writes a PNG to `path`.
pub fn render_to_file(
    positions: &[Vector3<f64>],
    vertex_styles: &[VertexStyle],
    edges: &[StyledEdge],
    config: &RenderConfig,
    path: &Path,
) -> Result<()> {
    render(positions, vertex_styles, edges, config).save(path)?;
    Ok(())
}

// Widths below one pixel still get a single stroke.
fn draw_thick_line(image: &mut RgbImage, a: (f32, f32), b: (f32, f32), width: f32, color: Rgb<u8>) {
    let strokes = width.round().max(1.0) as i32;
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let length = (dx * dx + dy * dy).sqrt();
    let (nx, ny) = if length > f32::EPSILON {
        (-dy / length, dx / length)
    } else {
        (0.0, 0.0)
    };
    for i in 0..strokes {
        let offset = i as f32 - (strokes - 1) as f32 / 2.0;
        draw_line_segment_mut(
            image,
            (a.0 + nx * offset, a.1 + ny * offset),
            (b.0 + nx * offset, b.1 + ny * offset),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::VertexRole;

    fn near(image: &RgbImage, x: u32, y: u32, color: Rgb<u8>) -> bool {
        (x.saturating_sub(2)..=x + 2)
            .flat_map(|px| (y.saturating_sub(2)..=y + 2).map(move |py| (px, py)))
            .any(|(px, py)| image.get_pixel_checked(px, py) == Some(&color))
    }

    #[test]
    fn draws_styled_vertices_and_edges() {
        let positions = vec![
            Vector3::new(-9.0, -9.0, -9.0),
            Vector3::new(-9.0, 9.0, -9.0),
            Vector3::new(0.0, 0.0, 0.0),
        ];
        let styles = vec![
            VertexStyle::for_role(VertexRole::Start),
            VertexStyle::for_role(VertexRole::Goal),
            VertexStyle::for_role(VertexRole::Other),
        ];
        let edges = vec![
            StyledEdge { source: 0, target: 2, style: EdgeStyle::SHORTEST_PATH },
            StyledEdge { source: 2, target: 1, style: EdgeStyle::SHORTEST_PATH },
            StyledEdge { source: 0, target: 1, style: EdgeStyle::DEFAULT },
        ];
        let config = RenderConfig { size: 200, margin: 20.0, background: Color::White };
        let image = render(&positions, &styles, &edges, &config);

        assert_eq!(image.dimensions(), (200, 200));
        assert_eq!(*image.get_pixel(0, 0), Color::White.rgb());
        // start projects to (60, 180), goal to (60, 20), the other vertex to (140, 100)
        assert_eq!(*image.get_pixel(60, 180), Color::Cyan.rgb());
        assert_eq!(*image.get_pixel(60, 20), Color::Green.rgb());
        assert_eq!(*image.get_pixel(140, 100), Color::Yellow.rgb());
        assert!(near(&image, 100, 140, Color::Red.rgb()));
        assert!(near(&image, 60, 100, Color::Black.rgb()));
    }

    #[test]
    fn single_vertex_and_out_of_range_edges_are_tolerated() {
        let positions = vec![Vector3::new(1.0, 1.0, 1.0)];
        let styles = vec![VertexStyle::for_role(VertexRole::Start)];
        let edges = vec![StyledEdge { source: 0, target: 5, style: EdgeStyle::DEFAULT }];
        let image = render(&positions, &styles, &edges, &RenderConfig::default());
        assert_eq!(image.dimensions(), (600, 600));
    }

    #[test]
    fn writes_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.png");
        let positions = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 0.0)];
        let styles = vec![VertexStyle::for_role(VertexRole::Other); 2];
        let edges = vec![StyledEdge { source: 0, target: 1, style: EdgeStyle::DEFAULT }];
        render_to_file(&positions, &styles, &edges, &RenderConfig::default(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }
}
