// src/analysis/style.rs
// Visual attributes: vertices by role, edges by whether they lie on the
// shortest start-goal path.

use crate::planning::VertexRole;
use image::Rgb;

/// Named colors used in the rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Start vertices
    Cyan,
    /// Goal vertices
    Green,
    /// Other vertices
    Yellow,
    /// Roadmap edges and outlines
    Black,
    /// Shortest path edges
    Red,
    /// Background
    White,
}

impl Color {
    /// Pixel value of the color.
    pub fn rgb(self) -> Rgb<u8> {
        match self {
            Color::Cyan => Rgb([0, 255, 255]),
            Color::Green => Rgb([0, 128, 0]),
            Color::Yellow => Rgb([255, 255, 0]),
            Color::Black => Rgb([0, 0, 0]),
            Color::Red => Rgb([255, 0, 0]),
            Color::White => Rgb([255, 255, 255]),
        }
    }
}

/// Fill color and diameter (pixels) of a vertex marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexStyle {
    /// Fill color
    pub fill: Color,
    /// Marker diameter in pixels
    pub size: f32,
}

/// Color and pen width (pixels) of an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
}

impl VertexStyle {
    /// Start cyan, goal green, everything else yellow and smaller.
    pub fn for_role(role: VertexRole) -> Self {
        match role {
            VertexRole::Start => VertexStyle { fill: Color::Cyan, size: 10.0 },
            VertexRole::Goal => VertexStyle { fill: Color::Green, size: 10.0 },
            VertexRole::Other => VertexStyle { fill: Color::Yellow, size: 5.0 },
        }
    }
}

impl EdgeStyle {
    /// Ordinary roadmap edge.
    pub const DEFAULT: EdgeStyle = EdgeStyle { color: Color::Black, width: 0.5 };
    /// Edge on the start-goal shortest path.
    pub const SHORTEST_PATH: EdgeStyle = EdgeStyle { color: Color::Red, width: 2.0 };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_goal_stand_out() {
        let start = VertexStyle::for_role(VertexRole::Start);
        let goal = VertexStyle::for_role(VertexRole::Goal);
        let other = VertexStyle::for_role(VertexRole::Other);
        assert_eq!(start.fill, Color::Cyan);
        assert_eq!(goal.fill, Color::Green);
        assert_eq!(other.fill, Color::Yellow);
        assert!(start.size > other.size && goal.size > other.size);
    }

    #[test]
    fn path_edges_are_wider() {
        assert!(EdgeStyle::SHORTEST_PATH.width > EdgeStyle::DEFAULT.width);
        assert_eq!(EdgeStyle::SHORTEST_PATH.color.rgb(), Rgb([255, 0, 0]));
    }
}
