//! Reference axes and their legend

use cloudview_core::{ColoredVertex, Point3f, Rgba};
use nalgebra::Vector3;

/// One of the three coordinate axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Red, green and blue for X, Y and Z
    pub fn color(self) -> Rgba {
        match self {
            Axis::X => [1.0, 0.0, 0.0, 1.0],
            Axis::Y => [0.0, 1.0, 0.0, 1.0],
            Axis::Z => [0.0, 0.0, 1.0, 1.0],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }

    pub fn unit(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }

    fn color_name(self) -> &'static str {
        match self {
            Axis::X => "red",
            Axis::Y => "green",
            Axis::Z => "blue",
        }
    }
}

/// Line-list vertices for the three axes, each spanning [-1, 1]
pub fn axis_vertices() -> [ColoredVertex; 6] {
    let segment = |axis: Axis| {
        let u = axis.unit();
        [
            ColoredVertex::new(&Point3f::from(-u), axis.color()),
            ColoredVertex::new(&Point3f::from(u), axis.color()),
        ]
    };
    let [x0, x1] = segment(Axis::X);
    let [y0, y1] = segment(Axis::Y);
    let [z0, z1] = segment(Axis::Z);
    [x0, x1, y0, y1, z0, z1]
}

/// Static `label: colour` lines for display next to the viewport
pub fn axis_legend() -> Vec<String> {
    Axis::ALL
        .iter()
        .map(|axis| format!("{}: {}", axis.label(), axis.color_name()))
        .collect()
}
