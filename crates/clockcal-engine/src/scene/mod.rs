//! Scene model.
//!
//! A `Scene` is a flat node store: lights, line geometry and overlay labels.
//! Nodes are addressed by `NodeId` so the owner can update them in place
//! between frames (e.g. the FPS label text). The `Camera` is kept outside the
//! scene and handed to the renderers alongside it.

mod camera;
mod label;
mod light;
mod line;

pub mod helper;

pub use camera::Camera;
pub use label::{Anchor, Label};
pub use light::{AmbientLight, PointLight};
pub use line::{LineSegment, LineSet};

use crate::paint::Color;

/// Handle to a node inside a [`Scene`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId(usize);

/// A scene node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Ambient(AmbientLight),
    Point(PointLight),
    Lines(LineSet),
    Label(Label),
}

impl From<AmbientLight> for Node {
    fn from(v: AmbientLight) -> Self {
        Node::Ambient(v)
    }
}

impl From<PointLight> for Node {
    fn from(v: PointLight) -> Self {
        Node::Point(v)
    }
}

impl From<LineSet> for Node {
    fn from(v: LineSet) -> Self {
        Node::Lines(v)
    }
}

impl From<Label> for Node {
    fn from(v: Label) -> Self {
        Node::Label(v)
    }
}

/// Root container of everything the view draws.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its handle. Nodes are never removed.
    pub fn add(&mut self, node: impl Into<Node>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node.into());
        id
    }

    pub fn label_mut(&mut self, id: NodeId) -> Option<&mut Label> {
        match self.nodes.get_mut(id.0) {
            Some(Node::Label(label)) => Some(label),
            _ => None,
        }
    }

    /// Sum of all ambient lights, already scaled by intensity.
    pub fn ambient(&self) -> Color {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Ambient(a) => Some(a.radiance()),
                _ => None,
            })
            .fold(Color::from_premul(0.0, 0.0, 0.0, 1.0), |acc, c| {
                Color::from_premul(acc.r + c.r, acc.g + c.g, acc.b + c.b, 1.0)
            })
    }

    pub fn point_lights(&self) -> impl Iterator<Item = &PointLight> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Point(p) => Some(p),
            _ => None,
        })
    }

    pub fn line_segments(&self) -> impl Iterator<Item = &LineSegment> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Lines(set) => Some(set.segments.iter()),
                _ => None,
            })
            .flatten()
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Label(l) => Some(l),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec3;

    #[test]
    fn ambient_lights_add_up() {
        let mut scene = Scene::new();
        scene.add(AmbientLight::new(Color::WHITE, 0.5));
        scene.add(AmbientLight::new(Color::WHITE, 0.25));
        let a = scene.ambient();
        assert!((a.r - 0.75).abs() < 1e-6);
        assert_eq!(a.a, 1.0);
    }

    #[test]
    fn label_handles_are_typed() {
        let mut scene = Scene::new();
        let light = scene.add(PointLight::new(Color::WHITE, 5.0, Vec3::new(1.0, 0.0, 2.0)));
        let label = scene.add(Label::new(" "));

        assert!(scene.label_mut(light).is_none());
        scene.label_mut(label).expect("label").set_text("60.0 / 120.0");
        assert_eq!(scene.labels().next().map(|l| l.text.as_str()), Some("60.0 / 120.0"));
    }

    #[test]
    fn axes_contribute_three_segments() {
        let mut scene = Scene::new();
        scene.add(helper::axes(100.0));
        assert_eq!(scene.line_segments().count(), 3);
    }
}
