//! Scene graph stored as an arena of nodes.
//!
//! Nodes are addressed by [`NodeId`] and link to each other by id only. The
//! root node always exists at id 0. Every other node starts detached and is
//! attached once with [`Scene::add_child`]; a node can never be re-parented.
//!
//! ```text
//! root (0)
//! ├── body (1)         global = root ∘ body
//! │   └── arm (2)      global = root ∘ body ∘ arm
//! └── floor (3)
//! ```
//!
//! Only nodes reachable from the root are visited during traversal.

use std::fmt;

use crate::error::SceneError;
use crate::render::renderers::Renderer;
use crate::transform::Transform;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub struct SceneNode {
    pub name: String,
    /// Pose relative to the parent node.
    pub transform: Transform,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    renderers: Vec<Box<dyn Renderer>>,
}

impl SceneNode {
    fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
            parent: None,
            children: Vec::new(),
            renderers: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn renderers(&self) -> &[Box<dyn Renderer>] {
        &self.renderers
    }

    pub fn renderers_mut(&mut self) -> &mut [Box<dyn Renderer>] {
        &mut self.renderers
    }

    pub fn add_renderer(&mut self, renderer: impl Renderer + 'static) {
        self.renderers.push(Box::new(renderer));
    }
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("name", &self.name)
            .field("transform", &self.transform)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("renderers", &self.renderers.len())
            .finish()
    }
}

#[derive(Debug)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: vec![SceneNode::new("root", Transform::default())],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a detached node.
    pub fn add_node(&mut self, name: impl Into<String>, transform: Transform) -> NodeId {
        self.nodes.push(SceneNode::new(name, transform));
        NodeId(self.nodes.len() - 1)
    }

    /// Attach `child` under `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.check(parent)?;
        self.check(child)?;
        if parent == child {
            return Err(SceneError::SelfParent(child.0));
        }
        if child == self.root() || self.nodes[child.0].parent.is_some() {
            return Err(SceneError::AlreadyParented(child.0));
        }
        if self.ancestors(parent).any(|id| id == child) {
            return Err(SceneError::Cycle {
                parent: parent.0,
                child: child.0,
            });
        }

        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Create a node already attached under `parent`.
    pub fn spawn(&mut self, parent: NodeId, name: impl Into<String>, transform: Transform) -> Result<NodeId, SceneError> {
        self.check(parent)?;
        let id = self.add_node(name, transform);
        self.add_child(parent, id)?;
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn add_renderer(&mut self, id: NodeId, renderer: impl Renderer + 'static) -> Result<(), SceneError> {
        self.nodes
            .get_mut(id.0)
            .ok_or(SceneError::UnknownNode(id.0))?
            .add_renderer(renderer);
        Ok(())
    }

    /// Pose of `id` in world space, composed from the root down.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this scene.
    pub fn global_transform(&self, id: NodeId) -> Transform {
        let mut global = self.nodes[id.0].transform;
        for ancestor in self.ancestors(id) {
            global = self.nodes[ancestor.0].transform.compose(&global);
        }
        global
    }

    /// Depth-first, parent before children, children in insertion order.
    /// `visit` receives each node with its world-space pose.
    pub fn visit_mut(&mut self, mut visit: impl FnMut(NodeId, &Transform, &mut SceneNode)) -> usize {
        let root = self.root();
        let mut stack = vec![(root, self.nodes[root.0].transform)];
        let mut visited = 0;

        while let Some((id, global)) = stack.pop() {
            visit(id, &global, &mut self.nodes[id.0]);
            visited += 1;

            let children = &self.nodes[id.0].children;
            for &child in children.iter().rev() {
                stack.push((child, global.compose(&self.nodes[child.0].transform)));
            }
        }
        visited
    }

    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes[id.0].parent, |p| self.nodes[p.0].parent)
    }

    fn check(&self, id: NodeId) -> Result<(), SceneError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(SceneError::UnknownNode(id.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RenderingContext;
    use crate::math::{Quat, Vec3};
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn child_global_matches_parent_matrix() {
        let mut scene = Scene::new();
        let parent_pose = Transform::new(Vec3::new(1.0, 0.0, 0.0), Quat::from_rotation_z(FRAC_PI_2));
        let parent = scene.spawn(scene.root(), "parent", parent_pose).unwrap();
        let child = scene
            .spawn(parent, "child", Transform::from_origin(Vec3::new(1.0, 0.0, 0.0)))
            .unwrap();

        let global = scene.global_transform(child);
        assert_relative_eq!(global.origin(), Vec3::new(1.0, 1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(
            global.to_matrix(),
            scene.global_transform(parent).to_matrix() * scene.node(child).unwrap().transform.to_matrix(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn parent_is_assigned_once() {
        let mut scene = Scene::new();
        let a = scene.add_node("a", Transform::default());
        let b = scene.add_node("b", Transform::default());
        scene.add_child(scene.root(), a).unwrap();

        assert_eq!(scene.add_child(b, a), Err(SceneError::AlreadyParented(a.index())));
        assert_eq!(scene.add_child(a, a), Err(SceneError::SelfParent(a.index())));
        assert_eq!(scene.add_child(a, scene.root()), Err(SceneError::AlreadyParented(0)));
        assert_eq!(
            scene.add_child(a, NodeId(42)),
            Err(SceneError::UnknownNode(42))
        );
    }

    #[test]
    fn detached_subtree_cannot_close_a_cycle() {
        let mut scene = Scene::new();
        let a = scene.add_node("a", Transform::default());
        let b = scene.add_node("b", Transform::default());
        scene.add_child(a, b).unwrap();
        assert_eq!(
            scene.add_child(b, a),
            Err(SceneError::Cycle {
                parent: b.index(),
                child: a.index()
            })
        );
    }

    struct Tracer(std::rc::Rc<std::cell::RefCell<Vec<&'static str>>>, &'static str);

    impl Renderer for Tracer {
        fn render(&mut self, _ctx: &mut RenderingContext) {
            self.0.borrow_mut().push(self.1);
        }
    }

    #[test]
    fn visits_depth_first_in_insertion_order() {
        let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.spawn(root, "a", Transform::default()).unwrap();
        let a1 = scene.spawn(a, "a1", Transform::default()).unwrap();
        let b = scene.spawn(root, "b", Transform::default()).unwrap();
        let detached = scene.add_node("detached", Transform::default());
        for (id, tag) in [(a, "a"), (a1, "a1"), (b, "b"), (detached, "detached")] {
            scene.add_renderer(id, Tracer(log.clone(), tag)).unwrap();
        }

        let mut ctx = RenderingContext::new(4, 4);
        let visited = scene.visit_mut(|_, _, node| {
            for renderer in node.renderers_mut() {
                renderer.render(&mut ctx);
            }
        });

        assert_eq!(visited, 4);
        assert_eq!(*log.borrow(), vec!["a", "a1", "b"]);
    }

    #[test]
    fn traversal_pose_matches_global_transform() {
        let mut scene = Scene::new();
        let mut pose = Transform::from_origin(Vec3::new(0.0, 2.0, 0.0));
        pose.rotate_y(0.7);
        let a = scene.spawn(scene.root(), "a", pose).unwrap();
        let b = scene
            .spawn(a, "b", Transform::from_origin(Vec3::new(0.5, 0.0, -1.0)))
            .unwrap();

        let mut seen = Vec::new();
        scene.visit_mut(|id, global, _| seen.push((id, *global)));
        for (id, global) in seen {
            assert_relative_eq!(global.origin(), scene.global_transform(id).origin(), epsilon = 1e-6);
        }
        assert!(scene.node(b).is_some());
    }
}
