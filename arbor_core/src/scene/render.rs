// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth-first draw walk.

use crate::backend::{DrawBackend, NodeView};
use crate::trace::RenderPassEvent;

use super::SceneGraph;
use super::id::NodeId;
use super::node::NodeKind;

/// Counters collected by [`SceneGraph::render`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Nodes entered by the walk.
    pub visited: u32,
    /// `draw_*` calls issued.
    pub drawn: u32,
    /// Subtrees skipped because they were hidden, fully transparent, or a
    /// mask.
    pub culled: u32,
    /// Mask brackets pushed.
    pub masks: u32,
    /// Filter brackets pushed.
    pub filters: u32,
}

impl SceneGraph {
    /// A read-only view of a node for backends.
    #[must_use]
    pub fn view(&self, id: NodeId) -> NodeView<'_> {
        let node = self.node(id);
        NodeView {
            id,
            world_transform: node.transform.world_matrix(),
            world_alpha: node.world_alpha,
            kind: &node.kind,
        }
    }

    /// Updates `root`'s subtree and draws it into `backend`.
    ///
    /// Hidden nodes, nodes with a world alpha of zero or less, and nodes
    /// serving as a mask are skipped with their whole subtree. A node that is
    /// not renderable skips only its own draw; its children are still walked.
    pub fn render<B: DrawBackend + ?Sized>(&mut self, root: NodeId, backend: &mut B) -> RenderStats {
        self.update_transform(root);
        let mut stats = RenderStats::default();
        self.render_node(root, backend, &mut stats);
        self.tracer.render_pass(&RenderPassEvent { root, stats });
        stats
    }

    fn render_node<B: DrawBackend + ?Sized>(
        &mut self,
        id: NodeId,
        backend: &mut B,
        stats: &mut RenderStats,
    ) {
        let node = self.node(id);
        if !node.visible || node.world_alpha <= 0.0 || node.is_mask {
            stats.culled += 1;
            return;
        }
        stats.visited += 1;

        let mask = node.mask;
        if let Some(mask) = mask {
            // The mask may live outside the walked subtree.
            self.recursive_post_update_transform(mask);
            backend.push_mask(&self.view(id), &self.view(mask));
            stats.masks += 1;
        }

        let node = self.node(id);
        let filtered = match node.filters.as_deref() {
            Some(filters) if !filters.is_empty() => {
                backend.push_filters(&self.view(id), filters, node.filter_area);
                stats.filters += 1;
                true
            }
            _ => false,
        };

        if node.renderable {
            let view = self.view(id);
            let drew = match &node.kind {
                NodeKind::Bare | NodeKind::Container => false,
                NodeKind::Sprite(s) => {
                    backend.draw_sprite(&view, s);
                    true
                }
                NodeKind::Graphics(g) => {
                    backend.draw_graphics(&view, g);
                    true
                }
                NodeKind::TilingSprite(t) => {
                    backend.draw_tiling_sprite(&view, t);
                    true
                }
            };
            if drew {
                stats.drawn += 1;
            }
        }

        for i in 0..self.node(id).children.len() {
            let child = self.node(id).children[i];
            self.render_node(child, backend, stats);
        }

        if filtered {
            backend.pop_filters(&self.view(id));
        }
        if mask.is_some() {
            backend.pop_mask(&self.view(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use alloc::{format, vec};

    use kurbo::Rect;

    use super::*;
    use crate::scene::{FilterId, Graphics, Sprite, TilingSprite};

    #[derive(Default)]
    struct Log(Vec<String>);

    impl DrawBackend for Log {
        fn draw_sprite(&mut self, node: &NodeView<'_>, _: &Sprite) {
            self.0.push(format!("sprite {}", node.id));
        }
        fn draw_graphics(&mut self, node: &NodeView<'_>, _: &Graphics) {
            self.0.push(format!("graphics {}", node.id));
        }
        fn draw_tiling_sprite(&mut self, node: &NodeView<'_>, _: &TilingSprite) {
            self.0.push(format!("tiling {}", node.id));
        }
        fn push_mask(&mut self, node: &NodeView<'_>, mask: &NodeView<'_>) {
            self.0.push(format!("push_mask {} {}", node.id, mask.id));
        }
        fn pop_mask(&mut self, node: &NodeView<'_>) {
            self.0.push(format!("pop_mask {}", node.id));
        }
        fn push_filters(&mut self, node: &NodeView<'_>, f: &[FilterId], _: Option<Rect>) {
            self.0.push(format!("push_filters {} {}", node.id, f.len()));
        }
        fn pop_filters(&mut self, node: &NodeView<'_>) {
            self.0.push(format!("pop_filters {}", node.id));
        }
    }

    #[test]
    fn walk_order_and_dispatch() {
        let mut g = SceneGraph::new();
        let root = g.create_node(NodeKind::Container);
        let s = g.create_node(NodeKind::Sprite(Sprite::new(1.0, 1.0)));
        let gr = g.create_node(NodeKind::Graphics(Graphics::new()));
        let t = g.create_node(NodeKind::TilingSprite(TilingSprite::new(1.0, 1.0)));
        g.add_child(root, s).unwrap();
        g.add_child(s, gr).unwrap();
        g.add_child(root, t).unwrap();

        let mut log = Log::default();
        let stats = g.render(root, &mut log);
        assert_eq!(
            log.0,
            vec![format!("sprite {s}"), format!("graphics {gr}"), format!("tiling {t}")],
            "depth-first, per-kind dispatch"
        );
        assert_eq!(stats.drawn, 3, "three draws");
        assert_eq!(stats.visited, 4, "root included");
    }

    #[test]
    fn renderable_skips_self_only() {
        let mut g = SceneGraph::new();
        let parent = g.create_node(NodeKind::Sprite(Sprite::new(1.0, 1.0)));
        let child = g.create_node(NodeKind::Sprite(Sprite::new(1.0, 1.0)));
        g.add_child(parent, child).unwrap();
        g.set_renderable(parent, false);
        let mut log = Log::default();
        g.render(parent, &mut log);
        assert_eq!(log.0, vec![format!("sprite {child}")], "child still drawn");
    }

    #[test]
    fn invisible_and_transparent_skip_subtree() {
        let mut g = SceneGraph::new();
        let root = g.create_node(NodeKind::Container);
        let hidden = g.create_node(NodeKind::Sprite(Sprite::new(1.0, 1.0)));
        let clear = g.create_node(NodeKind::Sprite(Sprite::new(1.0, 1.0)));
        let under = g.create_node(NodeKind::Sprite(Sprite::new(1.0, 1.0)));
        g.add_child(root, hidden).unwrap();
        g.add_child(root, clear).unwrap();
        g.add_child(clear, under).unwrap();
        g.set_visible(hidden, false);
        g.set_alpha(clear, 0.0);
        let mut log = Log::default();
        let stats = g.render(root, &mut log);
        assert!(log.0.is_empty(), "nothing drawn: {:?}", log.0);
        assert_eq!(stats.culled, 2, "two subtrees culled");
    }

    #[test]
    fn masks_and_filters_bracket_subtree() {
        let mut g = SceneGraph::new();
        let root = g.create_node(NodeKind::Container);
        let masked = g.create_node(NodeKind::Sprite(Sprite::new(1.0, 1.0)));
        let mask = g.create_node(NodeKind::Graphics(Graphics::new()));
        g.add_child(root, masked).unwrap();
        g.add_child(root, mask).unwrap();
        g.set_mask(masked, Some(mask)).unwrap();
        g.set_filters(masked, Some(&[FilterId(1), FilterId(2)]));

        let mut log = Log::default();
        let stats = g.render(root, &mut log);
        assert_eq!(
            log.0,
            vec![
                format!("push_mask {masked} {mask}"),
                format!("push_filters {masked} 2"),
                format!("sprite {masked}"),
                format!("pop_filters {masked}"),
                format!("pop_mask {masked}"),
            ],
            "bracketed, mask not drawn directly"
        );
        assert_eq!((stats.masks, stats.filters), (1, 1), "one of each");
    }
}
