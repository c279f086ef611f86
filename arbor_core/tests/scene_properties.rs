// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end properties of the scene graph through its public API.

use arbor_core::config::{SceneConfig, TransformMode};
use arbor_core::matrix::Matrix;
use arbor_core::point::Point;
use arbor_core::scene::{NodeId, NodeKind, SceneGraph, Sprite};

const EPS: f64 = 1e-9;

fn approx_pt(p: Point, x: f64, y: f64) -> bool {
    (p.x - x).abs() < EPS && (p.y - y).abs() < EPS
}

/// A (root) → B at (10, 0) with scale (1, 2) → C at (0, 5).
fn abc(mode: TransformMode) -> (SceneGraph, NodeId, NodeId, NodeId) {
    let mut g = SceneGraph::with_config(SceneConfig::default().with_transform_mode(mode));
    let a = g.create_node(NodeKind::Container);
    let b = g.create_node(NodeKind::Container);
    let c = g.create_node(NodeKind::Container);
    g.add_child(a, b).unwrap();
    g.add_child(b, c).unwrap();
    g.transform_mut(b).set_position(10.0, 0.0);
    g.transform_mut(b).set_scale(1.0, 2.0);
    g.transform_mut(c).set_position(0.0, 5.0);
    (g, a, b, c)
}

#[test]
fn abc_scenario() {
    for mode in [TransformMode::Static, TransformMode::Dynamic] {
        let (mut g, a, b, c) = abc(mode);
        g.update_transform(a);
        assert!(
            approx_pt(g.world_transform(c).apply(Point::ZERO), 10.0, 10.0),
            "{mode}: C world origin"
        );
        let global = g.to_global(c, Point::ZERO, false);
        assert!(approx_pt(global, 10.0, 10.0), "{mode}: C.to_global = {global:?}");
        let local = g.to_local(b, Point::new(10.0, 10.0), None, false);
        assert!(approx_pt(local, 0.0, 5.0), "{mode}: B.to_local = {local:?}");
    }
}

#[test]
fn coordinate_queries_refresh_without_full_update() {
    let (mut g, _, b, c) = abc(TransformMode::Static);
    // no update_transform call at all
    let global = g.to_global(c, Point::ZERO, false);
    assert!(approx_pt(global, 10.0, 10.0), "refreshed on demand: {global:?}");
    g.transform_mut(b).set_position(20.0, 0.0);
    let stale = g.to_global(c, Point::ZERO, true);
    assert!(approx_pt(stale, 10.0, 10.0), "skip_update sees old matrices");
}

#[test]
fn local_and_world_agree_for_a_root() {
    let mut g = SceneGraph::new();
    let s = g.create_node(NodeKind::Sprite(Sprite::new(32.0, 16.0).with_anchor(0.5, 0.5)));
    let local = g.get_local_bounds(s);
    let world = g.get_bounds(s, false);
    assert_eq!(local, world, "identity root");
    assert_eq!(local.width(), 32.0, "width");
    assert_eq!(local.x0, -16.0, "centered");
}

#[test]
fn destroyed_child_leaves_parent() {
    let (mut g, a, b, c) = abc(TransformMode::Static);
    g.destroy(b);
    assert!(g.children(a).is_empty(), "removed from A");
    assert!(!g.is_alive(b), "B gone");
    assert_eq!(g.parent(c), None, "C orphaned");
    let bounds = g.get_bounds(a, false);
    assert_eq!(bounds.area(), 0.0, "empty container");
}

#[test]
fn set_from_matrix_matches_composition() {
    let mut g = SceneGraph::new();
    let n = g.create_node(NodeKind::Container);
    let mut m = Matrix::IDENTITY;
    m.set_transform(4.0, -9.0, 0.0, 0.0, 3.0, 0.5, 2.0, 0.0, 0.0);
    g.transform_mut(n).set_from_matrix(&m);
    g.update_transform(n);
    let w = g.world_transform(n);
    let p = Point::new(1.0, 1.0);
    let (got, want) = (w.apply(p), m.apply(p));
    assert!(approx_pt(got, want.x, want.y), "{got:?} vs {want:?}");
}

#[test]
#[should_panic(expected = "stale NodeId")]
fn use_after_destroy_panics() {
    let (mut g, _, b, _) = abc(TransformMode::Static);
    g.destroy(b);
    g.update_transform(b);
}
