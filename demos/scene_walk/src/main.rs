// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small scene walk that exercises transforms, bounds, and the trace pipeline.
//!
//! Builds a stage with a rotated group, a masked sprite, and a filtered tiling
//! sprite, then queries bounds and coordinates, renders a
//! [`RenderPlan`](arbor_render::RenderPlan), and destroys part of the tree.
//! Every scene event goes to both a
//! [`PrettyPrintSink`](arbor_debug::pretty::PrettyPrintSink) on stdout and a
//! [`RecorderSink`](arbor_debug::recorder::RecorderSink), which is exported
//! as a Chrome trace at the end.
//!
//! Usage: `scene_walk [static|dynamic] [trace.json]`

use std::error::Error;
use std::f64::consts::FRAC_PI_4;
use std::fs::File;
use std::io::BufWriter;

use arbor_core::config::{SceneConfig, TransformMode};
use arbor_core::point::Point;
use arbor_core::scene::{
    DestroyOptions, FilterId, Graphics, NodeEvent, NodeKind, SceneGraph, Sprite, TextureId,
    TilingSprite,
};
use arbor_debug::pretty::PrettyPrintSink;
use arbor_debug::recorder::RecorderSink;
use arbor_debug::tee::Tee;
use arbor_render::{DrawCommand, RenderPlan};
use kurbo::Rect;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let mode: TransformMode = match args.next() {
        Some(arg) => arg.parse()?,
        None => TransformMode::default(),
    };
    let path = args.next().unwrap_or_else(|| "trace.json".into());

    // -- sinks -------------------------------------------------------------
    let recorder = RecorderSink::new();
    let recording = recorder.recording();
    let mut scene = SceneGraph::with_config(SceneConfig::default().with_transform_mode(mode));
    scene.set_trace_sink(Box::new(
        Tee::new()
            .with(Box::new(PrettyPrintSink::new(Box::new(std::io::stdout()))))
            .with(Box::new(recorder)),
    ));
    println!("transform mode: {mode}");

    // -- build -------------------------------------------------------------
    let stage = scene.create_node(NodeKind::Container);

    let group = scene.create_node(NodeKind::Container);
    scene.add_child(stage, group)?;
    scene.set_transform(group, 200.0, 150.0, 2.0, 2.0, FRAC_PI_4, 0.0, 0.0, 0.0, 0.0);

    let hero = scene.create_node(NodeKind::Sprite(
        Sprite::new(64.0, 64.0)
            .with_texture(TextureId(1))
            .with_anchor(0.5, 0.5),
    ));
    scene.add_child(group, hero)?;
    scene.on(
        hero,
        Box::new(|id, event: &NodeEvent| match event {
            NodeEvent::Added { parent } => println!("  {id} added to {parent}"),
            NodeEvent::Removed { parent } => println!("  {id} removed from {parent}"),
            NodeEvent::Destroyed => println!("  {id} destroyed"),
        }),
    );

    let mut shape = Graphics::new();
    shape.draw_rect(Rect::new(-16.0, -16.0, 16.0, 16.0));
    let clip = scene.create_node(NodeKind::Graphics(shape));
    scene.add_child(group, clip)?;
    scene.set_mask(hero, Some(clip))?;

    let floor = scene.create_node(NodeKind::TilingSprite(TilingSprite::new(800.0, 32.0)));
    scene.add_child(stage, floor)?;
    scene.transform_mut(floor).set_position(0.0, 568.0);
    scene.set_filters(floor, Some(&[FilterId(7)]));
    scene.set_filter_area(floor, Some(Rect::new(0.0, 560.0, 400.0, 600.0)));

    // -- queries -----------------------------------------------------------
    let world = scene.get_bounds(stage, false);
    println!("stage bounds: {world:?}");
    let local = scene.get_local_bounds(hero);
    println!("hero local bounds: {local:?}");
    let corner = scene.to_global(hero, Point::new(32.0, 32.0), false);
    println!("hero corner in world: {corner:?}");
    let back = scene.to_local(hero, corner, None, false);
    println!("and back: {back:?}");

    // -- render ------------------------------------------------------------
    let mut plan = RenderPlan::new();
    let stats = scene.render(stage, &mut plan);
    for item in &plan.items {
        let what = match &item.command {
            DrawCommand::Quad { texture, .. } => format!("quad {texture:?}"),
            DrawCommand::Shapes { shapes } => format!("shapes x{}", shapes.len()),
            DrawCommand::Tiled { frame, .. } => format!("tiled {frame:?}"),
            DrawCommand::PushMask { mask, .. } => format!("push mask {mask}"),
            DrawCommand::PopMask => "pop mask".into(),
            DrawCommand::PushFilters { filters, .. } => format!("push filters {filters:?}"),
            DrawCommand::PopFilters => "pop filters".into(),
        };
        println!("  {} alpha={:.2} {what}", item.node, item.world_alpha);
    }
    println!(
        "plan: {} items, {} draws, balanced={}",
        plan.items.len(),
        stats.drawn,
        plan.is_balanced()
    );

    // -- teardown ----------------------------------------------------------
    scene.destroy_with(group, DestroyOptions { children: true });
    println!("live nodes after teardown: {}", scene.len());

    // -- export Chrome trace -----------------------------------------------
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    arbor_debug::chrome::export(&recording.to_bytes(), &mut writer)?;

    println!("Wrote {path} ({} events)", recording.events().len());
    Ok(())
}
