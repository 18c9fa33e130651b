//! Background pass: clears the frame to the scene's background color.

use crate::scene::Scene;

/// Record a pass that clears `view` to the scene's current clear color
/// (the flat color, or the environment's tone-mapped mean radiance).
pub fn clear_pass(encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView, scene: &Scene) {
    let [r, g, b] = scene.clear_color();
    let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Background Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            depth_slice: None,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color {
                    r: f64::from(r),
                    g: f64::from(g),
                    b: f64::from(b),
                    a: 1.0,
                }),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        ..Default::default()
    });
}
