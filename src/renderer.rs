use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use winit::window::Window;

use crate::editor::{Axis, EditorSession, TransformField};
use crate::frame::Frame;
use crate::ui::{EditorPanels, MeshListPanel, PanelAction, PrimitiveToolbar, TransformPanel};
use crate::viewport::ViewportRect;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.08,
    g: 0.08,
    b: 0.1,
    a: 1.0,
};
const SIDE_PANEL_WIDTH: f32 = 220.0;
const WIRE_COLOR: egui::Color32 = egui::Color32::from_rgb(170, 170, 180);
const HIGHLIGHT_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 160, 40);

/// Result of one UI pass
#[derive(Debug, Clone)]
pub struct UiOutput {
    pub actions: Vec<PanelAction>,
    /// Area left for the 3D view, in physical pixels
    pub viewport: ViewportRect,
}

/// Window surface plus the egui side panels
pub struct EditorRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
    show_panels: bool,
    load_path: String,
}

impl EditorRenderer {
    pub async fn new(window: Arc<Window>, show_panels: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create window surface")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to find appropriate adapter")?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("Failed to create device")?;

        let surface_config = Self::create_surface_config(&surface, &adapter, size)?;
        surface.configure(&device, &surface_config);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            surface_config.format,
            egui_wgpu::RendererOptions::default(),
        );

        log::info!(
            "Renderer initialized: {}x{} {:?}",
            size.width,
            size.height,
            surface_config.format
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            egui_renderer,
            egui_state,
            egui_ctx,
            show_panels,
            load_path: String::new(),
        })
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("Surface supports no formats")?;

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    pub fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        // Minimized windows report zero; keep the old surface until restored
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Reconfigure after the surface was lost or went out of date
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Feed a window event to egui; true when a panel consumed it
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }

    pub fn render(
        &mut self,
        window: &Window,
        session: &EditorSession,
        panels: &EditorPanels,
        frame: Option<&Frame>,
    ) -> std::result::Result<UiOutput, wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Encoder"),
            });

        {
            let _clear_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
        }

        let raw_input = self.egui_state.take_egui_input(window);
        let show_panels = self.show_panels;
        let load_path = &mut self.load_path;
        let mut actions = Vec::new();
        let mut central = egui::Rect::NOTHING;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            // egui may run a pass twice; keep only the last pass's clicks
            actions.clear();
            if show_panels {
                egui::SidePanel::left("objects")
                    .resizable(false)
                    .exact_width(SIDE_PANEL_WIDTH)
                    .show(ctx, |ui| {
                        draw_toolbar(ui, &panels.toolbar, &mut actions);
                        ui.separator();
                        draw_mesh_list(
                            ui,
                            &panels.mesh_list,
                            session.selected(),
                            load_path,
                            &mut actions,
                        );
                    });

                egui::SidePanel::right("transform")
                    .resizable(false)
                    .exact_width(SIDE_PANEL_WIDTH)
                    .show(ctx, |ui| draw_transform(ui, &panels.transform, &mut actions));
            }

            egui::CentralPanel::default()
                .frame(egui::Frame::NONE)
                .show(ctx, |ui| {
                    central = ui.max_rect();
                    if let Some(frame) = frame {
                        draw_wireframe(ui.painter(), central, session, frame);
                    }
                });
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let pixels_per_point = full_output.pixels_per_point;
        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point,
        };

        let extra_commands = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(
            extra_commands
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );
        output.present();

        Ok(UiOutput {
            actions,
            viewport: ViewportRect::new(
                central.left() * pixels_per_point,
                central.top() * pixels_per_point,
                central.width() * pixels_per_point,
                central.height() * pixels_per_point,
            ),
        })
    }
}

fn draw_toolbar(ui: &mut egui::Ui, toolbar: &PrimitiveToolbar, actions: &mut Vec<PanelAction>) {
    ui.heading("Add");
    ui.horizontal_wrapped(|ui| {
        for (label, kind) in toolbar.buttons() {
            if ui.button(label).clicked() {
                actions.push(PanelAction::AddPrimitive(kind));
            }
        }
    });
}

fn draw_mesh_list(
    ui: &mut egui::Ui,
    list: &MeshListPanel,
    selected: Option<crate::scene::ObjectId>,
    load_path: &mut String,
    actions: &mut Vec<PanelAction>,
) {
    ui.heading("Objects");

    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(load_path)
                .hint_text("model.glb")
                .desired_width(SIDE_PANEL_WIDTH - 70.0),
        );
        let path = load_path.trim();
        if ui
            .add_enabled(!path.is_empty(), egui::Button::new("+"))
            .on_hover_text("Load model")
            .clicked()
        {
            actions.push(PanelAction::Load(PathBuf::from(path)));
        }
        if ui
            .add_enabled(selected.is_some(), egui::Button::new("-"))
            .on_hover_text("Remove selected")
            .clicked()
        {
            actions.push(PanelAction::RemoveSelected);
        }
    });

    ui.add_space(5.0);
    egui::ScrollArea::vertical().show(ui, |ui| {
        for entry in list.entries() {
            let label = if entry.name.is_empty() {
                entry.id.to_string()
            } else {
                format!("{} {}", entry.id, entry.name)
            };
            if ui
                .selectable_label(selected == Some(entry.id), label)
                .clicked()
            {
                actions.push(PanelAction::Select(entry.id));
            }
        }
    });
}

fn draw_transform(ui: &mut egui::Ui, panel: &TransformPanel, actions: &mut Vec<PanelAction>) {
    ui.heading("Transform");

    ui.add_enabled_ui(panel.is_enabled(), |ui| {
        egui::Grid::new("transform_fields")
            .num_columns(4)
            .show(ui, |ui| {
                ui.label("");
                for axis in Axis::ALL {
                    ui.label(format!("{:?}", axis));
                }
                ui.end_row();

                for field in TransformField::ALL {
                    ui.label(format!("{:?}", field));
                    let speed = match field {
                        TransformField::Rotation => 1.0,
                        _ => 0.05,
                    };
                    for axis in Axis::ALL {
                        let mut value = panel.snapshot().field(field, axis);
                        if ui
                            .add(egui::DragValue::new(&mut value).speed(speed))
                            .changed()
                        {
                            actions.push(PanelAction::Edit {
                                field,
                                axis,
                                text: value.to_string(),
                            });
                        }
                    }
                    ui.end_row();
                }
            });
    });
}

/// Triangle edges of every mesh, the highlighted object's subtree on top
fn draw_wireframe(painter: &egui::Painter, rect: egui::Rect, session: &EditorSession, frame: &Frame) {
    let graph = session.graph();
    let mut highlighted_edges = Vec::new();

    for object in graph.iter() {
        let Some(mesh) = object.mesh.as_ref() else {
            continue;
        };
        let Some(world) = graph.world_matrix(object.id()) else {
            continue;
        };
        let mvp = frame.view_projection * world;
        let highlighted = frame
            .highlighted
            .is_some_and(|id| graph.is_within(object.id(), id));

        for triangle in mesh.triangles() {
            let points = triangle.map(|p| project_to_rect(&mvp, p, rect));
            for (a, b) in [(0, 1), (1, 2), (2, 0)] {
                if let (Some(a), Some(b)) = (points[a], points[b]) {
                    if highlighted {
                        highlighted_edges.push([a, b]);
                    } else {
                        painter.line_segment([a, b], egui::Stroke::new(1.0, WIRE_COLOR));
                    }
                }
            }
        }
    }

    for edge in highlighted_edges {
        painter.line_segment(edge, egui::Stroke::new(1.5, HIGHLIGHT_COLOR));
    }
}

/// Local point to a screen position inside `rect`; None behind the camera
fn project_to_rect(mvp: &Mat4, point: Vec3, rect: egui::Rect) -> Option<egui::Pos2> {
    let clip = *mvp * point.extend(1.0);
    if clip.w <= 1e-4 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(egui::pos2(
        rect.left() + (ndc.x + 1.0) * 0.5 * rect.width(),
        rect.top() + (1.0 - ndc.y) * 0.5 * rect.height(),
    ))
}
