use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use eframe::egui;
use egui_internal_picker::{AssetListSurface, InternalPicker};
use flow_library::descriptor::ValueDescriptorRegistry;
use flow_library::editor::{EditorEvent, EditorServices, InternalEditor};
use flow_library::model::{FlowProject, InternalValue};
use flow_library::query::{InMemoryAssetService, LookupWorker};
use flow_library::service::{FlowDocument, ProjectService};
use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::{self, AppConfig};
use crate::demo;
use crate::menu::{self, MenuCommand};
use crate::node_view::{self, NodeView};

pub struct FlowEditorApp {
    config: AppConfig,
    service: Arc<ProjectService>,
    assets: Arc<InMemoryAssetService>,
    services: EditorServices,
    views: Vec<NodeView>,
    context_menu: Option<(Uuid, egui::Pos2)>,
    status: String,
    worker: LookupWorker,
}

impl FlowEditorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> anyhow::Result<Self> {
        let assets = Arc::new(InMemoryAssetService::with_assets(demo::sample_assets()));
        let repaint_ctx = cc.egui_ctx.clone();
        let worker = LookupWorker::spawn_with_waker(
            assets.clone(),
            Some(Arc::new(move || repaint_ctx.request_repaint())),
        )?;

        let project = match &config.last_project {
            Some(path) => read_project(path).unwrap_or_else(|e| {
                warn!("Failed to open last project, using demo project: {:#}", e);
                demo::sample_project()
            }),
            None => demo::sample_project(),
        };
        let service = Arc::new(ProjectService::new(project));
        service.subscribe(Box::new(|revision| debug!("Project revision {}", revision)));

        let services = EditorServices {
            settings: Arc::new(config.picker.clone()),
            value_types: Arc::new(ValueDescriptorRegistry::with_builtins()),
            attribute_descriptors: Arc::new(demo::attribute_descriptors()),
        };

        let mut app = Self {
            config,
            service,
            assets,
            services,
            views: Vec::new(),
            context_menu: None,
            status: String::new(),
            worker,
        };
        app.remount();
        Ok(app)
    }

    fn mount_picker(&self, node_id: Uuid, internal_index: usize) -> InternalPicker {
        let editor = InternalEditor::new(
            node_id,
            internal_index,
            self.service.clone(),
            Box::new(self.worker.client()),
            self.services.clone(),
        );
        let surface = AssetListSurface::from_summaries(self.assets.summaries());
        InternalPicker::new(editor, Box::new(surface))
    }

    /// Rebuilds every picker from the current project, e.g. after undo.
    fn remount(&mut self) {
        let project = match self.service.snapshot() {
            Ok(project) => project,
            Err(e) => {
                error!("Failed to read project: {}", e);
                return;
            }
        };
        let views = project
            .nodes
            .iter()
            .map(|node| NodeView {
                node_id: node.id,
                pickers: (0..node.internals.len())
                    .map(|index| self.mount_picker(node.id, index))
                    .collect(),
            })
            .collect();
        self.views = views;
        self.context_menu = None;
    }

    fn replace_project(&mut self, project: FlowProject) -> anyhow::Result<()> {
        self.service.create_undo_snapshot();
        self.service.set_project(project)?;
        self.service.notify_change();
        self.remount();
        Ok(())
    }

    fn run_command(&mut self, command: MenuCommand) {
        let result = match command {
            MenuCommand::Undo => self.step_history(true),
            MenuCommand::Redo => self.step_history(false),
            MenuCommand::OpenProject => self.open_project(),
            MenuCommand::SaveProject => self.save_project(),
            MenuCommand::ResetDemo => self.replace_project(demo::sample_project()),
            MenuCommand::SaveSettings => {
                config::save_config(&self.config);
                Ok(())
            }
        };
        if let Err(e) = result {
            error!("{:?} failed: {:#}", command, e);
            self.status = format!("{:?} failed: {}", command, e);
        }
    }

    fn step_history(&mut self, undo: bool) -> anyhow::Result<()> {
        let changed = if undo {
            self.service.undo()?
        } else {
            self.service.redo()?
        };
        if changed {
            self.remount();
            self.status = if undo { "Undone" } else { "Redone" }.to_string();
        }
        Ok(())
    }

    fn open_project(&mut self) -> anyhow::Result<()> {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Flow project", &["json"])
            .pick_file()
        else {
            return Ok(());
        };
        let project = read_project(&path)?;
        self.replace_project(project)?;
        info!("Opened {}", path.display());
        self.status = format!("Opened {}", path.display());
        self.config.last_project = Some(path);
        Ok(())
    }

    fn save_project(&mut self) -> anyhow::Result<()> {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Flow project", &["json"])
            .set_file_name("project.json")
            .save_file()
        else {
            return Ok(());
        };
        let json = self.service.save_project()?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        self.status = format!("Saved {}", path.display());
        self.config.last_project = Some(path);
        Ok(())
    }

    fn reset_internals(&mut self, node_id: Uuid) -> anyhow::Result<()> {
        let node = self.service.node(node_id)?;
        self.service.create_undo_snapshot();
        for index in 0..node.internals.len() {
            self.service
                .set_internal_value(node_id, index, InternalValue::Empty)?;
        }
        self.service.notify_change();
        self.remount();
        self.status = format!("Reset internals of {}", node.name);
        Ok(())
    }

    fn show_context_menu(&mut self, ctx: &egui::Context) {
        let Some((node_id, pos)) = self.context_menu else {
            return;
        };
        let mut reset = false;
        let mut close = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        egui::Area::new(egui::Id::new("node_context_menu"))
            .fixed_pos(pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::menu(ui.style()).show(ui, |ui| {
                    if ui.button("Reset internals").clicked() {
                        reset = true;
                    }
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });

        if reset {
            if let Err(e) = self.reset_internals(node_id) {
                error!("Failed to reset internals: {:#}", e);
            }
            close = true;
        }
        if close {
            self.context_menu = None;
        }
    }
}

fn read_project(path: &Path) -> anyhow::Result<FlowProject> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let project =
        FlowProject::load(&json).with_context(|| format!("parsing {}", path.display()))?;
    Ok(project)
}

impl eframe::App for FlowEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut triggered = menu::shortcut_command(ctx);

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            menu::menu_bar(
                ui,
                self.service.can_undo(),
                self.service.can_redo(),
                &mut triggered,
            );
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(format!("revision {}", self.service.revision()));
                });
            });
        });

        let project = match self.service.snapshot() {
            Ok(project) => project,
            Err(e) => {
                error!("Failed to read project: {}", e);
                return;
            }
        };

        let mut outputs = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for view in &mut self.views {
                        let Some(node) = project.get_node(view.node_id) else {
                            continue;
                        };
                        let output = node_view::show_node(ui, node, view);
                        outputs.push((node.id, node.name.clone(), output));
                    }
                });
            });
        });

        for (node_id, node_name, output) in outputs {
            for (internal_name, event) in output.events {
                self.status = match event {
                    EditorEvent::Picked => format!("{} · {} edited", node_name, internal_name),
                    EditorEvent::SocketTypeChanged(data_type) => {
                        format!("{} socket is now {:?}", node_name, data_type)
                    }
                };
            }
            if let Some(pos) = output.context_menu_at {
                self.context_menu = Some((node_id, pos));
            }
        }

        self.show_context_menu(ctx);

        if let Some(command) = triggered {
            self.run_command(command);
        }
    }
}
