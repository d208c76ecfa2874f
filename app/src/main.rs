use eframe::egui;

mod app;
mod config;
mod demo;
mod menu;
mod node_view;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let config = config::load_config();
    eframe::run_native(
        "Flow Internal Editor",
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size([960.0, 720.0]),
            ..Default::default()
        },
        Box::new(|cc| Ok(Box::new(app::FlowEditorApp::new(cc, config)?))),
    )
}
