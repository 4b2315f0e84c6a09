mod call;
mod config;
mod demo;
mod invite;
mod lang;
mod layout;
mod panel;
mod state;
mod ui;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder, WindowCloseBehaviour};
use std::sync::Arc;
use tracing::{error, info};

use call::GroupCall;
use config::{PanelConfig, TitleStyle};
use layout::geometry;
use panel::GroupPanel;
use ui::PanelHandle;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    if let Err(e) = run() {
        error!("Application error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    info!("Starting group call panel...");

    let config = PanelConfig::from_env()?;
    let call: Arc<dyn GroupCall> = demo::start()?;

    let panel = GroupPanel::new(&call, config.clone());
    let native_title = panel.native_title().to_string();
    let handle = Arc::new(PanelHandle::new(panel, call));

    let min_size = geometry::minimum_size(&config);

    info!("Launching UI...");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                // The panel decides on each close request; see `ui::App`.
                .with_close_behaviour(WindowCloseBehaviour::WindowHides)
                .with_window(
                    WindowBuilder::new()
                        .with_title(native_title)
                        .with_inner_size(LogicalSize::new(config.width, config.height))
                        .with_min_inner_size(LogicalSize::new(min_size.width, min_size.height))
                        .with_decorations(config.title_style != TitleStyle::CustomControls)
                        .with_always_on_top(false),
                ),
        )
        .with_context(handle)
        .launch(ui::App);

    Ok(())
}
