use dioxus::prelude::*;
use tablemaker::ui::app::App;

fn main() {
    env_logger::init();

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new().with_window(
                dioxus::desktop::WindowBuilder::new()
                    .with_title("Table Maker")
                    .with_inner_size(dioxus::desktop::LogicalSize::new(1100.0, 800.0)),
            ),
        )
        .launch(App);
}
