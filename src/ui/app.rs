use dioxus::prelude::*;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::state::selection::GridKind;
use crate::ui::actions;
use crate::ui::clipboard_bridge;
use crate::ui::table::TableField;
use crate::ui::toolbar::Toolbar;

const STYLES: Asset = asset!("/assets/styles.css");

#[component]
pub fn App() -> Element {
    let config = use_hook(AppConfig::from_env);
    let (initial, startup_error) = use_hook(|| actions::bootstrap(&config));
    let opened = config.open.clone().filter(|_| startup_error.is_none());

    let maker = use_signal(move || initial);
    let error_message = use_signal(move || startup_error);
    let file_path = use_signal::<Option<PathBuf>>(move || opened);
    let show_blob = use_signal(|| false);
    let export_success = use_signal(|| false);

    use_future(move || clipboard_bridge::listen_for_paste(maker, error_message));

    use_effect(move || {
        clipboard_bridge::publish_copy_payload(maker.read().copy_selection());
    });

    let (field_id, carrier) = {
        let state = maker.read();
        (state.field_id().to_string(), state.carrier_value().to_string())
    };

    rsx! {
        document::Stylesheet { href: STYLES }
        div {
            class: "app",
            onmouseup: move |_| {
                let mut maker = maker;
                maker.with_mut(|state| state.body_mouse_up());
            },
            Toolbar { maker, file_path, error_message, show_blob, export_success }
            div { class: "table-maker", id: "{field_id}",
                input {
                    r#type: "hidden",
                    class: "table-maker-field",
                    name: "{config.handle}",
                    value: "{carrier}",
                }
                TableField { maker, kind: GridKind::Columns, error_message }
                TableField { maker, kind: GridKind::Rows, error_message }
            }
            if *show_blob.read() {
                pre { class: "blob-preview", id: "blob-preview", "{carrier}" }
            }
        }
    }
}
