use dioxus::prelude::*;
use std::path::PathBuf;

use crate::state::i18n::{self, Language};
use crate::state::table_maker::TableMaker;
use crate::ui::actions;

#[component]
pub fn Toolbar(
    maker: Signal<TableMaker>,
    file_path: Signal<Option<PathBuf>>,
    error_message: Signal<Option<String>>,
    show_blob: Signal<bool>,
    export_success: Signal<bool>,
) -> Element {
    let current_language = maker.read().language();

    let open_label = i18n::tr(current_language, "toolbar.open");
    let export_label = i18n::tr(current_language, "toolbar.export");
    let export_success_label = i18n::tr(current_language, "toolbar.export_success");
    let show_blob_label = i18n::tr(current_language, "toolbar.show_blob");
    let hide_blob_label = i18n::tr(current_language, "toolbar.hide_blob");

    let blob_visible = *show_blob.read();

    rsx! {
        div { class: "toolbar",
            div { class: "toolbar-group",
                select {
                    class: "toolbar-select toolbar-select-sm",
                    id: "select-language",
                    value: "{current_language.code()}",
                    onchange: move |evt| {
                        if let Some(next_language) = Language::from_code(&evt.value()) {
                            maker.with_mut(|state| state.set_language(next_language));
                        }
                    },
                    for lang in Language::all().iter().copied() {
                        option { value: "{lang.code()}", "{i18n::tr(current_language, lang.label_key())}" }
                    }
                }
                button {
                    class: "toolbar-btn",
                    id: "btn-open",
                    onclick: move |_| {
                        spawn(async move {
                            actions::open_payload(maker, file_path, error_message).await;
                        });
                    },
                    "\u{1F4C2} {open_label}"
                }
                button {
                    class: "toolbar-btn",
                    id: "btn-export",
                    onclick: move |_| {
                        spawn(async move {
                            if actions::export_carrier(maker, file_path, error_message).await {
                                export_success.set(true);
                                tokio::time::sleep(std::time::Duration::from_secs(2)).await;
                                export_success.set(false);
                            }
                        });
                    },
                    "\u{1F4BE} {export_label}"
                }
                if *export_success.read() {
                    span { class: "save-success", "\u{2714} {export_success_label}" }
                }
            }
            div { class: "toolbar-separator" }

            div { class: "toolbar-group",
                button {
                    class: "toolbar-btn",
                    id: "btn-toggle-blob",
                    onclick: move |_| {
                        show_blob.set(!blob_visible);
                    },
                    if blob_visible {
                        "\u{25BC} {hide_blob_label}"
                    } else {
                        "\u{25B6} {show_blob_label}"
                    }
                }
            }

            div { class: "toolbar-info",
                if let Some(path) = file_path.read().as_ref() {
                    span { class: "file-path", "{path.display()}" }
                }
                if let Some(err) = error_message.read().as_ref() {
                    span { class: "error-message", "{err}" }
                }
            }
        }
    }
}
