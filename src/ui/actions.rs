use dioxus::prelude::*;
use std::path::PathBuf;

use crate::config::{AppConfig, FORM_NAMESPACE};
use crate::io::{payload_io, settings_io};
use crate::state::i18n;
use crate::state::settings::FieldSettings;
use crate::state::table_maker::{FieldInit, TableMaker};

/// Builds the field from the startup configuration. Load failures fall back to
/// an empty table and are reported through the returned message.
pub fn bootstrap(config: &AppConfig) -> (TableMaker, Option<String>) {
    let mut errors = Vec::new();

    let settings = match config.settings.as_deref() {
        Some(path) => settings_io::load_settings(path).unwrap_or_else(|err| {
            errors.push(err.to_string());
            FieldSettings::default()
        }),
        None => FieldSettings::default(),
    };

    let blob = config
        .open
        .as_deref()
        .and_then(|path| match payload_io::load_blob(path) {
            Ok(blob) => Some(blob),
            Err(err) => {
                errors.push(err.to_string());
                None
            }
        });

    let init = FieldInit::new(FORM_NAMESPACE, &config.handle, settings, blob.as_ref())
        .with_language(config.language);
    let maker = TableMaker::new(init).with_strict_clipboard(config.strict_clipboard);

    for err in &errors {
        log::warn!("{err}");
    }
    let message = (!errors.is_empty()).then(|| errors.join("; "));
    (maker, message)
}

pub async fn open_payload(
    mut maker: Signal<TableMaker>,
    mut file_path: Signal<Option<PathBuf>>,
    mut error_message: Signal<Option<String>>,
) {
    let language = maker.read().language();
    let task = rfd::AsyncFileDialog::new()
        .add_filter(i18n::tr(language, "dialog.json_filter"), &["json"])
        .pick_file()
        .await;

    if let Some(handle) = task {
        let path = handle.path().to_path_buf();
        match payload_io::load_blob(&path) {
            Ok(blob) => {
                maker.with_mut(|state| state.reload(Some(&blob)));
                file_path.set(Some(path));
                error_message.set(None);
            }
            Err(e) => {
                error_message.set(Some(e.to_string()));
            }
        }
    }
}

pub async fn export_carrier(
    maker: Signal<TableMaker>,
    mut file_path: Signal<Option<PathBuf>>,
    mut error_message: Signal<Option<String>>,
) -> bool {
    let (language, carrier) = {
        let state = maker.read();
        (state.language(), state.carrier_value().to_string())
    };

    let mut dialog = rfd::AsyncFileDialog::new()
        .add_filter(i18n::tr(language, "dialog.json_filter"), &["json"]);
    if let Some(path) = file_path.read().as_ref() {
        if let Some(name) = path.file_name() {
            dialog = dialog.set_file_name(name.to_string_lossy());
        }
    }

    let Some(handle) = dialog.save_file().await else {
        return false;
    };

    let path = handle.path().to_path_buf();
    if let Err(err) = payload_io::save_blob(&path, &carrier) {
        error_message.set(Some(err.to_string()));
        return false;
    }

    file_path.set(Some(path));
    error_message.set(None);
    true
}
