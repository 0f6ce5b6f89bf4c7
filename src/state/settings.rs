use serde::{Deserialize, Serialize};

use crate::state::data_model::Column;
use crate::state::grid::{CellKind, ColumnSpec};
use crate::state::i18n::{self, Language};

/// Per-field configuration. Labels left empty fall back to the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldSettings {
    pub columns_label: Option<String>,
    pub columns_instructions: Option<String>,
    pub columns_add_row_label: Option<String>,
    pub rows_label: Option<String>,
    pub rows_instructions: Option<String>,
    pub rows_add_row_label: Option<String>,
    pub columns_include_show: bool,
    pub columns_include_displayheading: bool,
    pub columns_include_metaheading: bool,
    pub columns_include_width: bool,
    pub columns_min_rows: Option<usize>,
    pub columns_max_rows: Option<usize>,
    pub rows_min_rows: Option<usize>,
    pub rows_max_rows: Option<usize>,
}

/// One editable attribute of a column definition; each is a column of the
/// columns grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnAttribute {
    Heading,
    Show,
    DisplayHeading,
    MetaHeading,
    Width,
}

impl ColumnAttribute {
    pub fn key(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Show => "show",
            Self::DisplayHeading => "displayheading",
            Self::MetaHeading => "metaheading",
            Self::Width => "columnWidth",
        }
    }

    fn label_key(self) -> &'static str {
        match self {
            Self::Heading => "column.heading",
            Self::Show => "column.show",
            Self::DisplayHeading => "column.displayheading",
            Self::MetaHeading => "column.metaheading",
            Self::Width => "column.width",
        }
    }

    pub fn spec(self, language: Language) -> ColumnSpec {
        let heading = i18n::tr(language, self.label_key());
        match self {
            Self::Show => ColumnSpec::new(self.key(), heading, CellKind::Checkbox).with_width("50"),
            Self::Width => {
                ColumnSpec::new(self.key(), heading, CellKind::Singleline).with_width("100")
            }
            _ => ColumnSpec::new(self.key(), heading, CellKind::Singleline),
        }
    }

    /// Cell value of this attribute for `column`, in columns-grid form.
    pub fn cell_value(self, column: &Column) -> Option<String> {
        match self {
            Self::Heading => Some(column.heading.clone()),
            Self::Show => column
                .show
                .map(|show| if show { "1" } else { "" }.to_string()),
            Self::DisplayHeading => column.displayheading.clone(),
            Self::MetaHeading => column.metaheading.clone(),
            Self::Width => column.column_width.clone(),
        }
    }

    fn clear(self, column: &mut Column) {
        match self {
            Self::Heading => {}
            Self::Show => column.show = None,
            Self::DisplayHeading => column.displayheading = None,
            Self::MetaHeading => column.metaheading = None,
            Self::Width => column.column_width = None,
        }
    }
}

impl FieldSettings {
    pub fn attributes(&self) -> Vec<ColumnAttribute> {
        let mut attributes = vec![ColumnAttribute::Heading];
        if self.columns_include_show {
            attributes.push(ColumnAttribute::Show);
        }
        if self.columns_include_displayheading {
            attributes.push(ColumnAttribute::DisplayHeading);
        }
        if self.columns_include_metaheading {
            attributes.push(ColumnAttribute::MetaHeading);
        }
        if self.columns_include_width {
            attributes.push(ColumnAttribute::Width);
        }
        attributes
    }

    /// Column spec of the columns grid.
    pub fn column_settings(&self, language: Language) -> Vec<ColumnSpec> {
        self.attributes()
            .into_iter()
            .map(|attribute| attribute.spec(language))
            .collect()
    }

    /// Drops attributes this field does not enable.
    pub fn restrict(&self, mut column: Column) -> Column {
        let enabled = self.attributes();
        for attribute in [
            ColumnAttribute::Show,
            ColumnAttribute::DisplayHeading,
            ColumnAttribute::MetaHeading,
            ColumnAttribute::Width,
        ] {
            if !enabled.contains(&attribute) {
                attribute.clear(&mut column);
            }
        }
        column
    }

    pub fn columns_label(&self, language: Language) -> String {
        i18n::label_or(language, self.columns_label.as_deref(), "field.columns_label")
    }

    pub fn columns_instructions(&self, language: Language) -> String {
        i18n::label_or(
            language,
            self.columns_instructions.as_deref(),
            "field.columns_instructions",
        )
    }

    pub fn columns_add_row_label(&self, language: Language) -> String {
        i18n::label_or(
            language,
            self.columns_add_row_label.as_deref(),
            "field.columns_add_row",
        )
    }

    pub fn rows_label(&self, language: Language) -> String {
        i18n::label_or(language, self.rows_label.as_deref(), "field.rows_label")
    }

    pub fn rows_instructions(&self, language: Language) -> String {
        i18n::label_or(
            language,
            self.rows_instructions.as_deref(),
            "field.rows_instructions",
        )
    }

    pub fn rows_add_row_label(&self, language: Language) -> String {
        i18n::label_or(
            language,
            self.rows_add_row_label.as_deref(),
            "field.rows_add_row",
        )
    }
}
