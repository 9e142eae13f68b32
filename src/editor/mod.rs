//! Editors that mutate channels through the registry

mod fields;
mod widgets;

pub use fields::FieldSchemaEditor;
pub use widgets::WidgetConfigurator;
