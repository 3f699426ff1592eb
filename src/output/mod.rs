mod format;
mod json;
mod table;

pub(crate) use json::output_settings_json;
pub(crate) use table::print_settings_table;
