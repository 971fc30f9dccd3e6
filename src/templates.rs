use std::collections::HashMap;

use tera::Tera;

use crate::error::AppError;

/// Name of the dashboard template
pub const DASHBOARD_TEMPLATE: &str = "index.html";

/// Initialize the Tera template engine with the embedded dashboard
pub fn init_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::default();
    tera.add_raw_template(
        DASHBOARD_TEMPLATE,
        include_str!("../templates/index.html"),
    )?;

    tera.register_filter("status_class", status_class_filter);

    Ok(tera)
}

/// Map a probe indicator ("up", "ready", "starting", ...) to its CSS class
fn status_class_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let status = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("status_class filter expects a string"))?;

    let class = match status {
        "up" | "ready" => "status-up",
        "starting" | "not ready" => "status-starting",
        _ => "status-down",
    };

    Ok(tera::Value::String(class.to_string()))
}
