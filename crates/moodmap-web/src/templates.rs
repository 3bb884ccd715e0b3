//! Server-side page templates.
//!
//! Templates are compiled into the binary; the environment is built once at
//! startup and shared read-only by every handler.

use axum::response::Html;
use minijinja::Environment;

use crate::error::Error;

/// Build the template environment with every page registered.
pub fn environment() -> Environment<'static> {
  let mut env = Environment::new();
  for (name, source) in [
    ("base.html", include_str!("../templates/base.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("register.html", include_str!("../templates/register.html")),
    ("dashboard.html", include_str!("../templates/dashboard.html")),
  ] {
    env
      .add_template(name, source)
      .expect("built-in template is well-formed");
  }
  env
}

/// Render `name` with `ctx` into a full HTML response body.
pub fn render(
  env: &Environment<'static>,
  name: &str,
  ctx: minijinja::Value,
) -> Result<Html<String>, Error> {
  let template = env.get_template(name)?;
  Ok(Html(template.render(ctx)?))
}
