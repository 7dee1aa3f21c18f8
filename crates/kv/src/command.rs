//! Command rendering

use crate::arg::Arg;

/// Render a command and its arguments as one space-separated line.
///
/// `render_command("SET", &["k".into(), "v".into()])` gives `SET k v`.
pub fn render_command(name: &str, args: &[Arg]) -> String {
    let mut out = String::from(name);
    for arg in args {
        out.push(' ');
        out.push_str(&arg.to_string());
    }
    out.trim().to_string()
}
