//! Statement rendering
//!
//! Placeholders are `?` or `$` followed by one or more digits. They are
//! substituted strictly in order of appearance: the Nth placeholder takes the
//! Nth argument, whatever number a `$N` token carries. Placeholders with no
//! argument left stay in the output as written; surplus arguments are ignored.

use querylog_core::format_timestamp;

use crate::param::Param;

/// Render `statement` with every placeholder replaced by its quoted argument.
///
/// The result is trimmed of surrounding whitespace. Rendering never fails.
pub fn render(statement: &str, args: &[Param]) -> String {
    let mut out = String::with_capacity(statement.len() + args.len() * 8);
    let mut args = args.iter();
    let mut rest = statement;

    while let Some(pos) = rest.find(|c: char| c == '?' || c == '$') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let len = placeholder_len(tail);
        if len == 0 {
            // bare '$'
            out.push('$');
            rest = &tail[1..];
            continue;
        }
        match args.next() {
            Some(arg) => out.push_str(&render_literal(arg)),
            None => out.push_str(&tail[..len]),
        }
        rest = &tail[len..];
    }
    out.push_str(rest);

    out.trim().to_string()
}

/// Render one argument as a SQL literal.
pub fn render_literal(arg: &Param) -> String {
    match arg {
        Param::Timestamp(t) => format!("'{}'", format_timestamp(t)),
        Param::Bytes(b) => format!("'{}'", String::from_utf8_lossy(b)),
        Param::Valuer(v) => match v.value() {
            Ok(Some(value)) => format!("'{}'", value),
            Ok(None) | Err(_) => "NULL".to_string(),
        },
        other => format!("'{}'", other),
    }
}

/// Length in bytes of the placeholder at the start of `s`, or 0 if none.
fn placeholder_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    match bytes.first() {
        Some(b'?') => 1,
        Some(b'$') => {
            let digits = bytes[1..].iter().take_while(|b| b.is_ascii_digit()).count();
            if digits == 0 {
                0
            } else {
                1 + digits
            }
        }
        _ => 0,
    }
}
