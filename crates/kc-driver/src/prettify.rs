use std::fmt::Write as _;

use kc_card::{Block, BlockPayload, FieldValue};
use kc_msgpack::Value;

const INDENT: &str = "  ";
/// Byte strings longer than this are summarized as a length instead of
/// printed inline — nobody wants a screenful of hex in an inspect dump.
const BYTES_SUMMARY_THRESHOLD: usize = 32;

/// Human-readable pretty print of a block's decoded value tree.
///
/// Byte strings are elided: short ones are shown as a hex preview, long
/// ones are summarized as `<N bytes>`. Opaque (unknown) blocks print their
/// raw length instead of attempting to decode them.
#[must_use]
pub fn prettify(block: &Block) -> String {
    let mut out = String::new();
    let _ = write!(out, "{} (v{})", block.name, block.version);
    match &block.payload {
        BlockPayload::Decoded(tree) => {
            out.push('\n');
            write_field_value(&mut out, tree, 1);
        }
        BlockPayload::Opaque(bytes) => {
            let _ = write!(out, " <opaque, {} bytes>", bytes.len());
        }
    }
    out
}

fn write_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_field_value(out: &mut String, value: &FieldValue, depth: usize) {
    match value {
        FieldValue::Scalar(v) => write_scalar(out, v),
        FieldValue::Array(_, items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('\n');
            for item in items {
                write_indent(out, depth);
                out.push_str("- ");
                write_field_value(out, item, depth + 1);
                out.push('\n');
            }
            out.pop();
        }
        FieldValue::Map(_, pairs) => {
            if pairs.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push('\n');
            for (key, val) in pairs {
                write_indent(out, depth);
                let _ = write!(out, "{}: ", key_label(key));
                write_field_value(out, val, depth + 1);
                out.push('\n');
            }
            out.pop();
        }
        FieldValue::Nested { value, .. } => {
            out.push_str("(nested) ");
            write_field_value(out, value, depth);
        }
    }
}

fn key_label(key: &FieldValue) -> String {
    match key {
        FieldValue::Scalar(Value::String(_, s)) => s.clone(),
        FieldValue::Scalar(other) => format!("{other:?}"),
        other => format!("{other:?}"),
    }
}

fn write_scalar(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => {
            let _ = write!(out, "{b}");
        }
        Value::Int(_, n) => {
            let _ = write!(out, "{n}");
        }
        Value::UInt(_, n) => {
            let _ = write!(out, "{n}");
        }
        Value::Float32(f) => {
            let _ = write!(out, "{f}");
        }
        Value::Float64(f) => {
            let _ = write!(out, "{f}");
        }
        Value::String(_, s) => {
            let _ = write!(out, "{s:?}");
        }
        Value::Bytes(_, bytes) => write_bytes_summary(out, bytes),
        Value::Array(_, items) => {
            let _ = write!(out, "[{} items]", items.len());
        }
        Value::Map(_, pairs) => {
            let _ = write!(out, "{{{} entries}}", pairs.len());
        }
        Value::Extension(_, tag, bytes) => {
            let _ = write!(out, "ext(type={tag}, ");
            write_bytes_summary(out, bytes);
            out.push(')');
        }
    }
}

fn write_bytes_summary(out: &mut String, bytes: &[u8]) {
    if bytes.len() > BYTES_SUMMARY_THRESHOLD {
        let _ = write!(out, "<{} bytes>", bytes.len());
        return;
    }
    out.push_str("0x");
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
}
