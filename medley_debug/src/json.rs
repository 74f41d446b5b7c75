// Copyright 2026 the Medley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export for recorded change streams.
//!
//! [`export`] reads recorded bytes from a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes a JSON array
//! of event objects to the given writer, one object per event, suitable
//! for diffing or feeding into external tooling.

use std::io::{self, Write};

use serde_json::{Value, json};

use medley_core::element::ElementId;
use medley_core::event::{AttrValue, AttributeName, ElementSet};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a JSON array.
///
/// # Errors
///
/// Returns any I/O error from the underlying writer.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Inserted(e) => {
                events.push(json!({
                    "event": "inserted",
                    "parent": id_json(e.parent),
                    "set": set_name(e.set),
                    "child": id_json(e.child),
                }));
            }
            RecordedEvent::Removed(e) => {
                events.push(json!({
                    "event": "removed",
                    "parent": id_json(e.parent),
                    "set": set_name(e.set),
                    "child": id_json(e.child),
                    "id": e.ident.as_ref().map(|i| i.as_str().to_owned()),
                }));
            }
            RecordedEvent::Altered(e) => {
                events.push(json!({
                    "event": "altered",
                    "element": id_json(e.element),
                    "attribute": attr_name(e.attribute),
                    "old": value_json(&e.old),
                    "new": value_json(&e.new),
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn id_json(id: ElementId) -> Value {
    json!({
        "index": id.index(),
        "generation": id.generation(),
    })
}

fn set_name(set: ElementSet) -> &'static str {
    match set {
        ElementSet::Ports => "ports",
        ElementSet::Binds => "binds",
        ElementSet::Nodes => "nodes",
        ElementSet::DefaultComponent => "default",
    }
}

fn attr_name(attribute: AttributeName) -> &'static str {
    match attribute {
        AttributeName::Id => "id",
        AttributeName::Refer => "refer",
    }
}

fn value_json(value: &AttrValue) -> Value {
    match value {
        AttrValue::Unset => Value::Null,
        AttrValue::Element(id) => id_json(*id),
        AttrValue::Ident(ident) => Value::String(ident.as_str().to_owned()),
    }
}
