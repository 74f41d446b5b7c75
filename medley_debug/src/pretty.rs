// Copyright 2026 the Medley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable change output.
//!
//! [`PrettySink`] implements [`ChangeSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use medley_core::event::{
    AlteredEvent, AttrValue, AttributeName, ChangeSink, ElementSet, InsertedEvent, RemovedEvent,
};

/// Writes human-readable change lines to a [`Write`](std::io::Write) destination.
pub struct PrettySink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettySink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettySink").finish_non_exhaustive()
    }
}

impl PrettySink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettySink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
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

fn value_text(value: &AttrValue) -> String {
    match value {
        AttrValue::Unset => "unset".to_owned(),
        AttrValue::Element(id) => format!("{id:?}"),
        AttrValue::Ident(ident) => ident.to_string(),
    }
}

impl<W: Write> ChangeSink for PrettySink<W> {
    fn on_inserted(&mut self, e: &InsertedEvent) {
        let _ = writeln!(
            self.writer,
            "[insert] parent={:?} set={} child={:?}",
            e.parent,
            set_name(e.set),
            e.child,
        );
    }

    fn on_removed(&mut self, e: &RemovedEvent) {
        match &e.ident {
            Some(ident) => {
                let _ = writeln!(
                    self.writer,
                    "[remove] parent={:?} set={} child={:?} id={ident}",
                    e.parent,
                    set_name(e.set),
                    e.child,
                );
            }
            None => {
                let _ = writeln!(
                    self.writer,
                    "[remove] parent={:?} set={} child={:?}",
                    e.parent,
                    set_name(e.set),
                    e.child,
                );
            }
        }
    }

    fn on_altered(&mut self, e: &AlteredEvent) {
        let _ = writeln!(
            self.writer,
            "[alter] element={:?} attr={} old={} new={}",
            e.element,
            attr_name(e.attribute),
            value_text(&e.old),
            value_text(&e.new),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medley_core::element::ElementId;
    use medley_core::ident::Identifier;

    #[test]
    fn pretty_print_insert() {
        let mut sink = PrettySink::with_writer(Vec::<u8>::new());
        sink.on_inserted(&InsertedEvent {
            parent: ElementId::from_raw(0, 0),
            set: ElementSet::Ports,
            child: ElementId::from_raw(1, 0),
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("[insert]"), "got: {output}");
        assert!(output.contains("set=ports"), "got: {output}");
    }

    #[test]
    fn pretty_print_remove_carries_identifier() {
        let mut sink = PrettySink::with_writer(Vec::<u8>::new());
        sink.on_removed(&RemovedEvent {
            parent: ElementId::from_raw(0, 0),
            set: ElementSet::Nodes,
            child: ElementId::from_raw(2, 1),
            ident: Some(Identifier::new("intro").unwrap()),
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("id=intro"), "got: {output}");
    }

    #[test]
    fn pretty_print_alter() {
        let mut sink = PrettySink::with_writer(Vec::<u8>::new());
        sink.on_altered(&AlteredEvent {
            element: ElementId::from_raw(0, 0),
            attribute: AttributeName::Refer,
            old: AttrValue::Unset,
            new: AttrValue::Element(ElementId::from_raw(3, 0)),
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("attr=refer"), "got: {output}");
        assert!(output.contains("old=unset"), "got: {output}");
    }
}
