// Copyright 2026 the Medley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`ChangeSink`] and encodes events into a
//! `Vec<u8>` as little-endian records. [`decode`] reads them back as an
//! iterator of [`RecordedEvent`].
//!
//! Handles are stored as raw index/generation pairs; decoded handles carry
//! no liveness guarantee and must be checked against a store before use.

use medley_core::element::ElementId;
use medley_core::event::{
    AlteredEvent, AttrValue, AttributeName, ChangeSink, ElementSet, InsertedEvent, RemovedEvent,
};
use medley_core::ident::Identifier;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_INSERTED: u8 = 1;
const TAG_REMOVED: u8 = 2;
const TAG_ALTERED: u8 = 3;

const VALUE_UNSET: u8 = 0;
const VALUE_ELEMENT: u8 = 1;
const VALUE_IDENT: u8 = 2;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`ChangeSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_id(&mut self, id: ElementId) {
        self.write_u32(id.index());
        self.write_u32(id.generation());
    }

    fn write_set(&mut self, set: ElementSet) {
        self.write_u8(match set {
            ElementSet::Ports => 0,
            ElementSet::Binds => 1,
            ElementSet::Nodes => 2,
            ElementSet::DefaultComponent => 3,
        });
    }

    fn write_attribute(&mut self, attribute: AttributeName) {
        self.write_u8(match attribute {
            AttributeName::Id => 0,
            AttributeName::Refer => 1,
        });
    }

    fn write_ident(&mut self, ident: &Identifier) {
        let bytes = ident.as_str().as_bytes();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "identifier length capped at u32::MAX for recording"
        )]
        self.write_u32(bytes.len().min(u32::MAX as usize) as u32);
        self.buf.extend_from_slice(bytes);
    }

    fn write_option_ident(&mut self, ident: Option<&Identifier>) {
        match ident {
            Some(ident) => {
                self.write_u8(1);
                self.write_ident(ident);
            }
            None => self.write_u8(0),
        }
    }

    fn write_value(&mut self, value: &AttrValue) {
        match value {
            AttrValue::Unset => self.write_u8(VALUE_UNSET),
            AttrValue::Element(id) => {
                self.write_u8(VALUE_ELEMENT);
                self.write_id(*id);
            }
            AttrValue::Ident(ident) => {
                self.write_u8(VALUE_IDENT);
                self.write_ident(ident);
            }
        }
    }
}

impl ChangeSink for RecorderSink {
    fn on_inserted(&mut self, e: &InsertedEvent) {
        self.write_u8(TAG_INSERTED);
        self.write_id(e.parent);
        self.write_set(e.set);
        self.write_id(e.child);
    }

    fn on_removed(&mut self, e: &RemovedEvent) {
        self.write_u8(TAG_REMOVED);
        self.write_id(e.parent);
        self.write_set(e.set);
        self.write_id(e.child);
        self.write_option_ident(e.ident.as_ref());
    }

    fn on_altered(&mut self, e: &AlteredEvent) {
        self.write_u8(TAG_ALTERED);
        self.write_id(e.element);
        self.write_attribute(e.attribute);
        self.write_value(&e.old);
        self.write_value(&e.new);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// An [`InsertedEvent`].
    Inserted(InsertedEvent),
    /// A [`RemovedEvent`].
    Removed(RemovedEvent),
    /// An [`AlteredEvent`].
    Altered(AlteredEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_id(&mut self) -> Option<ElementId> {
        let index = self.read_u32()?;
        let generation = self.read_u32()?;
        Some(ElementId::from_raw(index, generation))
    }

    fn read_set(&mut self) -> Option<ElementSet> {
        Some(match self.read_u8()? {
            0 => ElementSet::Ports,
            1 => ElementSet::Binds,
            2 => ElementSet::Nodes,
            _ => ElementSet::DefaultComponent,
        })
    }

    fn read_attribute(&mut self) -> Option<AttributeName> {
        Some(match self.read_u8()? {
            0 => AttributeName::Id,
            _ => AttributeName::Refer,
        })
    }

    fn read_ident(&mut self) -> Option<Identifier> {
        let len = self.read_u32()? as usize;
        if self.remaining() < len {
            return None;
        }
        let text = core::str::from_utf8(&self.data[self.pos..self.pos + len]).ok()?;
        self.pos += len;
        Identifier::new(text).ok()
    }

    fn read_option_ident(&mut self) -> Option<Option<Identifier>> {
        let present = self.read_u8()?;
        if present == 0 {
            return Some(None);
        }
        Some(Some(self.read_ident()?))
    }

    fn read_value(&mut self) -> Option<AttrValue> {
        Some(match self.read_u8()? {
            VALUE_UNSET => AttrValue::Unset,
            VALUE_ELEMENT => AttrValue::Element(self.read_id()?),
            _ => AttrValue::Ident(self.read_ident()?),
        })
    }

    fn decode_inserted(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Inserted(InsertedEvent {
            parent: self.read_id()?,
            set: self.read_set()?,
            child: self.read_id()?,
        }))
    }

    fn decode_removed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Removed(RemovedEvent {
            parent: self.read_id()?,
            set: self.read_set()?,
            child: self.read_id()?,
            ident: self.read_option_ident()?,
        }))
    }

    fn decode_altered(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Altered(AlteredEvent {
            element: self.read_id()?,
            attribute: self.read_attribute()?,
            old: self.read_value()?,
            new: self.read_value()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_INSERTED => self.decode_inserted(),
            TAG_REMOVED => self.decode_removed(),
            TAG_ALTERED => self.decode_altered(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(s: &str) -> Identifier {
        Identifier::new(s).unwrap()
    }

    #[test]
    fn round_trip_inserted() {
        let mut rec = RecorderSink::new();
        let orig = InsertedEvent {
            parent: ElementId::from_raw(0, 0),
            set: ElementSet::Ports,
            child: ElementId::from_raw(5, 2),
        };
        rec.on_inserted(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::Inserted(e) => assert_eq!(*e, orig),
            other => panic!("expected Inserted, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_removed_with_identifier() {
        let mut rec = RecorderSink::new();
        let orig = RemovedEvent {
            parent: ElementId::from_raw(1, 0),
            set: ElementSet::Nodes,
            child: ElementId::from_raw(4, 1),
            ident: Some(ident("intro")),
        };
        rec.on_removed(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::Removed(e) => assert_eq!(*e, orig),
            other => panic!("expected Removed, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_removed_without_identifier() {
        let mut rec = RecorderSink::new();
        let orig = RemovedEvent {
            parent: ElementId::from_raw(1, 0),
            set: ElementSet::Binds,
            child: ElementId::from_raw(7, 0),
            ident: None,
        };
        rec.on_removed(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::Removed(e) => assert_eq!(*e, orig),
            other => panic!("expected Removed, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_altered() {
        let mut rec = RecorderSink::new();
        let orig = AlteredEvent {
            element: ElementId::from_raw(2, 0),
            attribute: AttributeName::Id,
            old: AttrValue::Ident(ident("before")),
            new: AttrValue::Ident(ident("after")),
        };
        rec.on_altered(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::Altered(e) => assert_eq!(*e, orig),
            other => panic!("expected Altered, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_multiple_events() {
        let mut rec = RecorderSink::new();
        rec.on_inserted(&InsertedEvent {
            parent: ElementId::from_raw(0, 0),
            set: ElementSet::Nodes,
            child: ElementId::from_raw(1, 0),
        });
        rec.on_altered(&AlteredEvent {
            element: ElementId::from_raw(0, 0),
            attribute: AttributeName::Refer,
            old: AttrValue::Unset,
            new: AttrValue::Element(ElementId::from_raw(9, 0)),
        });
        rec.on_removed(&RemovedEvent {
            parent: ElementId::from_raw(0, 0),
            set: ElementSet::Nodes,
            child: ElementId::from_raw(1, 0),
            ident: Some(ident("n1")),
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], RecordedEvent::Inserted(_)));
        assert!(matches!(events[1], RecordedEvent::Altered(_)));
        assert!(matches!(events[2], RecordedEvent::Removed(_)));
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_inserted(&InsertedEvent {
            parent: ElementId::from_raw(0, 0),
            set: ElementSet::Ports,
            child: ElementId::from_raw(1, 0),
        });
        let bytes = rec.into_bytes();
        let events: Vec<_> = decode(&bytes[..bytes.len() - 2]).collect();
        assert!(events.is_empty());
    }
}
