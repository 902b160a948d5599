//! Streaming token cursor over the top-level object of a JSON document.
//!
//! The document is read through `serde_json`'s streaming deserializer: the top-level object is handed to a
//! [`Visitor`], which walks it with a [`TokenCursor`]. Tokens at this level are the opening brace, the keys and the
//! closing brace. Values are decoded one at a time, so at most one value is held in memory.

use std::{fmt, io};

use serde::{
    Deserialize, Deserializer as _,
    de::{Error as _, IgnoredAny, MapAccess, Visitor},
};

use crate::error::ParseError;

/// Whether a run goes on with the next document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Stop,
}

/// Cursor over the entries of an object, counting tokens the way a JSON token stream does.
pub(crate) struct TokenCursor<A> {
    access: A,
    opened: bool,
    pending_value: bool,
    closed: bool,
}

impl<A> TokenCursor<A> {
    /// Wraps the entries of an object whose opening brace has not been skipped yet.
    pub(crate) fn new(access: A) -> Self {
        Self {
            access,
            opened: false,
            pending_value: false,
            closed: false,
        }
    }

    /// Advances past exactly `count` tokens. A value waiting to be decoded counts as one token.
    pub(crate) fn skip_tokens<'de>(&mut self, count: usize) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        for _ in 0..count {
            if !self.opened {
                // the brace was consumed by the deserializer before the object was handed over
                self.opened = true;
            } else if self.closed {
                return Err(A::Error::custom("skipped past the end of the object"));
            } else if self.pending_value {
                self.access.next_value::<IgnoredAny>()?;
                self.pending_value = false;
            } else if self.access.next_key::<IgnoredAny>()?.is_some() {
                self.pending_value = true;
            } else {
                self.closed = true;
            }
        }
        Ok(())
    }

    /// Reports whether a value is waiting at the current nesting level.
    pub(crate) fn more(&self) -> bool {
        self.pending_value
    }

    /// Decodes the waiting value into `T`.
    pub(crate) fn decode_next<'de, T>(&mut self) -> Result<T, A::Error>
    where
        A: MapAccess<'de>,
        T: Deserialize<'de>,
    {
        if !self.pending_value {
            return Err(A::Error::custom("no value left to decode"));
        }
        self.pending_value = false;
        self.access.next_value()
    }
}

/// Streams the JSON object in `reader` into `visitor`.
///
/// If the visitor finishes with [`Flow::Continue`], the rest of the input must close the object and hold nothing
/// but whitespace. On [`Flow::Stop`] the remaining input is left unread.
pub(crate) fn read_object<'de, R, V>(reader: R, visitor: V) -> Result<Flow, ParseError>
where
    R: io::Read,
    V: Visitor<'de, Value = Flow>,
{
    let mut deserializer = serde_json::Deserializer::from_reader(reader);
    let mut flow = None;
    let result = (&mut deserializer).deserialize_map(Capture {
        inner: visitor,
        flow: &mut flow,
    });

    if flow == Some(Flow::Stop) {
        return Ok(Flow::Stop);
    }
    result?;
    deserializer.end()?;
    Ok(Flow::Continue)
}

/// Keeps the outcome of the wrapped visitor, which is lost when the deserializer fails to close an object that was
/// left early.
struct Capture<'a, V> {
    inner: V,
    flow: &'a mut Option<Flow>,
}

impl<'de, V> Visitor<'de> for Capture<'_, V>
where
    V: Visitor<'de, Value = Flow>,
{
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.expecting(formatter)
    }

    fn visit_map<M: MapAccess<'de>>(self, map: M) -> Result<(), M::Error> {
        *self.flow = Some(self.inner.visit_map(map)?);
        Ok(())
    }
}
