// Dweve Mindnotes - Incremental Outline Parser
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Event dispatch by discriminator.
//!
//! A thin pass-through used at the transport boundary: it routes each event to
//! the handler registered under the event's [`name`](ParseEvent::name) and
//! holds no structural logic.

use crate::event::ParseEvent;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Callback receiving dispatched events.
pub type EventHandler = Box<dyn FnMut(&ParseEvent) + Send>;

/// Routes events to at most one handler per discriminator.
///
/// # Examples
///
/// ```
/// use mindnotes_core::{EventDispatcher, NodeId, ParseEvent};
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
///
/// let mut dispatcher = EventDispatcher::new();
/// dispatcher.register(ParseEvent::DELETE, move |event| {
///     sink.lock().unwrap().push(event.id());
/// });
///
/// assert!(dispatcher.dispatch(&ParseEvent::delete(NodeId(3))));
/// assert!(!dispatcher.dispatch(&ParseEvent::add(NodeId(4), None, "x")));
/// assert_eq!(*seen.lock().unwrap(), vec![NodeId(3)]);
/// ```
#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<String, EventHandler>,
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("EventDispatcher")
            .field("handlers", &names)
            .finish()
    }
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events named `name`, replacing any previous
    /// handler. Returns `true` if one was replaced.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F) -> bool
    where
        F: FnMut(&ParseEvent) + Send + 'static,
    {
        self.handlers
            .insert(name.into(), Box::new(handler))
            .is_some()
    }

    /// Remove the handler registered for `name`.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.handlers.remove(name).is_some()
    }

    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Hand `event` to its handler. Returns `false` if none is registered.
    pub fn dispatch(&mut self, event: &ParseEvent) -> bool {
        match self.handlers.get_mut(event.name()) {
            Some(handler) => {
                handler(event);
                true
            }
            None => {
                debug!(name = event.name(), id = %event.id(), "no handler, dropping event");
                false
            }
        }
    }

    /// Dispatch events in order; returns how many were handled.
    pub fn dispatch_all<'a>(&mut self, events: impl IntoIterator<Item = &'a ParseEvent>) -> usize {
        events
            .into_iter()
            .filter(|event| self.dispatch(event))
            .count()
    }

    /// Decode one serialized event and dispatch it.
    ///
    /// Events whose `name` has no registered handler are dropped before they
    /// are decoded, so unknown discriminators are not an error.
    #[cfg(feature = "serde")]
    pub fn dispatch_json(&mut self, json: &str) -> Result<bool, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let name = value
            .get("name")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        match name {
            Some(name) if self.has_handler(&name) => {
                let event: ParseEvent = serde_json::from_value(value)?;
                Ok(self.dispatch(&event))
            }
            name => {
                debug!(?name, "no handler for serialized event, dropping it");
                Ok(false)
            }
        }
    }
}
