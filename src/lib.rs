//! # TUL
//!
//! > **Observable data containers and a tiny template engine.**
//!
//! This crate provides property-bag [`Model`]s and keyed, optionally sorted
//! [`Collection`]s that announce every mutation through named events, plus a
//! placeholder/block [`Template`] engine that renders either of them to a string.
//!
//! ## Design Notes
//!
//! ### 1. Shared Handles
//! `Model` and `Collection` are cheap-to-clone handles (`Rc` + `RefCell`). A Model
//! stored inside another Model or a Collection is the *same* Model: mutate it through
//! any handle and every holder sees the change. Handles are single-threaded
//! (`!Send`); everything runs synchronously on the caller's thread.
//!
//! ### 2. Events Without Re-entrancy Traps
//! Listeners run synchronously, in registration order, after the mutation is
//! complete. No borrow is held while they run, so a listener may freely read or
//! mutate the container that fired. See [`events`].
//!
//! ### 3. Absence Is Not An Error
//! Reads return `Option`. Only writes through a path with a missing intermediate,
//! malformed templates, and failed key generation produce errors; each module has
//! its own error enum, all of which convert into [`Error`].
//!
//! ### 4. Observability
//! The crate logs with `tracing` (structured fields, `debug`/`trace` for
//! mutations and events). See [`telemetry`].
//!
//! ## Module Tour
//!
//! ### Data ([`value`], [`path`])
//! - [`Value`]: the dynamic value stored in containers (JSON-like, plus Model and
//!   Collection handles).
//! - [`path::get`] / [`path::set`]: dotted-path access (`"name.first"`, `"items.0"`).
//!
//! ### Containers ([`model`], [`collection`])
//! - [`Model`]: fires `change` and `change:<path>` with a [`ModelChange`].
//! - [`Collection`]: fires `add`, `change` and `remove` with a [`CollectionEvent`].
//!
//! ### Plumbing ([`events`])
//! - [`Emitter`](events::Emitter) and the [`EventEmitter`] trait any type can implement.
//!
//! ### Output ([`template`])
//! - [`Template`]: `{path}` interpolation and `{{name}}...{{/name}}` iteration.
//!
//! ### Edges ([`request`], [`util`], [`telemetry`])
//! - [`request`]: request options, a pluggable `Transport`, JSONP callback registry,
//!   and a mock transport for tests.
//! - [`util`]: key generation and small string/number/object helpers.
//!
//! ## Quick Start
//!
//! ```rust
//! use tul::collection::{Collection, CollectionOptions};
//! use tul::{template, EventEmitter, Model, Value};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let people = Collection::new(CollectionOptions::new().keyfield("id"));
//! let added = Rc::new(Cell::new(0));
//! let counter = added.clone();
//! people.on("add", move |_| counter.set(counter.get() + 1));
//!
//! let ella = Model::new();
//! ella.set("id", "ella").unwrap();
//! ella.set("name", "Ella").unwrap();
//! people.update(ella.clone()).unwrap();
//! assert_eq!(added.get(), 1);
//!
//! let html = template::render("{{:p}}<li>{name}</li>{{/:p}}", &Value::from(people)).unwrap();
//! assert_eq!(html, "<li>Ella</li>");
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! RUST_LOG=debug cargo test
//! ```

pub mod collection;
pub mod error;
pub mod events;
pub mod model;
pub mod path;
pub mod request;
pub mod telemetry;
pub mod template;
pub mod util;
pub mod value;

pub use collection::{Collection, CollectionEvent, CollectionOptions};
pub use error::{Error, Result};
pub use events::EventEmitter;
pub use model::{Model, ModelChange};
pub use template::Template;
pub use value::{Map, Value};
