//! TypeScript declaration generation from WebExtension API schemas.
//!
//! `webext-typegen` merges the JSON schema fragments that describe the
//! WebExtension APIs into one namespace table and compiles that table
//! into a `.d.ts` declaration file.
//!
//! # Architecture
//!
//! ```text
//! Schema fragments         Table                Output
//! ────────────────     ──────────────     ─────────────────
//! alarms.json     ─┐                   ┌─> declare namespace
//! menus.json      ─┼─> SchemaTable ────┤    browser.* blocks
//! tabs.json       ─┘   (merge.rs)      └─> hoisted helper types
//!                        │
//!                 patch.rs command log
//! ```
//!
//! Fragments for the same namespace are merged, `$extend` groups are
//! collapsed onto their target types, and `$import` nodes copy the body
//! of their donor before anything is compiled.
//!
//! # Example
//!
//! ```
//! use webext_typegen::{EmitOptions, SchemaTable, emit_declarations, input};
//!
//! let fragment = input::parse_fragment(r#"[{
//!     "namespace": "alarms",
//!     "functions": [{
//!         "name": "clear",
//!         "type": "function",
//!         "async": "callback",
//!         "parameters": [
//!             { "name": "name", "type": "string", "optional": true },
//!             {
//!                 "name": "callback",
//!                 "type": "function",
//!                 "parameters": [{ "name": "wasCleared", "type": "boolean" }]
//!             }
//!         ]
//!     }]
//! }]"#).unwrap();
//!
//! let table = SchemaTable::from_fragments([fragment], Default::default());
//! let dts = emit_declarations(&table, &EmitOptions::default()).unwrap();
//! assert!(dts.contains("function clear(name?: string): Promise<boolean>;"));
//! ```

pub mod input;
pub mod ir;
pub mod merge;
pub mod output;
pub mod patch;

pub use merge::{AliasTable, SchemaTable};
pub use output::{CompileError, EmitOptions, emit_declarations};
