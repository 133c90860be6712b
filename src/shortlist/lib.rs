//! # Shortlist Architecture
//!
//! Shortlist is a **UI-agnostic list-curation library**. Items are staged
//! in named input lists, picked into one ranked main list, and annotated
//! with colored tags; whole projects round-trip through JSON archives. The
//! CLI is just one host of that library, not the other way around.
//!
//! ## The Layers
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                               │
//! │  - Parses arguments, formats output, handles terminal I/O    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes  │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                          │
//! │  - Owns the single AppState value                            │
//! │  - Dispatches to reducer operations, commits their results   │
//! │  - Bridges reducer and store (save/open/delete projects)     │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Reducer Layer (reducer/*.rs)                                │
//! │  - Pure state transitions: (&AppState, payload) → CmdResult  │
//! │  - Movement, reordering, selection, tags, project lifecycle  │
//! │  - No I/O assumptions whatsoever                             │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                      │
//! │  - Abstract DataStore trait over ProjectArchive values       │
//! │  - FileStore (production), InMemoryStore (testing)           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Dual-Record Model
//!
//! An item picked into the main list exists as **two records sharing one
//! id**: the input-list record (which stays put, flagged `is_used`) and
//! the main-list record (which carries the rank). Tag operations must keep
//! the pair's tag arrays set-equal within a single transition, and a tag's
//! `usage_count` counts the pair as two records. This join-by-id is the
//! trickiest invariant in the crate; see `reducer/tags.rs`.
//!
//! ## State Transition Contract
//!
//! Every reducer operation takes `&AppState` and returns a [`reducer::CmdResult`].
//! Changed state rides in `CmdResult::state`; `None` means the operation
//! was a no-op (missing id, unmet precondition) and the caller's state is
//! still current. Validation failures (tag naming rules) are the only
//! error path out of the reducer. Because state is replaced wholesale on
//! each commit, prior snapshots remain valid — nothing is mutated in
//! place.
//!
//! ## Testing Strategy
//!
//! 1. **Reducer** (`reducer/*.rs`): thorough unit tests of the transition
//!    rules, built on the `StateFixture` builder. This is where the lion's
//!    share of testing lives.
//! 2. **Store** (`store/*.rs`): round-trip tests, file-based ones under a
//!    tempdir.
//! 3. **API** (`api.rs`): commit semantics and store bridging against
//!    `InMemoryStore`.
//! 4. **CLI** (`tests/cli_e2e.rs`): full workflows through the binary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade — entry point for all operations
//! - [`reducer`]: Pure state transitions, one operation family per module
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`AppState`, `Project`, `Tag`, ...)
//! - [`config`]: CLI-side settings (active project tracking)
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod reducer;
pub mod store;
