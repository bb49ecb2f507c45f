//! # Scraping “specs” module
//!
//! Page-specific readers. A spec knows *where the image lives in the HTML*
//! of one remote page and *how to pull it out tolerantly*; nothing else.
//!
//! ## What lives here
//! - **Pure parsing** of a response body that some other layer fetched.
//! - **Strategy choice & precedence** (embedded script data before `<img>`
//!   elements before page metadata).
//! - **Acceptance rules** that reject thumbnails/icons before a candidate wins.
//!
//! ## What does **not** live here
//! - **Networking** (`core::net`), query composition (`resolve`).
//! - **Pacing, progress, report writing** (`enrich`, `file`).
//!
//! ## Conventions & invariants
//! - Same body in, same answer out. No I/O, no clocks.
//! - Absence of any signal is not an error: a strategy that finds nothing
//!   returns `None` and the next one runs.
//! - Specs are testable **offline** against captured fixtures (saved HTML).
//!
//! In short: **`specs` knows how to read the pages.** Other layers decide when
//! to fetch and what to do with the answer.
pub mod search_page;
