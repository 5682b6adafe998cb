//! Filter & rank engine
//!
//! Pure functions of `(elements, ui state, preferred identities)`; nothing is
//! cached between calls, so a render never sees stale derived state.
//!
//! # Module Structure
//!
//! - `token` - CategoryToken and the element -> token mapping
//! - `state` - SelectionUiState, toggle availability, EngineOptions
//! - `filter` - Categorized, filtered view with per-bucket counts
//! - `fast_list` - Bounded list of pinned elements

mod fast_list;
mod filter;
mod state;
mod token;

pub use fast_list::{fast_list, pin_identity};
pub use filter::{filter_and_count, CategoryCounts, FilteredView};
pub use state::{available_toggles, selector_title, EngineOptions, SelectionUiState};
pub use token::{effective_token, CategoryToken};

#[cfg(test)]
#[path = "../engine_tests.rs"]
mod tests;
