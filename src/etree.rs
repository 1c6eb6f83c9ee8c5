//! Element tree utilities.
//!
//! Text gathering and tag unwrapping from the `html-cleaning` crate, which
//! follows the lxml text/tail model:
//!
//! ```html
//! <div>
//!   TEXT HERE          <!-- div's "text" -->
//!   <span>inner</span>
//!   TAIL HERE          <!-- span's "tail" -->
//! </div>
//! ```

pub use html_cleaning::tree::{iter_text, strip};
