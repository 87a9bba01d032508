//! # FaqMatch Intents
//!
//! The simple sibling of the knowledge engine: a keyword-overlap bot over
//! tagged intents. One signal (token overlap), scored per tag rather than per
//! entry, no index and no threshold. Responses are picked at random from the
//! winning tag's canned list.
//!
//! ```text
//! faq.json
//! {"intents": [
//!   {"tag": "greeting", "patterns": ["hi", "hello there"], "responses": ["Hello!"]},
//!   ...
//! ]}
//! ```

pub mod intent;

pub use intent::{FALLBACK_TAG, Intent, IntentSet};
