//! Clinical-note templates and their resolution.
//!
//! Each therapy domain owns a fixed note skeleton; session details supplied
//! by the therapist are substituted into placeholder tokens before the text
//! goes to the generative model for filling.

mod resolver;
mod variants;

pub use resolver::{objectives_block, plan_bullets, resolve, resolve_on};
pub use variants::{TemplateVariant, Track, TrackName};
