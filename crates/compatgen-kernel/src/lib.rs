//! # compatgen kernel
//!
//! Decides which compatibility level an API type promises and keeps a single
//! human-readable comment stating that promise next to the type.
//!
//! This crate is **representation-agnostic**: it never sees source text. A
//! declaration is a name, a structural shape, and the ordered comment lines
//! ("decorations") that precede it.
//!
//! ## Architecture
//!
//! ```text
//! Maturity              ← v1 / v1beta1 / v1alpha1 / unclassified
//!     │
//! CompatibilityTags     ← +openshift:compatibility-gen:{level,internal}
//!     │
//! policy::validate      ← (internal, level, maturity) → level | violation
//!     │
//! comment::ensure_…     ← find existing / find anchor / splice
//!     │
//! walker                ← every API type of one unit, change flag
//! ```

pub mod comment;
pub mod declaration;
pub mod error;
pub mod level;
pub mod maturity;
pub mod policy;
pub mod tags;
pub mod walker;

pub use comment::{
    COMPATIBILITY_COMMENT_PREFIX, ExistingComment, canonical_comment,
    ensure_compatibility_comment,
};
pub use declaration::{API_TYPE_MARKER, Declaration, Field, TypeShape, is_api_type};
pub use error::{CompatError, PolicyViolation};
pub use level::CompatibilityLevel;
pub use maturity::Maturity;
pub use policy::validate;
pub use tags::{INTERNAL_TAG_NAME, LEVEL_TAG_NAME, CompatibilityTags, extract_tags};
pub use walker::walk_declarations;
