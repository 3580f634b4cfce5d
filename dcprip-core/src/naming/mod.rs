// ============================================================================
// dcprip-core/src/naming/mod.rs
// ============================================================================
//
// NAMING: Digital Cinema Naming Convention support
//
// Composition titles on playout servers follow an underscore-separated naming
// convention. This module recovers a structured metadata record from such a
// title and exposes the tag vocabularies it is built from.
//
// KEY COMPONENTS:
// - classify: Title to CompositionMetadata
// - CompositionMetadata: The recovered record
// - tags: ContentType, AspectRatio, AudioLayout, Resolution, PackageVariant
//
// AI-ASSISTANT-INFO: Naming convention module, entry point is `classify`

pub mod classifier;
pub mod metadata;
pub mod tags;

pub use classifier::classify;
pub use metadata::{CompositionMetadata, UNKNOWN_LOCALE};
pub use tags::{AspectRatio, AudioLayout, ContentType, PackageVariant, Resolution};
