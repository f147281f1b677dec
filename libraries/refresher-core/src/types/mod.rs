/// Domain types for browsing a media server library
pub mod ids;
pub mod library;
pub mod target;

pub use ids::{ItemId, SectionId};
pub use library::{
    Child, ChildListing, Episode, Item, ItemKind, ItemListing, Season, Section, SectionKind,
};
pub use target::{RefreshTarget, Selection};
