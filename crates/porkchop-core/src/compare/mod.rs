//! Version comparison: line diff, section pairing and changelogs.

mod changelog;
mod comparator;
pub mod myers;
mod sections;

pub use changelog::render_changelog;
pub use comparator::Comparator;
pub use sections::{pair_sections, split_sections, PREAMBLE};
