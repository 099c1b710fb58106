//! Named rendering styles: the style entity, its inheritance resolver and
//! the registry that owns the resolved set.

mod cascade;
mod registry;
#[allow(clippy::module_inception)]
mod style;

pub use cascade::{
    resolve_styles,
    Resolution,
};
pub use registry::{
    predefined,
    StyleRegistry,
};
pub use style::{
    Colour,
    ColourEntry,
    ColourSpec,
    FeatureStyle,
    StyleFields,
};

#[cfg(test)]
mod tests;
