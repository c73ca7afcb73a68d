//! Page templates and theme stylesheets for mdpdf.
//!
//! [`TemplateComposer`] turns an HTML fragment into a complete document by
//! resolving a named template and theme through an [`AssetProvider`].
//! Production code uses [`EmbeddedAssets`], the bundle compiled into the
//! binary; [`StaticAssets`] supplies a fixed set for tests.

mod assets;
mod composer;

pub use assets::{AssetProvider, DEFAULT_CSS, DEFAULT_TEMPLATE, EmbeddedAssets, StaticAssets};
pub use composer::{TemplateComposer, TemplateError};
