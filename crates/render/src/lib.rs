//! # boreas-render
//!
//! Renders the result of an EOF analysis as one static PNG: the spatial
//! mode map on a diverging colour gradient, a thin explained-variance
//! meter, and a bar chart of the mode's time coefficients.
//!
//! Rendering is a pure function of its inputs; no drawing state leaks into
//! (or out of) the computation code.

mod error;
mod figure;

pub use error::RenderError;
pub use figure::{RenderConfig, render_figure};
