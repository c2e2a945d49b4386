//! Voronoi diagram rendering.
//!
//! A two-stage GPU pipeline over one shared bind group: a compute pass
//! scatters randomized sites into a storage buffer, then a render pass
//! shades a full-screen quad by nearest-site lookup against that same
//! buffer. Both passes are recorded into one command buffer per frame, so
//! the fragment stage always observes exactly the sites written by the
//! compute dispatch immediately before it.

mod params;
mod renderer;
mod vertex;

pub use renderer::VoronoiRenderer;
