//! Deployable site assembly for the host-side `cargo run` helper.
//!
//! `static/` holds `index.html` and, once wasm-pack has run, the `pkg/`
//! bundle. [`publish`] mirrors it into `dist/`; call it only after the wasm
//! build finished so `dist/pkg` matches the sources.

use std::path::Path;

use fs_extra::dir::{self, CopyOptions};

/// Replace the contents of `dist` with a copy of `site`.
///
/// # Errors
///
/// Returns the `fs_extra` error if `dist` cannot be cleared or `site`
/// cannot be copied.
pub fn publish(site: &Path, dist: &Path) -> Result<u64, fs_extra::error::Error> {
    dir::create_all(dist, true)?;
    let options = CopyOptions {
        overwrite: true,
        content_only: true,
        ..CopyOptions::new()
    };
    dir::copy(site, dist, &options)
}
