//! Safe Rust bindings to the `latex_snippet` conversion engine.
//!
//! The engine turns LaTeX-like snippets (physics macros, `solution`, `guide`
//! and `handout` environments) into HTML. This crate owns only the boundary:
//! it encodes the snippet, calls the engine entry point for the requested
//! [`ConversionMode`], decodes the result and returns the engine's buffer to
//! it. Conversion rules live entirely in the engine.
//!
//! Any type implementing [`Engine`] can sit behind a [`Converter`]. With the
//! `native` feature the crate links `latex_snippet` and exports one free
//! function per mode (`html`, `html_with_solution`, ...).

pub mod application;
pub mod config;
pub mod infra;

pub use application::convert::{
    ConversionMode, ConvertError, ConvertService, Converter, Engine, EntryPoint, ReleaseFn,
};
#[cfg(feature = "native")]
pub use application::convert::{
    NativeEngine, html, html_omit_solution, html_with_solution, native_converter, omit_guide,
    omit_handout, omit_solutions, only_handout, physics_macros,
};
