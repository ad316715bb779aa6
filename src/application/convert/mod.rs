//! Binding layer between callers and the external conversion engine.
//!
//! Each conversion encodes the snippet, calls exactly one engine entry point,
//! decodes the engine-owned result and hands the buffer back to the engine.
//! Nothing is cached, retried or logged here.

mod buffer;
#[cfg(feature = "native")]
mod native;
mod service;
mod types;

#[cfg(feature = "native")]
pub use native::{
    NativeEngine, html, html_omit_solution, html_with_solution, native_converter, omit_guide,
    omit_handout, omit_solutions, only_handout, physics_macros,
};
pub use service::Converter;
pub use types::{
    ConversionMode, ConvertError, ConvertService, Engine, EntryPoint, ReleaseFn, UnknownMode,
};
