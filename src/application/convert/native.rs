//! Link-time binding to the `latex_snippet` shared library.
//!
//! Every entry point returns a string allocated by the library; it goes back
//! through `latex_snippet_free_string` and nowhere else.

use std::os::raw::c_char;

use super::service::Converter;
use super::types::{ConversionMode, ConvertError, Engine, EntryPoint, ReleaseFn};

#[link(name = "latex_snippet")]
unsafe extern "C" {
    fn convert_html(snippet: *const c_char) -> *mut c_char;
    fn latex_to_html_with_solution(snippet: *const c_char) -> *mut c_char;
    fn latex_to_html_omit_solution(snippet: *const c_char) -> *mut c_char;
    fn latex_physics_macros(snippet: *const c_char) -> *mut c_char;
    fn latex_omit_solutions(snippet: *const c_char) -> *mut c_char;
    fn latex_omit_guide(snippet: *const c_char) -> *mut c_char;
    fn latex_omit_handout(snippet: *const c_char) -> *mut c_char;
    fn latex_only_handout(snippet: *const c_char) -> *mut c_char;
    fn latex_snippet_free_string(buffer: *mut c_char);
}

/// The linked `latex_snippet` engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEngine;

// SAFETY: the library reads its argument without retaining it and returns
// either null or a NUL-terminated string it allocated, which
// `latex_snippet_free_string` reclaims.
unsafe impl Engine for NativeEngine {
    fn entry_point(&self, mode: ConversionMode) -> EntryPoint {
        match mode {
            ConversionMode::Html => convert_html,
            ConversionMode::HtmlWithSolution => latex_to_html_with_solution,
            ConversionMode::HtmlOmitSolution => latex_to_html_omit_solution,
            ConversionMode::PhysicsMacros => latex_physics_macros,
            ConversionMode::OmitSolutions => latex_omit_solutions,
            ConversionMode::OmitGuide => latex_omit_guide,
            ConversionMode::OmitHandout => latex_omit_handout,
            ConversionMode::OnlyHandout => latex_only_handout,
        }
    }

    fn release(&self) -> ReleaseFn {
        latex_snippet_free_string
    }
}

pub fn native_converter() -> Converter<NativeEngine> {
    Converter::new(NativeEngine)
}

/// Convert a snippet to HTML.
pub fn html(snippet: &str) -> Result<String, ConvertError> {
    native_converter().html(snippet)
}

/// Convert a snippet to HTML, keeping solutions.
pub fn html_with_solution(snippet: &str) -> Result<String, ConvertError> {
    native_converter().html_with_solution(snippet)
}

/// Convert a snippet to HTML, dropping solutions.
pub fn html_omit_solution(snippet: &str) -> Result<String, ConvertError> {
    native_converter().html_omit_solution(snippet)
}

/// Expand physics macros in a snippet.
pub fn physics_macros(snippet: &str) -> Result<String, ConvertError> {
    native_converter().physics_macros(snippet)
}

pub fn omit_solutions(snippet: &str) -> Result<String, ConvertError> {
    native_converter().omit_solutions(snippet)
}

pub fn omit_guide(snippet: &str) -> Result<String, ConvertError> {
    native_converter().omit_guide(snippet)
}

pub fn omit_handout(snippet: &str) -> Result<String, ConvertError> {
    native_converter().omit_handout(snippet)
}

pub fn only_handout(snippet: &str) -> Result<String, ConvertError> {
    native_converter().only_handout(snippet)
}
