use std::{fmt, os::raw::c_char, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Entry point exported by the engine for a single conversion mode.
///
/// Takes a NUL-terminated snippet and returns either null or an engine-owned,
/// NUL-terminated result that must be handed back to the engine's [`ReleaseFn`].
pub type EntryPoint = unsafe extern "C" fn(*const c_char) -> *mut c_char;

/// Engine function that reclaims a buffer previously returned by an [`EntryPoint`].
pub type ReleaseFn = unsafe extern "C" fn(*mut c_char);

/// Transformation requested from the engine. Each mode maps to exactly one entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionMode {
    /// Plain HTML conversion.
    Html,
    /// HTML with solution environments kept.
    HtmlWithSolution,
    /// HTML with solution environments removed.
    HtmlOmitSolution,
    /// Physics-macro expansion only; the result is still LaTeX.
    PhysicsMacros,
    /// Strip solution environments.
    OmitSolutions,
    /// Strip guide environments.
    OmitGuide,
    /// Strip handout environments.
    OmitHandout,
    /// Keep only handout environments.
    OnlyHandout,
}

impl ConversionMode {
    pub const ALL: [ConversionMode; 8] = [
        ConversionMode::Html,
        ConversionMode::HtmlWithSolution,
        ConversionMode::HtmlOmitSolution,
        ConversionMode::PhysicsMacros,
        ConversionMode::OmitSolutions,
        ConversionMode::OmitGuide,
        ConversionMode::OmitHandout,
        ConversionMode::OnlyHandout,
    ];

    /// Stable name used in configuration files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ConversionMode::Html => "html",
            ConversionMode::HtmlWithSolution => "html-with-solution",
            ConversionMode::HtmlOmitSolution => "html-omit-solution",
            ConversionMode::PhysicsMacros => "physics-macros",
            ConversionMode::OmitSolutions => "omit-solutions",
            ConversionMode::OmitGuide => "omit-guide",
            ConversionMode::OmitHandout => "omit-handout",
            ConversionMode::OnlyHandout => "only-handout",
        }
    }

    /// Name of the crate function that performs this conversion.
    pub fn function_name(self) -> &'static str {
        match self {
            ConversionMode::Html => "html",
            ConversionMode::HtmlWithSolution => "html_with_solution",
            ConversionMode::HtmlOmitSolution => "html_omit_solution",
            ConversionMode::PhysicsMacros => "physics_macros",
            ConversionMode::OmitSolutions => "omit_solutions",
            ConversionMode::OmitGuide => "omit_guide",
            ConversionMode::OmitHandout => "omit_handout",
            ConversionMode::OnlyHandout => "only_handout",
        }
    }

    /// Symbol exported by the native engine for this mode.
    pub fn entry_point(self) -> &'static str {
        match self {
            ConversionMode::Html => "convert_html",
            ConversionMode::HtmlWithSolution => "latex_to_html_with_solution",
            ConversionMode::HtmlOmitSolution => "latex_to_html_omit_solution",
            ConversionMode::PhysicsMacros => "latex_physics_macros",
            ConversionMode::OmitSolutions => "latex_omit_solutions",
            ConversionMode::OmitGuide => "latex_omit_guide",
            ConversionMode::OmitHandout => "latex_omit_handout",
            ConversionMode::OnlyHandout => "latex_only_handout",
        }
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown conversion mode `{0}`")]
pub struct UnknownMode(pub String);

impl FromStr for ConversionMode {
    type Err = UnknownMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        ConversionMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownMode(value.to_string()))
    }
}

/// Failures surfaced by a single conversion call. Each variant identifies the
/// step that failed; none of them is retried or recovered by the binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The snippet cannot be represented as a NUL-terminated buffer. Raised
    /// before the engine is called.
    #[error("cannot encode snippet for `{mode}`: NUL byte at offset {position}")]
    Encoding {
        mode: ConversionMode,
        position: usize,
    },
    /// The engine signalled failure by returning no result.
    #[error("engine entry point `{}` returned no result", .mode.entry_point())]
    Engine { mode: ConversionMode },
    /// The engine's result is not valid UTF-8.
    #[error("engine result for `{mode}` is not valid UTF-8 (valid up to byte {valid_up_to})")]
    Decoding {
        mode: ConversionMode,
        valid_up_to: usize,
    },
}

impl ConvertError {
    pub fn mode(&self) -> ConversionMode {
        match self {
            ConvertError::Encoding { mode, .. }
            | ConvertError::Engine { mode }
            | ConvertError::Decoding { mode, .. } => *mode,
        }
    }
}

/// Foreign ABI of a conversion engine.
///
/// # Safety
///
/// Implementors guarantee that every [`EntryPoint`] handed out by
/// [`Engine::entry_point`] accepts a NUL-terminated buffer that is only
/// borrowed for the duration of the call, and returns either null or a pointer
/// to a NUL-terminated buffer that stays valid until it is passed, exactly
/// once, to the function returned by [`Engine::release`].
pub unsafe trait Engine: Send + Sync {
    fn entry_point(&self, mode: ConversionMode) -> EntryPoint;

    fn release(&self) -> ReleaseFn;
}

/// Conversion surface consumed by the command-line job. Implementations are
/// pure pass-throughs: the same input yields the same output or error.
pub trait ConvertService: Send + Sync {
    fn convert(&self, mode: ConversionMode, snippet: &str) -> Result<String, ConvertError>;
}
