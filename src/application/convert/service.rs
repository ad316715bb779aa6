use std::ffi::CString;

use super::buffer::EngineBuffer;
use super::types::{ConversionMode, ConvertError, ConvertService, Engine};

/// Binding layer over an [`Engine`]: encode, call, decode, release.
///
/// Holds no state besides the engine handle. Every call allocates its own
/// input buffer and owns its own result buffer, so one converter can be shared
/// across threads whenever the engine itself tolerates concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct Converter<E> {
    engine: E,
}

impl<E: Engine> Converter<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run `snippet` through the entry point for `mode`.
    ///
    /// Empty input is forwarded like any other snippet.
    pub fn convert(&self, mode: ConversionMode, snippet: &str) -> Result<String, ConvertError> {
        let input = encode(mode, snippet)?;
        let entry_point = self.engine.entry_point(mode);

        // SAFETY: `input` is NUL-terminated and outlives the call. The `Engine`
        // contract guarantees the result is null or an engine-owned buffer
        // released by `self.engine.release()`.
        let buffer = unsafe {
            let raw = entry_point(input.as_ptr());
            EngineBuffer::from_raw(raw, self.engine.release())
        }
        .ok_or(ConvertError::Engine { mode })?;

        decode(mode, &buffer)
    }

    pub fn html(&self, snippet: &str) -> Result<String, ConvertError> {
        self.convert(ConversionMode::Html, snippet)
    }

    pub fn html_with_solution(&self, snippet: &str) -> Result<String, ConvertError> {
        self.convert(ConversionMode::HtmlWithSolution, snippet)
    }

    pub fn html_omit_solution(&self, snippet: &str) -> Result<String, ConvertError> {
        self.convert(ConversionMode::HtmlOmitSolution, snippet)
    }

    /// Expand physics macros; the result is LaTeX, not HTML.
    pub fn physics_macros(&self, snippet: &str) -> Result<String, ConvertError> {
        self.convert(ConversionMode::PhysicsMacros, snippet)
    }

    pub fn omit_solutions(&self, snippet: &str) -> Result<String, ConvertError> {
        self.convert(ConversionMode::OmitSolutions, snippet)
    }

    pub fn omit_guide(&self, snippet: &str) -> Result<String, ConvertError> {
        self.convert(ConversionMode::OmitGuide, snippet)
    }

    pub fn omit_handout(&self, snippet: &str) -> Result<String, ConvertError> {
        self.convert(ConversionMode::OmitHandout, snippet)
    }

    pub fn only_handout(&self, snippet: &str) -> Result<String, ConvertError> {
        self.convert(ConversionMode::OnlyHandout, snippet)
    }
}

impl<E: Engine> ConvertService for Converter<E> {
    fn convert(&self, mode: ConversionMode, snippet: &str) -> Result<String, ConvertError> {
        Converter::convert(self, mode, snippet)
    }
}

fn encode(mode: ConversionMode, snippet: &str) -> Result<CString, ConvertError> {
    CString::new(snippet).map_err(|err| ConvertError::Encoding {
        mode,
        position: err.nul_position(),
    })
}

fn decode(mode: ConversionMode, buffer: &EngineBuffer) -> Result<String, ConvertError> {
    buffer
        .to_str()
        .map(str::to_owned)
        .map_err(|err| ConvertError::Decoding {
            mode,
            valid_up_to: err.valid_up_to(),
        })
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        ffi::{CStr, CString},
        os::raw::c_char,
        ptr,
    };

    use super::*;
    use crate::application::convert::types::{EntryPoint, ReleaseFn};

    thread_local! {
        static CALLS: Cell<usize> = const { Cell::new(0) };
        static RELEASED: Cell<usize> = const { Cell::new(0) };
        static SEEN: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
    }

    fn bump(counter: &'static std::thread::LocalKey<Cell<usize>>) {
        counter.with(|count| count.set(count.get() + 1));
    }

    extern "C" fn upper(input: *const c_char) -> *mut c_char {
        bump(&CALLS);
        // SAFETY: the converter always passes a live NUL-terminated buffer.
        let bytes = unsafe { CStr::from_ptr(input) }.to_bytes().to_vec();
        SEEN.with(|seen| seen.borrow_mut().push(bytes.clone()));
        let upper = bytes.to_ascii_uppercase();
        CString::new(upper).map_or(ptr::null_mut(), CString::into_raw)
    }

    extern "C" fn refuse(_input: *const c_char) -> *mut c_char {
        bump(&CALLS);
        ptr::null_mut()
    }

    extern "C" fn garble(_input: *const c_char) -> *mut c_char {
        bump(&CALLS);
        CString::new(vec![b'o', b'k', 0xc3]).map_or(ptr::null_mut(), CString::into_raw)
    }

    extern "C" fn release(buffer: *mut c_char) {
        bump(&RELEASED);
        // SAFETY: every fake entry point allocates with `CString::into_raw`.
        drop(unsafe { CString::from_raw(buffer) });
    }

    struct StubEngine(EntryPoint);

    unsafe impl Engine for StubEngine {
        fn entry_point(&self, _mode: ConversionMode) -> EntryPoint {
            self.0
        }

        fn release(&self) -> ReleaseFn {
            release
        }
    }

    fn counts() -> (usize, usize) {
        (CALLS.with(Cell::get), RELEASED.with(Cell::get))
    }

    #[test]
    fn result_is_decoded_and_released() {
        let converter = Converter::new(StubEngine(upper));
        let (calls, released) = counts();

        let html = converter.html("e = mc^2").expect("conversion succeeds");

        assert_eq!(html, "E = MC^2");
        assert_eq!(counts(), (calls + 1, released + 1));
    }

    #[test]
    fn empty_snippet_reaches_engine() {
        let converter = Converter::new(StubEngine(upper));
        let (calls, _) = counts();

        let output = converter.omit_guide("").expect("empty input is forwarded");

        assert_eq!(output, "");
        assert_eq!(counts().0, calls + 1);
        SEEN.with(|seen| assert_eq!(seen.borrow().last(), Some(&Vec::new())));
    }

    #[test]
    fn interior_nul_fails_before_engine_call() {
        let converter = Converter::new(StubEngine(upper));
        let before = counts();

        let err = converter
            .physics_macros("ab\0cd")
            .expect_err("NUL cannot cross the boundary");

        assert_eq!(
            err,
            ConvertError::Encoding {
                mode: ConversionMode::PhysicsMacros,
                position: 2,
            }
        );
        assert_eq!(counts(), before);
    }

    #[test]
    fn null_result_is_an_engine_failure() {
        let converter = Converter::new(StubEngine(refuse));
        let (calls, released) = counts();

        let err = converter
            .only_handout("x")
            .expect_err("null is not an empty document");

        assert_eq!(
            err,
            ConvertError::Engine {
                mode: ConversionMode::OnlyHandout
            }
        );
        assert_eq!(counts(), (calls + 1, released));
    }

    #[test]
    fn invalid_utf8_is_rejected_and_still_released() {
        let converter = Converter::new(StubEngine(garble));
        let (calls, released) = counts();

        let err = converter
            .omit_solutions("x")
            .expect_err("truncated UTF-8 sequence");

        assert_eq!(
            err,
            ConvertError::Decoding {
                mode: ConversionMode::OmitSolutions,
                valid_up_to: 2,
            }
        );
        assert_eq!(counts(), (calls + 1, released + 1));
    }

    #[test]
    fn non_ascii_text_survives_the_round_trip() {
        let converter = Converter::new(StubEngine(upper));
        let html = converter
            .html_with_solution("ψ → ħω")
            .expect("UTF-8 passes through");
        assert_eq!(html, "ψ → ħω");
    }
}
