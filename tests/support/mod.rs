//! Counting stand-in for the native engine.
//!
//! Entry points are real `extern "C"` functions that allocate with
//! `CString::into_raw`, so the binding's ownership handling is exercised for
//! real. Counters are process-wide; tests reading them run under `#[serial]`.

#![allow(dead_code)]

use std::{
    ffi::{CStr, CString},
    os::raw::c_char,
    ptr,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use latex_snippet_bridge::{ConversionMode, Engine, EntryPoint, ReleaseFn};

static CALLS: AtomicUsize = AtomicUsize::new(0);
static ALLOCATED: AtomicUsize = AtomicUsize::new(0);
static RELEASED: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub calls: usize,
    pub allocated: usize,
    pub released: usize,
}

pub fn reset() {
    CALLS.store(0, Ordering::SeqCst);
    ALLOCATED.store(0, Ordering::SeqCst);
    RELEASED.store(0, Ordering::SeqCst);
}

pub fn counts() -> Counts {
    Counts {
        calls: CALLS.load(Ordering::SeqCst),
        allocated: ALLOCATED.load(Ordering::SeqCst),
        released: RELEASED.load(Ordering::SeqCst),
    }
}

fn hand_out(bytes: Vec<u8>) -> *mut c_char {
    match CString::new(bytes) {
        Ok(owned) => {
            ALLOCATED.fetch_add(1, Ordering::SeqCst);
            owned.into_raw()
        }
        Err(_) => ptr::null_mut(),
    }
}

fn tag(input: *const c_char, mode: &str) -> *mut c_char {
    CALLS.fetch_add(1, Ordering::SeqCst);
    // SAFETY: the binding passes a live NUL-terminated buffer.
    let snippet = unsafe { CStr::from_ptr(input) }.to_bytes();
    let mut out = format!("<div data-mode=\"{mode}\">").into_bytes();
    out.extend_from_slice(snippet);
    out.extend_from_slice(b"</div>");
    hand_out(out)
}

macro_rules! tagging_entry_points {
    ($($name:ident => $mode:literal),* $(,)?) => {
        $(
            extern "C" fn $name(input: *const c_char) -> *mut c_char {
                tag(input, $mode)
            }
        )*
    };
}

tagging_entry_points! {
    tag_html => "html",
    tag_html_with_solution => "html-with-solution",
    tag_html_omit_solution => "html-omit-solution",
    tag_physics_macros => "physics-macros",
    tag_omit_solutions => "omit-solutions",
    tag_omit_guide => "omit-guide",
    tag_omit_handout => "omit-handout",
    tag_only_handout => "only-handout",
}

extern "C" fn no_result(_input: *const c_char) -> *mut c_char {
    CALLS.fetch_add(1, Ordering::SeqCst);
    ptr::null_mut()
}

extern "C" fn latin1_result(_input: *const c_char) -> *mut c_char {
    CALLS.fetch_add(1, Ordering::SeqCst);
    // "café" in Latin-1.
    hand_out(vec![b'c', b'a', b'f', 0xe9])
}

extern "C" fn release(buffer: *mut c_char) {
    RELEASED.fetch_add(1, Ordering::SeqCst);
    // SAFETY: every buffer handed out above comes from `CString::into_raw`.
    drop(unsafe { CString::from_raw(buffer) });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Wrap the snippet in a `<div>` naming the mode.
    Tag,
    /// Return null.
    Null,
    /// Return bytes that are not UTF-8.
    Latin1,
}

#[derive(Debug)]
pub struct FakeEngine {
    behavior: Behavior,
    routed: Mutex<Vec<ConversionMode>>,
}

impl FakeEngine {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            routed: Mutex::new(Vec::new()),
        }
    }

    /// Modes whose entry point was looked up, in call order.
    pub fn routed(&self) -> Vec<ConversionMode> {
        self.routed.lock().expect("routing log poisoned").clone()
    }
}

// SAFETY: entry points return null or a `CString::into_raw` buffer, which
// `release` reclaims.
unsafe impl Engine for FakeEngine {
    fn entry_point(&self, mode: ConversionMode) -> EntryPoint {
        self.routed
            .lock()
            .expect("routing log poisoned")
            .push(mode);

        match self.behavior {
            Behavior::Null => no_result,
            Behavior::Latin1 => latin1_result,
            Behavior::Tag => match mode {
                ConversionMode::Html => tag_html,
                ConversionMode::HtmlWithSolution => tag_html_with_solution,
                ConversionMode::HtmlOmitSolution => tag_html_omit_solution,
                ConversionMode::PhysicsMacros => tag_physics_macros,
                ConversionMode::OmitSolutions => tag_omit_solutions,
                ConversionMode::OmitGuide => tag_omit_guide,
                ConversionMode::OmitHandout => tag_omit_handout,
                ConversionMode::OnlyHandout => tag_only_handout,
            },
        }
    }

    fn release(&self) -> ReleaseFn {
        release
    }
}
