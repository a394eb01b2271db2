//! C bindings
//!
//! Opaque `Regex*` / `RegexMatcher*` handles with explicit free functions.
//! A matcher borrows both its regex and its subject string: the caller must
//! keep them alive and unmodified until `regex_matcher_free`.

use core::ffi::{CStr, c_char};
use core::ptr;

use log::debug;

use crate::{Matcher, Regex, RegexOption, Span};

/// Matcher handle handed out to C. The lifetimes are erased; the caller
/// upholds them.
pub type RegexMatcher = Matcher<'static, 'static>;

unsafe fn subject_str<'a>(src: *const c_char) -> Option<&'a str> {
    if src.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(src) }.to_str().ok()
}

/// Compile the given string into a regex
///
/// Returns null if the pattern is malformed or not valid UTF-8.
///
/// # Safety
/// `src` must be null or a valid NUL terminated C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn regex_compile(src: *const c_char) -> *mut Regex {
    unsafe { regex_compile_with_option(src, RegexOption::default()) }
}

/// Same as [`regex_compile`] but with a custom configuration
///
/// # Safety
/// `src` must be null or a valid NUL terminated C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn regex_compile_with_option(
    src: *const c_char,
    option: RegexOption,
) -> *mut Regex {
    let Some(src) = (unsafe { subject_str(src) }) else {
        return ptr::null_mut();
    };
    match Regex::with_option(src, option) {
        Ok(regex) => Box::into_raw(Box::new(regex)),
        Err(err) => {
            debug!("regex_compile: {err}");
            ptr::null_mut()
        }
    }
}

/// Test if the given string matches the regex
///
/// Returns false for a null regex, a null string or invalid UTF-8.
///
/// # Safety
/// 1) `regex` must be null or a pointer returned by `regex_compile` that has not been freed
/// 2) `src` must be null or a valid NUL terminated C string
#[unsafe(no_mangle)]
pub unsafe extern "C" fn regex_test(regex: *const Regex, src: *const c_char) -> bool {
    let Some(regex) = (unsafe { regex.as_ref() }) else {
        return false;
    };
    let Some(src) = (unsafe { subject_str(src) }) else {
        return false;
    };
    regex.test(src)
}

/// Returns an iterator over all the matches found in the source string
///
/// # Safety
/// 1) `regex` must be null or a pointer returned by `regex_compile` that has not been freed
/// 2) `src` must be null or a valid NUL terminated C string
/// 3) both must outlive the returned matcher, and `src` must not be modified meanwhile
/// 4) call `regex_matcher_free` on the returned pointer when done
#[unsafe(no_mangle)]
pub unsafe extern "C" fn regex_find_matches(
    regex: *const Regex,
    src: *const c_char,
) -> *mut RegexMatcher {
    let Some(regex) = (unsafe { regex.as_ref() }) else {
        return ptr::null_mut();
    };
    let Some(src) = (unsafe { subject_str(src) }) else {
        return ptr::null_mut();
    };
    Box::into_raw(Box::new(regex.find_matches(src)))
}

/// Gets the next match from the matcher and writes it to `span`.
///
/// Returns true if there was another match, false once the matcher is
/// exhausted (`span` is left untouched then).
///
/// # Safety
/// 1) `matcher` must be null or a live pointer from `regex_find_matches`
/// 2) `span` must be null or valid for writes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn regex_matcher_next(matcher: *mut RegexMatcher, span: *mut Span) -> bool {
    let Some(matcher) = (unsafe { matcher.as_mut() }) else {
        return false;
    };
    match matcher.next() {
        Some(m) => {
            if !span.is_null() {
                unsafe { span.write(m.span()) };
            }
            true
        }
        None => false,
    }
}

/// Frees the regex matcher
///
/// # Safety
/// `matcher` must be null or a pointer from `regex_find_matches` that has not been freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn regex_matcher_free(matcher: *mut RegexMatcher) {
    if matcher.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(matcher) });
}

/// Frees the regex
///
/// # Safety
/// `regex` must be null or a pointer from `regex_compile` that has not been
/// freed, with no live matcher still borrowing it.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn regex_free(regex: *mut Regex) {
    if regex.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(regex) });
}
