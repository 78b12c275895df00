//! Caller attribution: stack walking with a cached package boundary

use std::sync::OnceLock;

/// Frames scanned past the offset before the walker gives up. Guards against
/// corrupted or unexpectedly deep frame chains.
pub const MAX_CALLER_DEPTH: usize = 25;

/// Default number of innermost frames to skip before scanning, sized for the
/// facade's own call depth (leveled method, dispatch, hook, walker).
pub const DEFAULT_FRAME_OFFSET: usize = 4;

/// Frames inspected while priming the package boundary; the walker's own
/// frame sits within the first few.
const PRIME_DEPTH_LIMIT: usize = 10;

/// A resolved caller frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerFrame {
    /// Demangled function path without the trailing symbol hash.
    pub function: String,
    /// Source file, empty when debug info is unavailable.
    pub file: String,
    pub line: u32,
}

impl CallerFrame {
    /// Declaring crate of the frame's function.
    pub fn package(&self) -> &str {
        package_name(&self.function)
    }

    /// Final path segment of the function, e.g. `handle_request`.
    pub fn short_name(&self) -> &str {
        short_fn_name(&self.function)
    }
}

/// Finds the first stack frame belonging to code outside this crate.
///
/// The declaring package of the walker's own code (the "package boundary")
/// is resolved on first use and cached for the walker's lifetime; frames
/// matching it, and unwinder/runtime frames, are skipped during every scan.
///
/// `frame_offset` is a scan shortcut, not a correctness knob: the boundary
/// check recognizes the facade's frames by name regardless. It must stay at
/// or below the facade's real call depth, since an offset that overshoots
/// the caller's frame silently attributes the line to whatever sits above
/// it; recalibrate it whenever the facade gains or loses a wrapping layer.
#[derive(Debug)]
pub struct StackWalker {
    frame_offset: usize,
    boundary: OnceLock<String>,
}

impl StackWalker {
    pub fn new(frame_offset: usize) -> Self {
        Self {
            frame_offset,
            boundary: OnceLock::new(),
        }
    }

    pub fn frame_offset(&self) -> usize {
        self.frame_offset
    }

    /// The cached package boundary, once the first resolution has primed it.
    pub fn package_boundary(&self) -> Option<&str> {
        self.boundary.get().map(String::as_str)
    }

    /// Resolve the first caller frame outside the logging crate.
    ///
    /// Returns `None` when the bounded scan finds nothing, as with stripped
    /// symbols or a stack whose every frame belongs to the crate itself.
    /// That is the "caller unknown" case, not an error.
    pub fn resolve_caller(&self) -> Option<CallerFrame> {
        let boundary = self.prime_boundary()?;

        let mut result: Option<CallerFrame> = None;
        let mut index = 0usize;
        let mut scanned = 0usize;
        backtrace::trace(|frame| {
            index += 1;
            if index <= self.frame_offset {
                return true;
            }
            scanned += 1;
            if scanned > MAX_CALLER_DEPTH {
                return false;
            }

            let mut candidate: Option<CallerFrame> = None;
            backtrace::resolve_frame(frame, |symbol| {
                if candidate.is_some() {
                    return;
                }
                let Some(name) = symbol.name() else { return };
                let demangled = name.to_string();
                let function = strip_hash_suffix(&demangled).to_string();
                // Inlined facade symbols precede their caller parents in the
                // same frame; skip the symbol, not the whole frame
                if !is_caller_frame(&function, boundary) {
                    return;
                }
                let file = symbol
                    .filename()
                    .map(|path| path.display().to_string())
                    .unwrap_or_default();
                let line = symbol.lineno().unwrap_or(0);
                candidate = Some(CallerFrame {
                    function,
                    file,
                    line,
                });
            });

            match candidate {
                Some(found) => {
                    result = Some(found);
                    false
                }
                // No caller symbol in this frame, keep walking
                None => true,
            }
        });
        result
    }

    /// Resolve and cache the boundary from the walker's own innermost
    /// identifiable frame. Failed resolutions stay uncached so a later call
    /// can retry.
    fn prime_boundary(&self) -> Option<&str> {
        if let Some(boundary) = self.boundary.get() {
            return Some(boundary);
        }

        let mut own: Option<String> = None;
        let mut inspected = 0usize;
        backtrace::trace(|frame| {
            inspected += 1;
            if inspected > PRIME_DEPTH_LIMIT {
                return false;
            }
            backtrace::resolve_frame(frame, |symbol| {
                if own.is_some() {
                    return;
                }
                let Some(name) = symbol.name() else { return };
                let demangled = name.to_string();
                if !demangled.contains("::") {
                    return;
                }
                let package = package_name(strip_hash_suffix(&demangled));
                if !is_infrastructure(package) {
                    own = Some(package.to_string());
                }
            });
            own.is_none()
        });

        let package = own?;
        Some(self.boundary.get_or_init(|| package).as_str())
    }
}

/// Short name of the function that called into the logging facade, resolved
/// through a process-wide walker.
pub fn caller_name() -> Option<String> {
    static WALKER: OnceLock<StackWalker> = OnceLock::new();
    let walker = WALKER.get_or_init(|| StackWalker::new(DEFAULT_FRAME_OFFSET));
    walker
        .resolve_caller()
        .map(|frame| frame.short_name().to_string())
}

/// A frame counts as a caller when it is neither the facade's own code nor
/// runtime plumbing. Symbols without a `::` path separator are C runtime or
/// thread-bootstrap frames, never application code.
fn is_caller_frame(function: &str, boundary: &str) -> bool {
    if !function.contains("::") {
        return false;
    }
    let package = package_name(function);
    package != boundary && !is_infrastructure(package)
}

fn is_infrastructure(package: &str) -> bool {
    matches!(package, "backtrace" | "std" | "core" | "alloc" | "test")
}

/// Strip the `::h<16 hex>` disambiguator rustc appends to symbol names.
pub(crate) fn strip_hash_suffix(name: &str) -> &str {
    if let Some(pos) = name.rfind("::h") {
        let tail = &name[pos + 3..];
        if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_hexdigit()) {
            return &name[..pos];
        }
    }
    name
}

/// Declaring package (crate) of a demangled symbol path.
///
/// Trait-impl paths like `<app::Server as core::fmt::Debug>::fmt` resolve to
/// the implementing type's crate, here `app`.
pub fn package_name(function: &str) -> &str {
    let trimmed = function.trim_start_matches('<');
    match trimmed.find("::") {
        Some(pos) => &trimmed[..pos],
        None => trimmed,
    }
}

/// Final path segment of a demangled symbol, e.g. `handle_request`.
pub fn short_fn_name(function: &str) -> &str {
    function.rsplit("::").next().unwrap_or(function)
}
