//! Lexical scope tracking for a single file's traversal.
//!
//! One frame is pushed per function or block and popped on leaving it; the
//! bottom frame is the global scope and survives until the whole-file pass
//! finishes. Shadowing is resolved innermost-first: marking a name used flips
//! the flag in the nearest frame that declares it and stops there.

#[derive(Clone, Debug)]
struct Binding {
    name: String,
    line: usize,
    used: bool,
}

/// A single lexical binding table: declared name -> (used flag, line).
#[derive(Clone, Debug, Default)]
pub struct ScopeFrame {
    bindings: Vec<Binding>,
}

impl ScopeFrame {
    fn declare(&mut self, name: &str, line: usize) {
        self.bindings.push(Binding {
            name: name.to_string(),
            line,
            used: false,
        });
    }

    fn mark_used(&mut self, name: &str) -> bool {
        // Within one frame a redeclaration shadows the earlier binding, so
        // the latest match wins.
        match self.bindings.iter_mut().rev().find(|b| b.name == name) {
            Some(binding) => {
                binding.used = true;
                true
            }
            None => false,
        }
    }

    /// Bindings never marked used, in declaration order.
    pub fn unused(&self) -> impl Iterator<Item = (&str, usize)> {
        self.bindings
            .iter()
            .filter(|b| !b.used)
            .map(|b| (b.name.as_str(), b.line))
    }
}

/// Stack of scope frames matching the lexical nesting of the source.
#[derive(Clone, Debug)]
pub struct ScopeTracker {
    frames: Vec<ScopeFrame>,
}

impl ScopeTracker {
    pub fn new() -> Self {
        Self {
            frames: vec![ScopeFrame::default()],
        }
    }

    pub fn enter(&mut self) {
        self.frames.push(ScopeFrame::default());
    }

    /// Pops and returns the innermost frame.
    ///
    /// Panics if only the global frame remains: scope-opening and closing
    /// nodes are paired, so hitting this is a caller bug, not bad input.
    pub fn exit(&mut self) -> ScopeFrame {
        assert!(
            self.frames.len() > 1,
            "attempted to pop the global scope frame"
        );
        self.frames.pop().expect("scope stack is never empty")
    }

    pub fn declare(&mut self, name: &str, line: usize) {
        self.frames
            .last_mut()
            .expect("scope stack is never empty")
            .declare(name, line);
    }

    /// Resolves `name` innermost-first and marks the first match used.
    /// Returns false when no frame declares it (globals, builtins, imports),
    /// which is untracked rather than diagnosed.
    pub fn mark_used(&mut self, name: &str) -> bool {
        for frame in self.frames.iter_mut().rev() {
            if frame.mark_used(name) {
                return true;
            }
        }
        false
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Consumes the tracker and returns the global frame for the end-of-file
    /// unused-variable flush.
    pub fn into_global(mut self) -> ScopeFrame {
        assert_eq!(
            self.frames.len(),
            1,
            "scope frames left open at end of traversal"
        );
        self.frames.pop().expect("scope stack is never empty")
    }
}

impl Default for ScopeTracker {
    fn default() -> Self {
        Self::new()
    }
}
