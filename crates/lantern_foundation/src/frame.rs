//! Chained symbol-to-value frames.
//!
//! A [`Frame`] maps symbol names to values and carries an optional parent
//! link. The same structure serves two roles: as the lexical/dynamic
//! environment of the evaluator (values are evaluated results) and as the
//! substitution store of the unifier (values are terms). Frames are cheaply
//! cloneable handles onto shared state; the whole chain is single-threaded.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// A chained mapping from symbol names to values of type `V`.
///
/// Cloning a `Frame` clones the handle, not the bindings: two clones observe
/// each other's [`define`](Frame::define) calls. New scopes are created with
/// [`child`](Frame::child) or [`make_call_frame`](Frame::make_call_frame).
pub struct Frame<V> {
    inner: Rc<FrameInner<V>>,
}

struct FrameInner<V> {
    bindings: RefCell<HashMap<Arc<str>, V>>,
    parent: Option<Frame<V>>,
}

impl<V> Clone for Frame<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<V: Clone> Frame<V> {
    /// Creates a root frame with no parent.
    #[must_use]
    pub fn root() -> Self {
        Self {
            inner: Rc::new(FrameInner {
                bindings: RefCell::new(HashMap::new()),
                parent: None,
            }),
        }
    }

    /// Creates an empty child frame whose parent is this frame.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            inner: Rc::new(FrameInner {
                bindings: RefCell::new(HashMap::new()),
                parent: Some(self.clone()),
            }),
        }
    }

    /// Looks a name up through the frame chain.
    ///
    /// Returns `None` when no frame binds the name. The evaluator maps a miss
    /// to an unbound-name error; the unifier treats it as an unresolved
    /// variable.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<V> {
        let mut frame = self;
        loop {
            if let Some(value) = frame.inner.bindings.borrow().get(name) {
                return Some(value.clone());
            }
            match &frame.inner.parent {
                Some(parent) => frame = parent,
                None => return None,
            }
        }
    }

    /// Binds a name in this frame, shadowing any parent binding.
    pub fn define(&self, name: impl Into<Arc<str>>, value: V) {
        self.inner.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Creates a child frame binding each formal to the corresponding value.
    ///
    /// The two slices must have equal length; arity checking is the caller's
    /// responsibility.
    #[must_use]
    pub fn make_call_frame(&self, formals: &[Arc<str>], values: Vec<V>) -> Self {
        debug_assert_eq!(formals.len(), values.len());
        let frame = self.child();
        for (formal, value) in formals.iter().zip(values) {
            frame.define(Arc::clone(formal), value);
        }
        frame
    }

    /// Returns the number of bindings in this frame alone.
    #[must_use]
    pub fn local_len(&self) -> usize {
        self.inner.bindings.borrow().len()
    }
}

impl<V: Clone> Default for Frame<V> {
    fn default() -> Self {
        Self::root()
    }
}

impl<V: fmt::Debug> fmt::Debug for Frame<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inner.parent.is_none() {
            return write!(f, "<global frame>");
        }
        let bindings = self.inner.bindings.borrow();
        let mut entries: Vec<_> = bindings
            .iter()
            .map(|(k, v)| format!("{k}: {v:?}"))
            .collect();
        entries.sort();
        write!(f, "<{{{}}}>", entries.join(", "))
    }
}
