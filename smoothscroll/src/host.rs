use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

/// Geometry of an element along the scroll axis, in scroll-content coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub start: f64,
    pub size: f64,
}

impl Bounds {
    pub fn new(start: f64, size: f64) -> Self {
        Self { start, size }
    }

    pub fn end(&self) -> f64 {
        self.start + self.size
    }
}

/// The environment a scroll animation reads from and writes to.
///
/// Methods take `&self`: hosts are shared between the scroller, its in-flight runs and any
/// trigger bindings, so writable state lives behind interior mutability (as DOM handles do).
pub trait ScrollHost {
    /// Looks up an element by identifier. `None` when it does not exist (yet).
    fn element_bounds(&self, id: &str) -> Option<Bounds>;

    /// Size of the visible area along the scroll axis.
    fn viewport_size(&self) -> f64;

    fn scroll_offset(&self) -> f64;

    fn set_scroll_offset(&self, offset: f64);
}

/// An in-memory [`ScrollHost`] that records every scroll write.
#[derive(Debug, Default)]
pub struct MemoryHost {
    elements: RefCell<BTreeMap<String, Bounds>>,
    viewport_size: Cell<f64>,
    scroll_offset: Cell<f64>,
    writes: RefCell<Vec<f64>>,
}

impl MemoryHost {
    pub fn new(viewport_size: f64) -> Self {
        Self {
            viewport_size: Cell::new(viewport_size),
            ..Self::default()
        }
    }

    pub fn with_element(self, id: &str, bounds: Bounds) -> Self {
        self.insert_element(id, bounds);
        self
    }

    pub fn insert_element(&self, id: &str, bounds: Bounds) {
        self.elements.borrow_mut().insert(id.to_string(), bounds);
    }

    pub fn remove_element(&self, id: &str) -> Option<Bounds> {
        self.elements.borrow_mut().remove(id)
    }

    pub fn set_viewport_size(&self, viewport_size: f64) {
        self.viewport_size.set(viewport_size);
    }

    /// Moves the scroll offset without recording a write (e.g. user scrolling).
    pub fn jump_to(&self, offset: f64) {
        self.scroll_offset.set(offset);
    }

    pub fn writes(&self) -> Vec<f64> {
        self.writes.borrow().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }

    pub fn clear_writes(&self) {
        self.writes.borrow_mut().clear();
    }
}

impl ScrollHost for MemoryHost {
    fn element_bounds(&self, id: &str) -> Option<Bounds> {
        self.elements.borrow().get(id).copied()
    }

    fn viewport_size(&self) -> f64 {
        self.viewport_size.get()
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset.get()
    }

    fn set_scroll_offset(&self, offset: f64) {
        self.scroll_offset.set(offset);
        self.writes.borrow_mut().push(offset);
    }
}
