//! Text label view of an overlay, redrawn lazily from change events
//!
//! Change events only mark cells dirty; labels are rebuilt when the owner
//! calls `refresh`, typically once per frame. A load-complete event schedules
//! a full redraw instead of per-cell work.

use std::cell::RefCell;
use std::rc::Rc;

use bitvec::prelude::*;
use ndarray::Array2;
use tracing::debug;

use crate::io::configuration::GLYPH_NONE;
use crate::overlay::{TileOverlay, VisualBinder};

#[derive(Debug)]
struct PendingRedraw {
    dirty: BitVec,
    full: bool,
}

/// One glyph per overlay cell, kept in sync through the overlay's events
///
/// Binding again moves the view to the new overlay. Events from an overlay
/// it was bound to earlier no longer reach it.
#[derive(Debug)]
pub struct LabelVisual {
    height: usize,
    labels: Array2<char>,
    pending: Rc<RefCell<PendingRedraw>>,
}

impl Default for LabelVisual {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelVisual {
    /// Create an unbound view with no cells
    pub fn new() -> Self {
        Self {
            height: 0,
            labels: Array2::from_elem((0, 0), GLYPH_NONE),
            pending: Rc::new(RefCell::new(PendingRedraw {
                dirty: BitVec::new(),
                full: false,
            })),
        }
    }

    /// Check whether a `refresh` would redraw anything
    pub fn needs_refresh(&self) -> bool {
        let pending = self.pending.borrow();
        pending.full || pending.dirty.any()
    }

    /// Redraw every dirty label from `overlay`, returning how many were drawn
    pub fn refresh(&mut self, overlay: &TileOverlay) -> usize {
        let cells: Vec<usize> = {
            let mut pending = self.pending.borrow_mut();
            let cells = if pending.full {
                (0..pending.dirty.len()).collect()
            } else {
                pending.dirty.iter_ones().collect()
            };
            pending.dirty.fill(false);
            pending.full = false;
            cells
        };

        if self.height == 0 {
            return 0;
        }

        let mut drawn = 0;
        for offset in cells {
            let x = offset / self.height;
            let z = offset % self.height;
            let Some(highlight) = overlay.highlight(x as i32, z as i32) else {
                continue;
            };
            if let Some(label) = self.labels.get_mut([x, z]) {
                *label = highlight.glyph();
                drawn += 1;
            }
        }
        drawn
    }

    /// Current label of `(x, z)`, or `None` outside the view
    pub fn label(&self, x: i32, z: i32) -> Option<char> {
        if x < 0 || z < 0 {
            return None;
        }
        self.labels.get([x as usize, z as usize]).copied()
    }

    /// Labels as text rows, highest z first, x increasing left to right
    pub fn render(&self) -> String {
        let (width, height) = self.labels.dim();
        let mut rows = Vec::with_capacity(height);
        for z in (0..height).rev() {
            let row: String = (0..width)
                .filter_map(|x| self.labels.get([x, z]).copied())
                .collect();
            rows.push(row);
        }
        rows.join("\n")
    }
}

impl VisualBinder for LabelVisual {
    fn bind(&mut self, overlay: &mut TileOverlay) {
        let width = overlay.grid().width() as usize;
        let height = overlay.grid().height() as usize;
        self.height = height;
        self.labels = Array2::from_elem((width, height), GLYPH_NONE);
        // Handlers left on a previous overlay keep only the old state alive
        self.pending = Rc::new(RefCell::new(PendingRedraw {
            dirty: bitvec![0; width * height],
            full: true,
        }));

        let space = *overlay.grid().space();
        let changed = Rc::clone(&self.pending);
        overlay.on_changed(move |event| {
            let Some(offset) = space.offset(event.x, event.z) else {
                return;
            };
            let mut pending = changed.borrow_mut();
            if offset < pending.dirty.len() {
                pending.dirty.set(offset, true);
            }
        });

        let loaded = Rc::clone(&self.pending);
        overlay.subscribe_loaded(move |_| {
            loaded.borrow_mut().full = true;
        });

        debug!(width, height, "label visual bound");
    }
}
