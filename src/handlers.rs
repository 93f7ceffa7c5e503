//! Event handlers for the editor.
//!
//! [`Editor::update`] routes each [`EditorEvent`] to one handler. Handlers
//! mutate the store and the transient state synchronously and report what
//! happened as a [`Response`].

use crate::app::Editor;
use crate::geometry::{self, NormBox, Surface};
use crate::keybindings::EditorAction;
use crate::message::{Advisory, EditorEvent, Key, Modifiers, Response};
use crate::model::{Annotation, AnnotationShape, EditorMode, ImageRecord};
use crate::state::{BoxPhase, CursorHint};

impl Editor {
    /// Handle one event.
    pub fn update(&mut self, event: EditorEvent) -> Response {
        match event {
            EditorEvent::PointerDown { x, y } => self.handle_pointer_down(x, y),
            EditorEvent::PointerMove { x, y } => self.handle_pointer_move(x, y),
            EditorEvent::PointerUp { x, y } => self.handle_pointer_up(x, y),
            EditorEvent::Click { x, y } => self.handle_click(x, y),
            EditorEvent::DoubleClick => self.finalize_polygon(),
            EditorEvent::PointerLeave => self.handle_pointer_leave(),
            EditorEvent::Key { key, modifiers } => self.handle_key(key, modifiers),
            EditorEvent::SetMode { mode } => self.set_mode(mode),
            EditorEvent::NextImage => self.next_image(),
            EditorEvent::PrevImage => self.prev_image(),
            EditorEvent::SelectImage { index } => self.select_image(index),
            EditorEvent::LoadImage {
                name,
                width,
                height,
            } => Response::redraw_if(self.load_image(ImageRecord::new(name, width, height))),
            EditorEvent::DeleteImage => self.delete_image(),
            EditorEvent::AddLabel { name } => Response::redraw_if(self.labels.add(&name)),
            EditorEvent::SetActiveLabel { name } => self.set_active_label(name.as_deref()),
            EditorEvent::DeleteLabel { name } => self.delete_label(&name),
            EditorEvent::SetViewport { width, height } => self.set_viewport(width, height),
        }
    }

    // ------------------------------------------------------------------
    // Pointer
    // ------------------------------------------------------------------

    /// Primary button pressed at surface pixel `(x, y)`.
    pub fn handle_pointer_down(&mut self, x: f64, y: f64) -> Response {
        let Some(name) = self.project.current_name().map(str::to_owned) else {
            return Response::Ignored;
        };

        if self.labels.active().is_none() {
            log::warn!("Pointer down at ({:.1}, {:.1}) without an active label", x, y);
            return Response::Advisory(Advisory::NoActiveLabel);
        }

        self.state.pointer = Some((x, y));
        match self.mode() {
            EditorMode::Box => self.box_pointer_down(&name, x, y),
            EditorMode::Polygon => self.polygon_pointer_down(x, y),
        }
    }

    fn box_pointer_down(&mut self, name: &str, x: f64, y: f64) -> Response {
        self.state.selected_polygon = None;
        self.state.selected_vertex = None;

        let Surface { width, height } = self.surface;
        let tolerance = self.settings.handle_tolerance;

        // Topmost box first; on each box a handle beats the body.
        let hit = self.store.get(name).and_then(|set| {
            set.topmost_first().find_map(|(index, annotation)| {
                let rect = annotation.shape.pixel_rect(width, height)?;
                if let Some(handle) = geometry::hit_handle_within(x, y, &rect, tolerance) {
                    Some((index, Some(handle)))
                } else if rect.contains(x, y) {
                    Some((index, None))
                } else {
                    None
                }
            })
        });

        match hit {
            Some((index, Some(handle))) => {
                log::debug!("Box {}: grabbed handle {:?}", index, handle);
                self.state.selected_box = Some(index);
                self.state.box_phase = BoxPhase::Resizing { handle };
            }
            Some((index, None)) => {
                log::debug!("Box {}: selected", index);
                self.state.selected_box = Some(index);
                self.state.box_phase = BoxPhase::Idle;
            }
            None => {
                log::trace!("Box: drag started at ({:.1}, {:.1})", x, y);
                self.state.selected_box = None;
                self.state.box_phase = BoxPhase::Drawing {
                    origin: (x, y),
                    current: (x, y),
                };
            }
        }
        Response::Redraw
    }

    fn polygon_pointer_down(&mut self, x: f64, y: f64) -> Response {
        self.state.selected_box = None;
        self.state.selected_polygon = None;
        self.state.box_phase = BoxPhase::Idle;

        let Surface { width, height } = self.surface;
        let tolerance = self.settings.vertex_tolerance;

        if let Some(index) = geometry::vertex_hit(&self.state.draft, x, y, width, height, tolerance) {
            log::debug!("Polygon: dragging vertex {}", index);
            self.state.selected_vertex = Some(index);
        } else {
            self.state.draft.push(self.surface.normalize_point(x, y));
            log::debug!(
                "Polygon: added vertex at ({:.1}, {:.1}), {} in draft",
                x,
                y,
                self.state.draft.len()
            );
        }
        Response::Redraw
    }

    /// Pointer moved to `(x, y)`.
    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> Response {
        if self.project.current_image().is_none() {
            return Response::Ignored;
        }

        self.state.pointer = Some((x, y));
        match self.mode() {
            EditorMode::Box => match self.state.box_phase {
                BoxPhase::Drawing { origin, .. } => {
                    self.state.box_phase = BoxPhase::Drawing {
                        origin,
                        current: (x, y),
                    };
                }
                BoxPhase::Resizing { handle } => self.resize_selected_box(handle, x, y),
                BoxPhase::Idle => {}
            },
            EditorMode::Polygon => {
                if let Some(index) = self.state.selected_vertex {
                    let point = self.surface.normalize_point(x, y);
                    if let Some(vertex) = self.state.draft.get_mut(index) {
                        *vertex = point;
                    }
                }
            }
        }

        self.state.cursor = self.cursor_at(x, y);
        Response::Redraw
    }

    fn resize_selected_box(&mut self, handle: geometry::Handle, x: f64, y: f64) {
        let Some(index) = self.state.selected_box else {
            return;
        };
        let Some(name) = self.project.current_name() else {
            return;
        };

        let Surface { width, height } = self.surface;
        let min_size = self.settings.min_box_size;
        let shape = self
            .store
            .get_mut(name)
            .and_then(|set| set.annotations.get_mut(index))
            .map(|annotation| &mut annotation.shape);

        if let Some(AnnotationShape::BoundingBox(b)) = shape {
            let rect = geometry::denormalize(b, width, height);
            let resized = geometry::resize_rect(&rect, handle, x, y, min_size);
            *b = geometry::normalize_rect(&resized, width, height);
            log::trace!(
                "Box {}: resized to {:.1}x{:.1} via {:?}",
                index,
                resized.w,
                resized.h,
                handle
            );
        }
    }

    /// Cursor shape for the pointer at `(x, y)`.
    fn cursor_at(&self, x: f64, y: f64) -> CursorHint {
        let Surface { width, height } = self.surface;
        match self.mode() {
            EditorMode::Box => {
                let Some(rect) = self
                    .state
                    .selected_box
                    .and_then(|index| self.current_annotations().get(index))
                    .and_then(|annotation| annotation.shape.pixel_rect(width, height))
                else {
                    return CursorHint::Default;
                };

                if geometry::hit_handle_within(x, y, &rect, self.settings.handle_tolerance).is_some() {
                    CursorHint::Pointer
                } else if rect.contains(x, y) {
                    CursorHint::Move
                } else {
                    CursorHint::Default
                }
            }
            EditorMode::Polygon => {
                let tolerance = self.settings.vertex_tolerance;
                if geometry::vertex_hit(&self.state.draft, x, y, width, height, tolerance).is_some() {
                    CursorHint::Pointer
                } else {
                    CursorHint::Default
                }
            }
        }
    }

    /// Primary button released at `(x, y)`.
    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> Response {
        let Some(name) = self.project.current_name().map(str::to_owned) else {
            return Response::Ignored;
        };

        match self.mode() {
            EditorMode::Box => match std::mem::take(&mut self.state.box_phase) {
                BoxPhase::Idle => Response::Ignored,
                BoxPhase::Resizing { handle } => {
                    log::debug!("Box: finished resize via {:?}", handle);
                    Response::Redraw
                }
                BoxPhase::Drawing { origin, .. } => self.commit_box(&name, origin, (x, y)),
            },
            EditorMode::Polygon => {
                Response::redraw_if(self.state.selected_vertex.take().is_some())
            }
        }
    }

    fn commit_box(&mut self, name: &str, origin: (f64, f64), end: (f64, f64)) -> Response {
        let dx = (end.0 - origin.0).abs();
        let dy = (end.1 - origin.1).abs();
        let min = self.settings.min_drag_distance;
        if dx <= min || dy <= min {
            log::debug!("Box: drag {:.1}x{:.1} too small, discarded", dx, dy);
            return Response::Redraw;
        }

        let Some(label) = self.labels.active().map(str::to_owned) else {
            log::warn!("Box: active label vanished during drag");
            return Response::Advisory(Advisory::NoActiveLabel);
        };

        let b = NormBox::from_corners(
            origin.0,
            origin.1,
            end.0,
            end.1,
            self.surface.width,
            self.surface.height,
        );
        log::info!(
            "Box created on {} with label '{}': ({:.4}, {:.4}, {:.4}, {:.4})",
            name,
            label,
            b.xc,
            b.yc,
            b.w,
            b.h
        );
        let index = self.store.add(name, Annotation::bounding_box(b, label));
        self.state.selected_box = Some(index);
        Response::Redraw
    }

    /// Click without drag. Selects the topmost polygon under the pointer
    /// when no polygon is being drawn.
    pub fn handle_click(&mut self, x: f64, y: f64) -> Response {
        if self.mode() != EditorMode::Polygon || self.state.is_drafting() {
            return Response::Ignored;
        }
        let Some(name) = self.project.current_name() else {
            return Response::Ignored;
        };

        let Surface { width, height } = self.surface;
        let found = self.store.get(name).and_then(|set| {
            set.topmost_first()
                .find(|(_, a)| a.is_polygon() && a.shape.contains_pixel(x, y, width, height))
                .map(|(index, _)| index)
        });

        log::debug!("Polygon: click at ({:.1}, {:.1}) selected {:?}", x, y, found);
        self.state.selected_polygon = found;
        Response::Redraw
    }

    fn handle_pointer_leave(&mut self) -> Response {
        self.state.pointer = None;
        self.state.cursor = CursorHint::Default;
        Response::Redraw
    }

    // ------------------------------------------------------------------
    // Shape commands
    // ------------------------------------------------------------------

    /// Finish the in-progress polygon.
    pub fn finalize_polygon(&mut self) -> Response {
        if self.mode() != EditorMode::Polygon {
            return Response::Ignored;
        }
        let Some(name) = self.project.current_name().map(str::to_owned) else {
            return Response::Ignored;
        };

        let count = self.state.draft.len();
        if count < self.settings.min_polygon_vertices {
            log::debug!("Polygon: {} vertices, not enough to finish", count);
            return Response::Ignored;
        }

        let Some(label) = self.labels.active().map(str::to_owned) else {
            log::warn!("Polygon: cannot finish without an active label");
            return Response::Advisory(Advisory::NoActiveLabel);
        };

        let vertices = std::mem::take(&mut self.state.draft);
        self.state.selected_vertex = None;
        log::info!(
            "Polygon created on {} with {} vertices, label '{}'",
            name,
            count,
            label
        );
        self.store.add(&name, Annotation::polygon(vertices, label));
        Response::Redraw
    }

    /// Pop the last draft vertex, or else the most recent shape.
    pub fn undo(&mut self) -> Response {
        if self.mode() == EditorMode::Polygon && self.state.is_drafting() {
            self.state.draft.pop();
            let len = self.state.draft.len();
            if self.state.selected_vertex.is_some_and(|index| index >= len) {
                self.state.selected_vertex = None;
            }
            log::debug!("Undo: removed draft vertex, {} left", len);
            return Response::Redraw;
        }

        let Some(name) = self.project.current_name() else {
            return Response::Ignored;
        };
        let Some(removed) = self.store.pop(name) else {
            log::debug!("Undo: nothing to undo on {}", name);
            return Response::Ignored;
        };

        log::info!(
            "Undo: removed {} '{}' from {}",
            removed.shape.mode().name(),
            removed.label,
            name
        );
        self.state.clear_selection();
        if self.state.active_handle().is_some() {
            self.state.box_phase = BoxPhase::Idle;
        }
        Response::Redraw
    }

    /// Delete the dragged draft vertex, else the selected polygon, else the
    /// selected box. Only the first that applies runs.
    pub fn delete_selection(&mut self) -> Response {
        let Some(name) = self.project.current_name().map(str::to_owned) else {
            return Response::Ignored;
        };

        if self.mode() == EditorMode::Polygon {
            if let Some(index) = self.state.selected_vertex.take() {
                if index < self.state.draft.len() {
                    self.state.draft.remove(index);
                }
                log::debug!("Delete: draft vertex {}", index);
                return Response::Redraw;
            }

            if let Some(index) = self.state.selected_polygon.take() {
                if self.store.remove(&name, index).is_some() {
                    self.state.shape_removed(index);
                }
                log::info!("Delete: polygon {} from {}", index, name);
                return Response::Redraw;
            }
        }

        if let Some(index) = self.state.selected_box.take() {
            if self.store.remove(&name, index).is_some() {
                self.state.shape_removed(index);
            }
            if self.state.active_handle().is_some() {
                self.state.box_phase = BoxPhase::Idle;
            }
            log::info!("Delete: box {} from {}", index, name);
            return Response::Redraw;
        }

        Response::Ignored
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    /// Key pressed, resolved through the key bindings.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> Response {
        let Some(action) = self.bindings.action_for_key(key, modifiers) else {
            log::trace!("Unbound key {:?}", key);
            return Response::Ignored;
        };

        log::debug!("Key {:?} -> {}", key, action.name());
        self.perform(action)
    }

    /// Run a bound action.
    pub fn perform(&mut self, action: EditorAction) -> Response {
        match action {
            EditorAction::Undo => self.undo(),
            EditorAction::Commit => self.finalize_polygon(),
            EditorAction::Delete => self.delete_selection(),
            EditorAction::BoxMode => self.set_mode(EditorMode::Box),
            EditorAction::PolygonMode => self.set_mode(EditorMode::Polygon),
            EditorAction::PrevImage => self.prev_image(),
            EditorAction::NextImage => self.next_image(),
        }
    }

    // ------------------------------------------------------------------
    // Mode, navigation, labels
    // ------------------------------------------------------------------

    /// Switch modes, purging the other shape type from the current image.
    pub fn set_mode(&mut self, mode: EditorMode) -> Response {
        if mode == self.mode() {
            return Response::Ignored;
        }

        let purged = self.store.set_mode(mode, self.project.current_name());
        self.state.clear();
        log::info!("Switched to {} mode ({} shapes purged)", mode.name(), purged);
        Response::Redraw
    }

    pub fn next_image(&mut self) -> Response {
        let changed = self.project.next_image();
        self.after_image_switch(changed)
    }

    pub fn prev_image(&mut self) -> Response {
        let changed = self.project.prev_image();
        self.after_image_switch(changed)
    }

    pub fn select_image(&mut self, index: usize) -> Response {
        let changed = self.project.select(index);
        self.after_image_switch(changed)
    }

    fn after_image_switch(&mut self, changed: bool) -> Response {
        if changed {
            self.begin_session();
            log::info!(
                "Switched to {:?} ({})",
                self.project.current_name(),
                self.project.progress()
            );
        }
        Response::redraw_if(changed)
    }

    /// Delete the current image and its annotations.
    pub fn delete_image(&mut self) -> Response {
        let Some(removed) = self.project.remove_current() else {
            return Response::Ignored;
        };

        let shapes = self
            .store
            .remove_image(&removed.name)
            .map_or(0, |set| set.len());
        log::info!("Deleted image {} with {} shapes", removed.name, shapes);
        self.begin_session();
        Response::Redraw
    }

    pub fn set_active_label(&mut self, name: Option<&str>) -> Response {
        Response::redraw_if(self.labels.set_active(name))
    }

    /// Delete a label and every shape carrying it, on every image.
    pub fn delete_label(&mut self, name: &str) -> Response {
        let existed = self.labels.remove(name);
        let removed = self.store.remove_label(name);

        if self
            .project
            .current_name()
            .is_some_and(|current| removed.contains_key(current))
        {
            self.state.clear_selection();
            if self.state.active_handle().is_some() {
                self.state.box_phase = BoxPhase::Idle;
            }
        }

        let total: usize = removed.values().sum();
        log::info!(
            "Deleted label '{}': {} shapes removed from {} images",
            name,
            total,
            removed.len()
        );
        Response::redraw_if(existed || total > 0)
    }

    /// Store a new viewport size.
    ///
    /// The surface is only re-fitted right away when the current image has
    /// nothing drawn on it; otherwise it stays frozen until the next image
    /// switch so existing shapes keep their pixel positions.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Response {
        let valid = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        if !valid {
            log::warn!("Ignoring invalid viewport {}x{}", width, height);
            return Response::Ignored;
        }

        self.viewport = (width, height);
        let idle = self.current_annotations().is_empty()
            && !self.state.is_drafting()
            && self.state.box_phase == BoxPhase::Idle;
        if idle {
            self.refit_surface();
        } else {
            log::debug!("Viewport {}x{} stored, surface kept frozen", width, height);
        }
        Response::Redraw
    }
}
