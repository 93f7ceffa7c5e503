//! The annotation editor.
//!
//! [`Editor`] owns every piece of editing state:
//! - the loaded images and which one is current
//! - the per-image annotation sets and the global mode
//! - the label set and active label
//! - the transient drawing state and the frozen display surface
//!
//! Input goes through [`Editor::update`] (see `handlers.rs`); exports and the
//! render frame read the editor without mutating it.

use crate::config::{AppConfig, EditorSettings};
use crate::format::{
    AnnotationFormat, ExportOptions, ExportOutput, FormatError, FormatRegistry, ProjectView,
};
use crate::geometry::{self, Surface};
use crate::keybindings::KeyBindings;
use crate::model::{Annotation, EditorMode, ImageRecord, LabelSet};
use crate::state::{AnnotationStore, EditorState, ProjectState};

/// Image annotation editor.
#[derive(Debug, Clone)]
pub struct Editor {
    pub(crate) project: ProjectState,
    pub(crate) store: AnnotationStore,
    pub(crate) labels: LabelSet,
    pub(crate) state: EditorState,
    pub(crate) settings: EditorSettings,
    pub(crate) bindings: KeyBindings,
    /// Area the surface is fitted into
    pub(crate) viewport: (f64, f64),
    /// Surface shapes on the current image are normalized against.
    /// Only re-fitted when an image editing session starts.
    pub(crate) surface: Surface,
}

impl Editor {
    /// Create an editor with default settings.
    pub fn new() -> Self {
        Self::from_config(&AppConfig::default())
    }

    /// Create an editor from a configuration, pre-populating its labels.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut labels = LabelSet::new();
        for name in &config.labels {
            labels.add(name);
        }

        let settings = config.editor.clamped();
        if settings != config.editor {
            log::warn!("Editor settings out of range, clamped to {:?}", settings);
        }

        log::debug!(
            "Editor created: viewport {}x{}, {} labels",
            config.preferences.viewport_width,
            config.preferences.viewport_height,
            labels.len()
        );

        Self {
            project: ProjectState::new(),
            store: AnnotationStore::new(),
            labels,
            state: EditorState::new(),
            settings,
            bindings: config.keybindings.clone(),
            viewport: (
                config.preferences.viewport_width,
                config.preferences.viewport_height,
            ),
            surface: Surface::default(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn project(&self) -> &ProjectState {
        &self.project
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn viewport(&self) -> (f64, f64) {
        self.viewport
    }

    pub fn mode(&self) -> EditorMode {
        self.store.mode()
    }

    pub fn current_image(&self) -> Option<&ImageRecord> {
        self.project.current_image()
    }

    /// Shapes of the current image; empty when nothing is loaded.
    pub fn current_annotations(&self) -> &[Annotation] {
        match self.project.current_name() {
            Some(name) => self.store.annotations(name),
            None => &[],
        }
    }

    /// Progress text such as `Image 2 of 5`.
    pub fn progress(&self) -> String {
        self.project.progress()
    }

    /// Pointer readout `x:<px>, y:<py>`, hidden once the pointer leaves.
    pub fn coordinate_readout(&self) -> Option<String> {
        self.state
            .pointer
            .map(|(x, y)| format!("x:{}, y:{}", x.round(), y.round()))
    }

    /// True if the image at `index` holds at least one shape.
    pub fn is_annotated(&self, index: usize) -> bool {
        self.project
            .images
            .get(index)
            .is_some_and(|img| self.store.is_annotated(&img.name))
    }

    // ------------------------------------------------------------------
    // Images and surface
    // ------------------------------------------------------------------

    /// Register a decoded image. The first image loaded becomes current.
    ///
    /// Returns false if an image with the same name is already loaded.
    pub fn load_image(&mut self, record: ImageRecord) -> bool {
        let name = record.name.clone();
        let (width, height) = (record.width, record.height);
        if !self.project.push(record) {
            return false;
        }

        self.store.ensure(&name);
        log::info!(
            "Loaded image {} ({}x{}), {} total",
            name,
            width,
            height,
            self.project.len()
        );

        if self.project.len() == 1 {
            self.begin_session();
        }
        true
    }

    /// Start editing the current image: clear transient state and fit the
    /// surface to the viewport.
    pub(crate) fn begin_session(&mut self) {
        self.state.clear();
        self.refit_surface();
    }

    pub(crate) fn refit_surface(&mut self) {
        if let Some(image) = self.project.current_image() {
            self.surface = geometry::fit_surface(
                image.width,
                image.height,
                self.viewport.0,
                self.viewport.1,
            );
            log::debug!(
                "Surface fitted to {}x{} for {}",
                self.surface.width,
                self.surface.height,
                image.name
            );
        }
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Borrow the state exports read from.
    pub fn project_view(&self) -> ProjectView<'_> {
        ProjectView::new(
            &self.project.images,
            self.project.current_index,
            &self.store,
            &self.labels,
        )
    }

    /// Run an export by format ID.
    ///
    /// Fails if the format is unknown or not offered in the current mode;
    /// returns `Ok(None)` when there is nothing to export.
    pub fn export(
        &self,
        registry: &FormatRegistry,
        format_id: &str,
        options: &ExportOptions,
    ) -> Result<Option<ExportOutput>, FormatError> {
        let format = registry
            .get(format_id)
            .ok_or_else(|| FormatError::unknown_format(format_id))?;

        let mode = self.mode();
        if !format.available_in(mode) {
            return Err(FormatError::unavailable_in_mode(format_id, mode.name()));
        }

        log::debug!("Exporting {} with {:?}", format.display_name(), options);
        format.export(&self.project_view(), options)
    }

    /// Formats offered in the current mode.
    pub fn available_exports<'r>(&self, registry: &'r FormatRegistry) -> Vec<&'r dyn AnnotationFormat> {
        registry.available_exports(self.mode())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
