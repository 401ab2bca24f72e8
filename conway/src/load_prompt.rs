// load_prompt.rs - Picking a saved grid to load

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

/// What the user did with the prompt this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptOutcome {
    Pending,
    Chosen(PathBuf),
    Cancelled,
}

/// Window listing the saved grids in a directory, with a field for typing
/// any other path.
pub struct LoadPrompt {
    dir: PathBuf,
    files: Vec<PathBuf>,
    path: String,
}

impl LoadPrompt {
    pub fn open(dir: &Path) -> Self {
        info!("Listing saved grids in {}.", dir.display());
        let files = list_saved_grids(dir).unwrap_or_else(|err| {
            warn!("Could not list saved grids in {}: {err}", dir.display());
            Vec::new()
        });
        Self {
            dir: dir.to_owned(),
            files,
            path: String::new(),
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn select(&mut self, path: &Path) {
        self.path = path.display().to_string();
    }

    /// The path to load, if one has been picked or typed.
    pub fn choice(&self) -> Option<PathBuf> {
        let path = self.path.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }

    pub fn show(&mut self, ctx: &egui::Context) -> PromptOutcome {
        let mut open = true;
        let mut outcome = PromptOutcome::Pending;
        egui::Window::new("Load a grid")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(format!("Saved grids in {}", self.dir.display()));
                egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                    if self.files.is_empty() {
                        ui.weak("(none)");
                    }
                    let mut picked = None;
                    for file in &self.files {
                        let name = file.file_name().unwrap_or_default().to_string_lossy().into_owned();
                        let selected = self.choice().as_deref() == Some(file.as_path());
                        let response = ui.selectable_label(selected, name);
                        if response.double_clicked() {
                            outcome = PromptOutcome::Chosen(file.clone());
                        } else if response.clicked() {
                            picked = Some(file.clone());
                        }
                    }
                    if let Some(file) = picked {
                        self.select(&file);
                    }
                });

                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("Path:");
                    ui.text_edit_singleline(&mut self.path);
                });
                ui.horizontal(|ui| {
                    let choice = self.choice();
                    if ui.add_enabled(choice.is_some(), egui::Button::new("Load")).clicked() {
                        if let Some(path) = choice {
                            outcome = PromptOutcome::Chosen(path);
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        outcome = PromptOutcome::Cancelled;
                    }
                });
            });
        if !open {
            outcome = PromptOutcome::Cancelled;
        }
        outcome
    }
}

/// The `.txt` files directly inside `dir`, sorted by name.
pub fn list_saved_grids(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
