// input.rs - Translating keyboard and pointer input into commands

use std::path::PathBuf;

use egui::{Key, Pos2};

/// Everything the user can ask the simulation to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ToggleRunning,
    PaintCell { row: usize, col: usize },
    Save,
    OpenLoadPrompt,
    Load(PathBuf),
    Clear,
    ApplyPattern(usize),
    Quit,
}

/// Command bound to `key`, if any. Editing keys only work while paused.
pub fn command_for_key(key: Key, running: bool) -> Option<Command> {
    match key {
        Key::Space => Some(Command::ToggleRunning),
        Key::Escape => Some(Command::Quit),
        Key::S if !running => Some(Command::Save),
        Key::L if !running => Some(Command::OpenLoadPrompt),
        Key::C if !running => Some(Command::Clear),
        _ => None,
    }
}

/// Commands for the keys pressed this frame. Nothing is returned while a
/// text field has focus.
pub fn keyboard_commands(ctx: &egui::Context, running: bool) -> Vec<Command> {
    if ctx.wants_keyboard_input() {
        return Vec::new();
    }
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    ..
                } => command_for_key(*key, running),
                _ => None,
            })
            .collect()
    })
}

/// Grid cell under `pos` for a grid drawn from `origin` with square cells of
/// `cell_size` pixels, or `None` if `pos` is off the grid.
pub fn cell_at(pos: Pos2, origin: Pos2, cell_size: f32, width: usize, height: usize) -> Option<(usize, usize)> {
    let offset = pos - origin;
    if offset.x < 0.0 || offset.y < 0.0 {
        return None;
    }
    let row = (offset.y / cell_size) as usize;
    let col = (offset.x / cell_size) as usize;
    (row < height && col < width).then_some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_keys_while_paused() {
        assert_eq!(command_for_key(Key::Space, false), Some(Command::ToggleRunning));
        assert_eq!(command_for_key(Key::S, false), Some(Command::Save));
        assert_eq!(command_for_key(Key::L, false), Some(Command::OpenLoadPrompt));
        assert_eq!(command_for_key(Key::C, false), Some(Command::Clear));
        assert_eq!(command_for_key(Key::Escape, false), Some(Command::Quit));
        assert_eq!(command_for_key(Key::A, false), None);
    }

    #[test]
    fn test_editing_keys_ignored_while_running() {
        assert_eq!(command_for_key(Key::Space, true), Some(Command::ToggleRunning));
        assert_eq!(command_for_key(Key::Escape, true), Some(Command::Quit));
        for key in [Key::S, Key::L, Key::C] {
            assert_eq!(command_for_key(key, true), None);
        }
    }

    #[test]
    fn test_cell_at() {
        let origin = pos2(8.0, 40.0);
        assert_eq!(cell_at(pos2(8.0, 40.0), origin, 10.0, 5, 3), Some((0, 0)));
        assert_eq!(cell_at(pos2(57.9, 69.9), origin, 10.0, 5, 3), Some((2, 4)));
        assert_eq!(cell_at(pos2(58.0, 45.0), origin, 10.0, 5, 3), None);
        assert_eq!(cell_at(pos2(20.0, 70.0), origin, 10.0, 5, 3), None);
        assert_eq!(cell_at(pos2(7.0, 45.0), origin, 10.0, 5, 3), None);
    }
}
