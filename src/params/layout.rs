//! Output directory layout below the project asset root.

use std::path::{Path, PathBuf};

/// Resolved output directories for every asset family
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Character sprite sheets and portraits
    pub fn characters_dir(&self) -> PathBuf {
        self.root.join("Art/Sprites/Characters")
    }

    /// Prop sprites
    pub fn props_dir(&self) -> PathBuf {
        self.root.join("Art/Sprites/Props")
    }

    /// Parallax layers for one act (`Act1`, ..., `Epilogue`)
    pub fn background_dir(&self, act_dir: &str) -> PathBuf {
        self.root.join("Art/Backgrounds").join(act_dir)
    }

    pub fn menu_dir(&self) -> PathBuf {
        self.root.join("Art/UI/Menu")
    }

    pub fn hud_dir(&self) -> PathBuf {
        self.root.join("Art/UI/HUD")
    }

    pub fn dialogue_dir(&self) -> PathBuf {
        self.root.join("Art/UI/DialogueBox")
    }

    pub fn vfx_dir(&self) -> PathBuf {
        self.root.join("Art/VFX")
    }

    /// Music directories: the primary one first, then the `Resources` mirror
    /// the game loads clips from at runtime
    pub fn music_dirs(&self) -> [PathBuf; 2] {
        [
            self.root.join("Audio/Music"),
            self.root.join("Resources/Audio/Music"),
        ]
    }

    /// SFX directories, primary first
    pub fn sfx_dirs(&self) -> [PathBuf; 2] {
        [
            self.root.join("Audio/SFX"),
            self.root.join("Resources/Audio/SFX"),
        ]
    }
}
