//! Demo configuration.

use std::ffi::OsString;
use std::path::PathBuf;

/// Window and asset settings for the demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Block buffer swaps on the display refresh.
    pub vsync: bool,
    /// Combined `#shader vertex` / `#shader fragment` source file.
    pub shader: PathBuf,
    /// Image to draw on the quad. A generated checkerboard when `None`.
    pub texture: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Hello World".to_owned(),
            width: 640,
            height: 480,
            vsync: true,
            shader: PathBuf::from("res/shaders/basic.shader"),
            texture: None,
        }
    }
}

impl DemoConfig {
    /// Apply command-line overrides to the defaults.
    ///
    /// Usage: `textured-quad [--no-vsync] [SHADER] [TEXTURE]`. Unrecognised
    /// flags are logged and skipped.
    pub fn from_args(args: impl IntoIterator<Item = OsString>) -> Self {
        let mut config = Self::default();
        let mut positional = 0;

        for arg in args {
            if arg == "--no-vsync" {
                config.vsync = false;
                continue;
            }
            if arg.to_string_lossy().starts_with("--") {
                log::warn!("ignoring unknown flag {}", arg.to_string_lossy());
                continue;
            }
            match positional {
                0 => config.shader = PathBuf::from(arg),
                1 => config.texture = Some(PathBuf::from(arg)),
                _ => log::warn!("ignoring extra argument {}", arg.to_string_lossy()),
            }
            positional += 1;
        }

        config
    }
}
