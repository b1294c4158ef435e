use crate::animation::{all_frame_ids, FrameId};
use crate::geometry::Size;
use anyhow::Context;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Directory, relative to the resource base, holding the sprite sheets.
pub const ASSETS_DIR: &str = "assets";
pub const FRAME_PREFIX: &str = "MiniSonicAnimations_";

/// Resolve `relative` against the resource base directory.
///
/// A packaged build ships its assets next to the executable; a development
/// run finds them under the working directory. The returned path is always
/// absolute but may not exist.
pub fn resource_path(relative: impl AsRef<Path>) -> PathBuf {
    let relative = relative.as_ref();
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        let packaged = exe_dir.join(relative);
        if packaged.exists() {
            return packaged;
        }
    }
    let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    base.join(relative)
}

pub fn frame_file_name(id: FrameId) -> String {
    format!("{FRAME_PREFIX}{id}.png")
}

/// Scale `img` to fit a `box_size` square, keeping aspect ratio. Nearest
/// neighbour keeps the pixel art crisp.
pub fn scale_to_fit(img: &DynamicImage, box_size: u32) -> RgbaImage {
    img.resize(box_size, box_size, FilterType::Nearest).to_rgba8()
}

/// A decoded frame together with its horizontal mirror.
#[derive(Debug, Clone)]
pub struct Frame {
    image: RgbaImage,
    mirrored: RgbaImage,
}

impl Frame {
    pub fn new(image: RgbaImage) -> Self {
        let mirrored = imageops::flip_horizontal(&image);
        Self { image, mirrored }
    }

    pub fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }

    pub fn pixels(&self, flip_horizontal: bool) -> &RgbaImage {
        if flip_horizontal {
            &self.mirrored
        } else {
            &self.image
        }
    }
}

pub fn load_frame(path: &Path, box_size: u32) -> anyhow::Result<Frame> {
    let img = image::open(path).with_context(|| format!("failed to load {}", path.display()))?;
    Ok(Frame::new(scale_to_fit(&img, box_size)))
}

/// All sprite frames, keyed by frame number. Frames that failed to load are
/// simply absent and render blank.
#[derive(Debug, Clone, Default)]
pub struct FrameStore {
    frames: HashMap<FrameId, Frame>,
}

impl FrameStore {
    pub fn load(dir: &Path, box_size: u32) -> Self {
        let mut frames = HashMap::new();
        for id in all_frame_ids() {
            let path = dir.join(frame_file_name(id));
            match load_frame(&path, box_size) {
                Ok(frame) => {
                    frames.insert(id, frame);
                }
                Err(err) => {
                    let error = format!("{err:#}");
                    tracing::warn!(frame = id, %error, "sprite frame unavailable");
                }
            }
        }
        tracing::debug!(loaded = frames.len(), dir = %dir.display(), "sprite frames loaded");
        Self { frames }
    }

    pub fn from_frames(frames: impl IntoIterator<Item = (FrameId, Frame)>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn get(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get(&id)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn missing(&self) -> Vec<FrameId> {
        all_frame_ids()
            .into_iter()
            .filter(|id| !self.frames.contains_key(id))
            .collect()
    }
}

pub fn asset_dir() -> PathBuf {
    resource_path(ASSETS_DIR)
}
