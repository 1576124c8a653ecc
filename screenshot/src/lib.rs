//! Screenshot export.
//!
//! The frame is captured by the renderer; PNG encoding and the file write run
//! on the async compute pool and are never awaited.

use {
    bevy::{
        prelude::*,
        render::view::screenshot::{Screenshot, ScreenshotCaptured},
        tasks::AsyncComputeTaskPool,
    },
    std::path::{Path, PathBuf},
    thiserror::Error,
};

pub struct ScreenshotExportPlugin;

impl Plugin for ScreenshotExportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScreenshotSettings>()
            .add_observer(on_take_screenshot);
    }
}

/// Capture the primary window and write it to [`ScreenshotSettings::path`].
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct TakeScreenshot;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ScreenshotSettings {
    pub path: PathBuf,
}

impl Default for ScreenshotSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("screenshots/screenshot.png"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScreenshotError {
    #[error("cannot convert captured frame: {0}")]
    Convert(String),
    #[error("cannot create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

fn on_take_screenshot(
    _trigger: On<TakeScreenshot>,
    mut commands: Commands,
    settings: Res<ScreenshotSettings>,
) {
    let path = settings.path.clone();
    info!(path = %path.display(), "taking screenshot");

    commands
        .spawn(Screenshot::primary_window())
        .observe(move |trigger: On<ScreenshotCaptured>| {
            let image = trigger.event().image.clone();
            let path = path.clone();
            AsyncComputeTaskPool::get()
                .spawn(async move {
                    match save_png(image, &path) {
                        Ok(()) => info!(path = %path.display(), "screenshot saved"),
                        Err(error) => warn!(%error, "screenshot failed"),
                    }
                })
                .detach();
        });
}

/// Encodes `image` as PNG at `path`, creating parent directories as needed.
pub fn save_png(image: Image, path: &Path) -> Result<(), ScreenshotError> {
    let frame = image
        .try_into_dynamic()
        .map_err(|error| ScreenshotError::Convert(error.to_string()))?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ScreenshotError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    // PNG export drops alpha.
    frame
        .to_rgb8()
        .save(path)
        .map_err(|error| ScreenshotError::Write {
            path: path.to_path_buf(),
            message: error.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        bevy::{
            asset::RenderAssetUsages,
            render::render_resource::{Extent3d, TextureDimension, TextureFormat},
        },
    };

    fn red_pixel() -> Image {
        Image::new_fill(
            Extent3d {
                width: 2,
                height: 2,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            &[255, 0, 0, 255],
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::default(),
        )
    }

    #[test]
    fn test_default_path() {
        assert_eq!(
            ScreenshotSettings::default().path,
            PathBuf::from("screenshots/screenshot.png")
        );
    }

    #[test]
    fn test_save_png_creates_missing_directories() {
        let dir = std::env::temp_dir().join(format!("psi_runner_shot_{}", std::process::id()));
        let path = dir.join("nested").join("shot.png");

        save_png(red_pixel(), &path).expect("png written");

        let bytes = std::fs::read(&path).expect("file exists");
        assert_eq!(&bytes[1..4], b"PNG");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unsupported_format_is_reported() {
        let mut image = red_pixel();
        image.texture_descriptor.format = TextureFormat::Depth32Float;

        let error = save_png(image, Path::new("unused.png")).expect_err("cannot convert");
        assert!(matches!(error, ScreenshotError::Convert(_)));
    }
}
