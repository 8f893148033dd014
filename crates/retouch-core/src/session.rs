//! The editing session: a working buffer plus the snapshot it started from.
//!
//! Operations run one at a time on `&mut self`. Each computes its result
//! before touching state, so an error leaves both buffers exactly as they
//! were.

use std::path::Path;

use crate::buffer::ImageBuffer;
use crate::capture::{capture_frame, CaptureDevice};
use crate::channel::{select_channel, Channel};
use crate::config::EditorConfig;
use crate::decode::{decode_image, read_image};
use crate::draw::draw_line;
use crate::error::SessionError;
use crate::filter::sharpen;
use crate::input::{LineInput, LineSpec, RotationInput, RotationSpec};
use crate::transform::rotate_about_center;

/// Result of an editing operation that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The working buffer changed (or was reset) and should be redisplayed.
    Updated,
    /// No image is loaded; nothing happened.
    NoImage,
}

/// Both buffers exist together or not at all.
#[derive(Debug, Clone)]
struct Images {
    current: ImageBuffer,
    original: ImageBuffer,
}

/// Holds the working image and its pristine original.
#[derive(Debug, Clone, Default)]
pub struct ImageSession {
    config: EditorConfig,
    images: Option<Images>,
}

impl ImageSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            config,
            images: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.images.is_some()
    }

    /// The working buffer, if an image is loaded.
    pub fn current(&self) -> Option<&ImageBuffer> {
        self.images.as_ref().map(|images| &images.current)
    }

    /// The snapshot taken at load or capture time.
    pub fn original(&self) -> Option<&ImageBuffer> {
        self.images.as_ref().map(|images| &images.original)
    }

    /// Replace both buffers with `image`.
    fn install(&mut self, image: ImageBuffer) {
        log::info!(
            "loaded {}x{} image with {} channel(s)",
            image.width(),
            image.height(),
            image.channels()
        );
        self.images = Some(Images {
            original: image.clone(),
            current: image,
        });
    }

    /// Read and decode the file at `path` into both buffers.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        let image = read_image(path).inspect_err(|e| {
            log::warn!("failed to load {}: {}", path.display(), e);
        })?;
        self.install(image);
        Ok(())
    }

    /// Decode an in-memory encoded image into both buffers.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let image = decode_image(bytes).inspect_err(|e| {
            log::warn!("failed to decode {} byte image: {}", bytes.len(), e);
        })?;
        self.install(image);
        Ok(())
    }

    /// Take one frame from capture device `index` into both buffers.
    pub fn capture_from_device<D>(&mut self, device: &mut D, index: u32) -> Result<(), SessionError>
    where
        D: CaptureDevice + ?Sized,
    {
        let frame = capture_frame(device, index).inspect_err(|e| {
            log::warn!("capture from device {} failed: {}", index, e);
        })?;
        self.install(frame);
        Ok(())
    }

    /// Capture from the device named in the config.
    pub fn capture_from_default_device<D>(&mut self, device: &mut D) -> Result<(), SessionError>
    where
        D: CaptureDevice + ?Sized,
    {
        let index = self.config.capture_device;
        self.capture_from_device(device, index)
    }

    /// Parse `input` and stamp the line onto the working buffer.
    ///
    /// With no image loaded the input is not even parsed.
    pub fn draw_line(&mut self, input: &LineInput) -> Result<Outcome, SessionError> {
        if !self.is_loaded() {
            return Ok(Outcome::NoImage);
        }
        let line = input.parse().inspect_err(|e| {
            log::warn!("rejected line input: {}", e);
        })?;
        Ok(self.stamp_line(&line))
    }

    /// Stamp an already validated line onto the working buffer.
    pub fn stamp_line(&mut self, line: &LineSpec) -> Outcome {
        let color = self.config.line_color;
        let Some(images) = self.images.as_mut() else {
            return Outcome::NoImage;
        };
        draw_line(&mut images.current, line, color);
        log::debug!(
            "drew line ({}, {}) -> ({}, {}) thickness {}",
            line.start.x,
            line.start.y,
            line.end.x,
            line.end.y,
            line.thickness
        );
        Outcome::Updated
    }

    /// Apply the fixed sharpening kernel once more.
    pub fn sharpen(&mut self) -> Outcome {
        let Some(images) = self.images.as_mut() else {
            return Outcome::NoImage;
        };
        images.current = sharpen(&images.current);
        log::debug!("sharpened working image");
        Outcome::Updated
    }

    /// Parse `input` and rotate the working buffer about its center.
    ///
    /// With no image loaded the input is not even parsed.
    pub fn rotate(&mut self, input: &RotationInput) -> Result<Outcome, SessionError> {
        if !self.is_loaded() {
            return Ok(Outcome::NoImage);
        }
        let rotation = input.parse().inspect_err(|e| {
            log::warn!("rejected rotation input: {}", e);
        })?;
        Ok(self.rotate_by(rotation))
    }

    /// Rotate the working buffer by an already validated angle.
    pub fn rotate_by(&mut self, rotation: RotationSpec) -> Outcome {
        let filter = self.config.rotation_filter;
        let Some(images) = self.images.as_mut() else {
            return Outcome::NoImage;
        };
        images.current = rotate_about_center(&images.current, rotation.angle_degrees, filter);
        log::debug!("rotated working image by {} degrees", rotation.angle_degrees);
        Outcome::Updated
    }

    /// Discard all edits: the working buffer becomes a copy of the original.
    pub fn clear_edits(&mut self) -> Outcome {
        let Some(images) = self.images.as_mut() else {
            return Outcome::NoImage;
        };
        images.current = images.original.clone();
        log::debug!("cleared edits");
        Outcome::Updated
    }

    /// Same as [`clear_edits`](Self::clear_edits), and also empties the
    /// angle field.
    pub fn reset_rotation(&mut self, angle_input: &mut RotationInput) -> Outcome {
        let outcome = self.clear_edits();
        if outcome == Outcome::Updated {
            angle_input.clear();
        }
        outcome
    }

    /// Build a display-only view of one channel of the working buffer.
    ///
    /// Returns `None` when no image is loaded. The session is not modified.
    pub fn select_channel(&self, channel: Channel) -> Option<ImageBuffer> {
        self.current().map(|current| select_channel(current, channel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::testing::{Behavior, FakeDevice};
    use crate::capture::DeviceError;
    use crate::decode::LoadError;
    use crate::error::ErrorKind;
    use crate::input::{InputError, Point};
    use proptest::prelude::*;

    fn test_image(width: u32, height: u32) -> ImageBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 20) as u8);
                pixels.push((y * 30) as u8);
                pixels.push(((x + y) * 10 + 5) as u8);
            }
        }
        ImageBuffer::new(width, height, 3, pixels).unwrap()
    }

    fn loaded_session() -> ImageSession {
        let mut device = FakeDevice::new(Behavior::Frame(test_image(8, 6)));
        let mut session = ImageSession::new();
        session.capture_from_device(&mut device, 0).unwrap();
        session
    }

    fn write_png(dir: &tempfile::TempDir, name: &str, image: &ImageBuffer) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let rgb = image::RgbImage::from_raw(image.width(), image.height(), image.pixels().to_vec())
            .unwrap();
        rgb.save(&path).unwrap();
        path
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn test_load_sets_current_and_original() {
        let dir = tempfile::tempdir().unwrap();
        let src = test_image(8, 6);
        let path = write_png(&dir, "photo.png", &src);

        let mut session = ImageSession::new();
        assert!(!session.is_loaded());
        session.load(&path).unwrap();

        assert!(session.is_loaded());
        assert_eq!(session.current(), Some(&src));
        assert_eq!(session.original(), Some(&src));
    }

    #[test]
    fn test_load_missing_file_keeps_state() {
        let mut session = loaded_session();
        session.sharpen();
        let before = session.current().cloned();

        let err = session.load("/definitely/not/here.png").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
        assert!(matches!(err, SessionError::Load(LoadError::Io { .. })));
        assert_eq!(session.current().cloned(), before);
        assert_eq!(session.original(), Some(&test_image(8, 6)));
    }

    #[test]
    fn test_load_garbage_file_keeps_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"just some text").unwrap();

        let mut session = ImageSession::new();
        let err = session.load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
        assert!(!session.is_loaded());
    }

    #[test]
    fn test_load_bytes_replaces_previous_image() {
        let mut session = loaded_session();
        session.sharpen();

        let replacement = test_image(3, 2);
        let mut bytes = std::io::Cursor::new(Vec::new());
        image::RgbImage::from_raw(3, 2, replacement.pixels().to_vec())
            .unwrap()
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();

        session.load_bytes(bytes.get_ref()).unwrap();
        assert_eq!(session.current(), Some(&replacement));
        assert_eq!(session.original(), Some(&replacement));
    }

    // =========================================================================
    // Capture
    // =========================================================================

    #[test]
    fn test_capture_sets_both_buffers() {
        let session = loaded_session();
        assert_eq!(session.current(), session.original());
    }

    #[test]
    fn test_capture_failure_keeps_state() {
        let mut session = loaded_session();
        session.sharpen();
        let before = session.current().cloned();

        let mut device = FakeDevice::new(Behavior::NoFrame);
        let err = session.capture_from_device(&mut device, 0).unwrap_err();
        assert_eq!(err, SessionError::Device(DeviceError::NoFrame { index: 0 }));
        assert_eq!(session.current().cloned(), before);
        assert!(!device.held.get());

        let mut device = FakeDevice::new(Behavior::FailOpen);
        let err = session.capture_from_device(&mut device, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Device);
    }

    #[test]
    fn test_capture_uses_configured_device() {
        let mut config = EditorConfig::default();
        config.capture_device = 4;
        let mut session = ImageSession::with_config(config);

        let mut device = FakeDevice::new(Behavior::FailOpen);
        let err = session.capture_from_default_device(&mut device).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Device(DeviceError::Unavailable { index: 4, .. })
        ));
    }

    // =========================================================================
    // Editing without an image
    // =========================================================================

    #[test]
    fn test_operations_without_image_are_noops() {
        let mut session = ImageSession::new();
        let mut angle = RotationInput::new("15");

        // Even invalid input is not reported without an image
        let bad_line = LineInput::new("a", "b", "c", "d", "e");
        assert_eq!(session.draw_line(&bad_line).unwrap(), Outcome::NoImage);
        assert_eq!(session.sharpen(), Outcome::NoImage);
        assert_eq!(
            session.rotate(&RotationInput::new("oops")).unwrap(),
            Outcome::NoImage
        );
        assert_eq!(session.clear_edits(), Outcome::NoImage);
        assert_eq!(session.reset_rotation(&mut angle), Outcome::NoImage);
        assert_eq!(angle.angle, "15");
        assert!(session.select_channel(Channel::Red).is_none());
        assert!(!session.is_loaded());
    }

    // =========================================================================
    // Editing
    // =========================================================================

    #[test]
    fn test_draw_line_uses_configured_color() {
        let mut session = loaded_session();
        let input = LineInput::new("0", "2", "7", "2", "1");
        assert_eq!(session.draw_line(&input).unwrap(), Outcome::Updated);

        let current = session.current().unwrap();
        assert_eq!(current.pixel(4, 2), Some(&[0u8, 255, 0][..]));
        // Original is untouched
        assert_ne!(session.original().unwrap().pixel(4, 2), Some(&[0u8, 255, 0][..]));
    }

    #[test]
    fn test_draw_line_non_numeric_thickness_keeps_state() {
        let mut session = loaded_session();
        session.sharpen();
        let before = session.current().cloned();

        let input = LineInput::new("0", "0", "5", "5", "wide");
        let err = session.draw_line(&input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
        assert!(matches!(
            err,
            SessionError::Input(InputError::NotANumber { field: "thickness", .. })
        ));
        assert_eq!(session.current().cloned(), before);
    }

    #[test]
    fn test_draw_line_zero_thickness_rejected() {
        let mut session = loaded_session();
        let input = LineInput::new("0", "0", "5", "5", "0");
        let err = session.draw_line(&input).unwrap_err();
        assert!(matches!(err, SessionError::Input(InputError::OutOfRange { .. })));
        assert_eq!(session.current(), session.original());
    }

    #[test]
    fn test_custom_line_color() {
        let mut config = EditorConfig::default();
        config.line_color = [255, 0, 0];
        let mut session = ImageSession::with_config(config);
        let mut device = FakeDevice::new(Behavior::Frame(test_image(5, 5)));
        session.capture_from_device(&mut device, 0).unwrap();

        let line = LineSpec::new(Point::new(0, 0), Point::new(4, 0), 1).unwrap();
        session.stamp_line(&line);
        assert_eq!(session.current().unwrap().pixel(2, 0), Some(&[255u8, 0, 0][..]));
    }

    #[test]
    fn test_sharpen_twice_differs_from_once() {
        let mut once = loaded_session();
        once.sharpen();

        let mut twice = loaded_session();
        twice.sharpen();
        twice.sharpen();

        assert_ne!(once.current(), twice.current());

        // Deterministic
        let mut again = loaded_session();
        again.sharpen();
        assert_eq!(once.current(), again.current());
    }

    #[test]
    fn test_sharpen_ignores_kernel_in_config() {
        let config: EditorConfig = serde_json::from_str(
            r#"{ "sharpen_kernel": [[0, 0, 0], [0, 1000000000, 0], [0, 0, 0]] }"#,
        )
        .unwrap();
        let mut session = ImageSession::with_config(config);
        let mut device = FakeDevice::new(Behavior::Frame(test_image(8, 6)));
        session.capture_from_device(&mut device, 0).unwrap();

        assert_eq!(session.sharpen(), Outcome::Updated);
        let expected = crate::filter::sharpen(&test_image(8, 6));
        assert_eq!(session.current(), Some(&expected));
    }

    #[test]
    fn test_rotate_zero_is_unchanged() {
        let mut session = loaded_session();
        assert_eq!(
            session.rotate(&RotationInput::new("0")).unwrap(),
            Outcome::Updated
        );
        assert_eq!(session.current(), session.original());
    }

    #[test]
    fn test_rotate_keeps_dimensions() {
        let mut session = loaded_session();
        session.rotate(&RotationInput::new("33.5")).unwrap();
        let current = session.current().unwrap();
        assert_eq!((current.width(), current.height()), (8, 6));
        assert_ne!(session.current(), session.original());
    }

    #[test]
    fn test_rotate_non_numeric_keeps_state() {
        let mut session = loaded_session();
        session.rotate(&RotationInput::new("90")).unwrap();
        let before = session.current().cloned();

        let err = session.rotate(&RotationInput::new("ninety")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
        assert_eq!(session.current().cloned(), before);
    }

    #[test]
    fn test_clear_edits_restores_original() {
        let mut session = loaded_session();
        session
            .draw_line(&LineInput::new("0", "0", "7", "5", "2"))
            .unwrap();
        session.sharpen();
        session.rotate(&RotationInput::new("12")).unwrap();
        assert_ne!(session.current(), session.original());

        assert_eq!(session.clear_edits(), Outcome::Updated);
        assert_eq!(session.current(), session.original());
    }

    #[test]
    fn test_reset_rotation_clears_angle_input() {
        let mut session = loaded_session();
        let mut angle = RotationInput::new("45");
        session.rotate(&angle).unwrap();

        assert_eq!(session.reset_rotation(&mut angle), Outcome::Updated);
        assert!(angle.is_empty());
        assert_eq!(session.current(), session.original());
    }

    #[test]
    fn test_select_channel_does_not_touch_current() {
        let session = loaded_session();
        let before = session.current().cloned();

        let red = session.select_channel(Channel::Red).unwrap();
        for px in red.pixels().chunks_exact(3) {
            assert_eq!(px[1], 0);
            assert_eq!(px[2], 0);
        }
        let current = session.current().unwrap();
        for (shown, kept) in red.pixels().chunks_exact(3).zip(current.pixels().chunks_exact(3)) {
            assert_eq!(shown[0], kept[0]);
        }
        assert_eq!(session.current().cloned(), before);

        let full = session.select_channel(Channel::None).unwrap();
        assert_eq!(Some(&full), session.current());
    }

    // =========================================================================
    // Properties
    // =========================================================================

    #[derive(Debug, Clone)]
    enum Edit {
        Line(i32, i32, i32, i32, i32),
        Sharpen,
        Rotate(f64),
    }

    fn edit_strategy() -> impl Strategy<Value = Edit> {
        prop_oneof![
            (-4..12i32, -4..10i32, -4..12i32, -4..10i32, 1..5i32)
                .prop_map(|(a, b, c, d, t)| Edit::Line(a, b, c, d, t)),
            Just(Edit::Sharpen),
            (-360.0..360.0f64).prop_map(Edit::Rotate),
        ]
    }

    fn apply(session: &mut ImageSession, edit: &Edit) {
        match *edit {
            Edit::Line(x0, y0, x1, y1, t) => {
                let input = LineInput::new(
                    x0.to_string(),
                    y0.to_string(),
                    x1.to_string(),
                    y1.to_string(),
                    t.to_string(),
                );
                session.draw_line(&input).unwrap();
            }
            Edit::Sharpen => {
                session.sharpen();
            }
            Edit::Rotate(angle) => {
                session.rotate(&RotationInput::new(angle.to_string())).unwrap();
            }
        }
    }

    proptest! {
        #[test]
        fn prop_clear_edits_restores_original(edits in prop::collection::vec(edit_strategy(), 0..8)) {
            let mut session = loaded_session();
            for edit in &edits {
                apply(&mut session, edit);
            }
            session.clear_edits();
            prop_assert_eq!(session.current(), Some(&test_image(8, 6)));
            prop_assert_eq!(session.original(), Some(&test_image(8, 6)));
        }

        #[test]
        fn prop_rejected_input_never_mutates(
            edits in prop::collection::vec(edit_strategy(), 0..4),
            junk in "[a-z ]{1,6}",
        ) {
            let mut session = loaded_session();
            for edit in &edits {
                apply(&mut session, edit);
            }
            let before = session.current().cloned();

            let line = LineInput::new("1", "1", "4", "4", junk.clone());
            prop_assert!(session.draw_line(&line).is_err());
            prop_assert!(session.rotate(&RotationInput::new(junk)).is_err());
            prop_assert_eq!(session.current().cloned(), before);
        }

        #[test]
        fn prop_select_channel_is_display_only(index in 0u32..6) {
            let session = loaded_session();
            let shown = session.select_channel(Channel::from_index(index)).unwrap();
            prop_assert_eq!(shown.width(), 8);
            prop_assert_eq!(shown.height(), 6);
            prop_assert_eq!(session.current(), session.original());
        }
    }
}
