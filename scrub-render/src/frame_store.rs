//! Eager frame preloading

use crate::frame_loader::decode_frame;
use image::RgbaImage;
use scrub_core::FrameSequence;
use std::path::{Path, PathBuf};

/// Decoded frames indexed by frame number. A frame that failed to load is
/// kept as an empty slot and simply never draws.
#[derive(Debug, Default)]
pub struct FrameStore {
    frames: Vec<Option<RgbaImage>>,
}

impl FrameStore {
    /// Creates a store with `count` empty slots
    pub fn empty(count: u32) -> Self {
        Self {
            frames: vec![None; count as usize],
        }
    }

    /// Decodes every frame of `sequence` from `dir`, calling `on_frame` after
    /// each attempt with the frame index and whether it loaded
    pub fn preload(
        dir: &Path,
        sequence: &FrameSequence,
        mut on_frame: impl FnMut(u32, bool),
    ) -> Self {
        let mut store = Self::empty(sequence.count);
        for index in 0..sequence.count {
            let loaded = store.load(dir, sequence, index);
            on_frame(index, loaded);
        }
        tracing::debug!(
            loaded = store.loaded_count(),
            total = store.len(),
            "preload finished"
        );
        store
    }

    /// Decodes only the given frames, leaving every other slot empty
    pub fn preload_only(
        dir: &Path,
        sequence: &FrameSequence,
        indices: impl IntoIterator<Item = u32>,
    ) -> Self {
        let mut store = Self::empty(sequence.count);
        for index in indices {
            store.load(dir, sequence, index);
        }
        store
    }

    /// Loads one frame into its slot. Returns whether decoding succeeded.
    pub fn load(&mut self, dir: &Path, sequence: &FrameSequence, index: u32) -> bool {
        let Some(slot) = self.frames.get_mut(index as usize) else {
            return false;
        };

        let path = frame_path(dir, sequence, index);
        match decode_frame(&path) {
            Ok(image) => {
                *slot = Some(image);
                true
            }
            Err(err) => {
                tracing::warn!(index, path = %path.display(), "failed to load frame: {err}");
                false
            }
        }
    }

    /// Stores an already decoded frame
    pub fn insert(&mut self, index: u32, image: RgbaImage) {
        if let Some(slot) = self.frames.get_mut(index as usize) {
            *slot = Some(image);
        }
    }

    pub fn get(&self, index: u32) -> Option<&RgbaImage> {
        self.frames.get(index as usize)?.as_ref()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of slots holding a decoded frame
    pub fn loaded_count(&self) -> usize {
        self.frames.iter().filter(|frame| frame.is_some()).count()
    }

    /// Indices of frames that are not loaded
    pub fn missing(&self) -> Vec<u32> {
        self.frames
            .iter()
            .enumerate()
            .filter(|(_, frame)| frame.is_none())
            .map(|(index, _)| index as u32)
            .collect()
    }
}

/// Location of a frame file inside `dir`, following the sequence's naming
pub fn frame_path(dir: &Path, sequence: &FrameSequence, index: u32) -> PathBuf {
    dir.join(sequence.pattern.file_name(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use scrub_core::FramePattern;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("scrub-store-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_frames(dir: &Path, sequence: &FrameSequence, indices: &[u32]) {
        for &index in indices {
            let shade = (index * 40) as u8;
            let image = RgbImage::from_pixel(8, 6, Rgb([shade, shade, shade]));
            image.save(frame_path(dir, sequence, index)).unwrap();
        }
    }

    fn sequence(count: u32) -> FrameSequence {
        FrameSequence::new(count, FramePattern::default()).unwrap()
    }

    #[test]
    fn test_preload_skips_missing_frames() {
        let dir = scratch_dir("missing");
        let sequence = sequence(4);
        write_frames(&dir, &sequence, &[0, 1, 3]);

        let mut seen = Vec::new();
        let store = FrameStore::preload(&dir, &sequence, |index, ok| seen.push((index, ok)));

        assert_eq!(seen, vec![(0, true), (1, true), (2, false), (3, true)]);
        assert_eq!(store.len(), 4);
        assert_eq!(store.loaded_count(), 3);
        assert_eq!(store.missing(), vec![2]);
        assert!(store.get(2).is_none());
        assert_eq!(store.get(0).unwrap().dimensions(), (8, 6));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_preload_only_selected() {
        let dir = scratch_dir("only");
        let sequence = sequence(3);
        write_frames(&dir, &sequence, &[0, 1, 2]);

        let store = FrameStore::preload_only(&dir, &sequence, [1]);
        assert_eq!(store.loaded_count(), 1);
        assert!(store.get(1).is_some());
        assert!(store.get(0).is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_out_of_range_access() {
        let mut store = FrameStore::empty(2);
        store.insert(5, RgbaImage::new(1, 1));
        assert_eq!(store.loaded_count(), 0);
        assert!(store.get(5).is_none());
        assert!(!store.load(Path::new("/nonexistent"), &sequence(2), 9));
    }

    #[test]
    fn test_frame_path_ignores_url_base() {
        let path = frame_path(Path::new("/data/frames"), &sequence(10), 0);
        assert_eq!(path, PathBuf::from("/data/frames/frame_0001.jpg"));
    }
}
