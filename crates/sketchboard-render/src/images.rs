//! Image resources: decoding, background loading and the repaint signal.
//!
//! The renderer never blocks on an image. The first frame that needs a source
//! asks the [`ImageCache`] for it, which hands the source to an
//! [`ImageLoader`] and reports nothing to draw. Once the host calls
//! [`ImageCache::poll`] and a load has finished, the cache raises its
//! [`RepaintSignal`] so the host draws another frame.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use peniko::{Blob, ImageAlphaType, ImageData, ImageFormat};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Image loading errors.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Unsupported image source: {0}")]
    Unsupported(String),
}

/// Decode encoded image bytes (PNG, JPEG, WebP) into RGBA8 image data.
pub fn decode_image(bytes: &[u8]) -> Result<ImageData, ImageError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ImageData {
        data: Blob::new(Arc::new(rgba.into_vec())),
        format: ImageFormat::Rgba8,
        alpha_type: ImageAlphaType::Alpha,
        width,
        height,
    })
}

/// Bytes behind an image `src`: a base64 `data:` URL, a `file://` URL or a
/// plain filesystem path.
pub fn read_source(src: &str) -> Result<Vec<u8>, ImageError> {
    if let Some(rest) = src.strip_prefix("data:") {
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| ImageError::InvalidDataUrl("missing ','".to_string()))?;
        if !header.ends_with(";base64") {
            return Err(ImageError::InvalidDataUrl(format!("not base64: {header}")));
        }
        return Ok(STANDARD.decode(payload.trim())?);
    }
    if src.starts_with("http://") || src.starts_with("https://") {
        return Err(ImageError::Unsupported(src.to_string()));
    }
    let path = src.strip_prefix("file://").unwrap_or(src);
    Ok(std::fs::read(path)?)
}

/// Read and decode an image source.
pub fn load_source(src: &str) -> Result<ImageData, ImageError> {
    decode_image(&read_source(src)?)
}

/// Outcome of one finished load.
pub type LoadResult = (String, Result<ImageData, ImageError>);

/// Something that turns image sources into decoded images, eventually.
pub trait ImageLoader {
    /// Start loading `src`. Called at most once per source by the cache.
    fn request(&mut self, src: &str);

    /// Collect loads that finished since the last poll.
    fn poll(&mut self) -> Vec<LoadResult>;
}

/// Loads on the calling thread, deferred until the next poll.
#[derive(Debug, Default)]
pub struct DeferredImageLoader {
    queue: VecDeque<String>,
}

impl DeferredImageLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImageLoader for DeferredImageLoader {
    fn request(&mut self, src: &str) {
        self.queue.push_back(src.to_string());
    }

    fn poll(&mut self) -> Vec<LoadResult> {
        self.queue
            .drain(..)
            .map(|src| {
                let result = load_source(&src);
                (src, result)
            })
            .collect()
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use threaded::ThreadedImageLoader;

#[cfg(not(target_arch = "wasm32"))]
mod threaded {
    use super::{ImageError, ImageLoader, LoadResult, load_source};
    use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
    use std::thread::{self, JoinHandle};

    /// Loads and decodes on a background thread.
    ///
    /// The worker exits when the loader is dropped.
    pub struct ThreadedImageLoader {
        request_tx: Option<Sender<String>>,
        result_rx: Receiver<LoadResult>,
        /// Requests that could not be handed to the worker.
        rejected: Vec<String>,
        _thread: Option<JoinHandle<()>>,
    }

    impl ThreadedImageLoader {
        pub fn new() -> Self {
            let (request_tx, request_rx) = channel::<String>();
            let (result_tx, result_rx) = channel::<LoadResult>();

            let handle = thread::Builder::new()
                .name("image-loader".to_string())
                .spawn(move || {
                    for src in request_rx {
                        let result = load_source(&src);
                        if result_tx.send((src, result)).is_err() {
                            break;
                        }
                    }
                    log::debug!("image loader thread exiting");
                });

            match handle {
                Ok(handle) => Self {
                    request_tx: Some(request_tx),
                    result_rx,
                    rejected: Vec::new(),
                    _thread: Some(handle),
                },
                Err(e) => {
                    log::error!("Failed to start image loader thread: {e}");
                    Self {
                        request_tx: None,
                        result_rx,
                        rejected: Vec::new(),
                        _thread: None,
                    }
                }
            }
        }
    }

    impl Default for ThreadedImageLoader {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ImageLoader for ThreadedImageLoader {
        fn request(&mut self, src: &str) {
            let sent = self
                .request_tx
                .as_ref()
                .is_some_and(|tx| tx.send(src.to_string()).is_ok());
            if !sent {
                log::error!("Image loader unavailable, dropping {src}");
                self.rejected.push(src.to_string());
            }
        }

        fn poll(&mut self) -> Vec<LoadResult> {
            let mut results: Vec<LoadResult> = self
                .rejected
                .drain(..)
                .map(|src| {
                    let result =
                        Err(ImageError::Unsupported(format!("loader unavailable for {src}")));
                    (src, result)
                })
                .collect();
            loop {
                match self.result_rx.try_recv() {
                    Ok(result) => results.push(result),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        if self.request_tx.take().is_some() {
                            log::error!("Image loader thread disconnected");
                        }
                        break;
                    }
                }
            }
            results
        }
    }
}

/// Fire-once flag telling the host to draw another frame.
///
/// Clones share the flag, so a host may keep one on another thread.
#[derive(Debug, Clone, Default)]
pub struct RepaintSignal(Arc<AtomicBool>);

impl RepaintSignal {
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether a repaint was requested since the last call.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

/// Load state of one image source.
#[derive(Debug, Clone)]
pub enum ImageState {
    Pending,
    Ready(ImageData),
    /// Never retried.
    Failed,
}

/// Decoded images keyed by source.
pub struct ImageCache {
    states: HashMap<String, ImageState>,
    loader: Box<dyn ImageLoader>,
    repaint: RepaintSignal,
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("images", &self.states.len())
            .field("repaint", &self.repaint)
            .finish()
    }
}

impl ImageCache {
    pub fn new(loader: impl ImageLoader + 'static) -> Self {
        Self {
            states: HashMap::new(),
            loader: Box::new(loader),
            repaint: RepaintSignal::default(),
        }
    }

    /// The decoded image for `src`, requesting it on first sight.
    pub fn get_or_request(&mut self, src: &str) -> Option<&ImageData> {
        if !self.states.contains_key(src) {
            log::debug!("requesting image {}", truncate(src));
            self.states.insert(src.to_string(), ImageState::Pending);
            self.loader.request(src);
            return None;
        }
        match self.states.get(src) {
            Some(ImageState::Ready(image)) => Some(image),
            _ => None,
        }
    }

    pub fn state(&self, src: &str) -> Option<&ImageState> {
        self.states.get(src)
    }

    /// Store an already decoded image.
    pub fn insert(&mut self, src: impl Into<String>, image: ImageData) {
        self.states.insert(src.into(), ImageState::Ready(image));
    }

    /// Move finished loads into the cache. Returns how many finished and
    /// raises the repaint signal if any did.
    pub fn poll(&mut self) -> usize {
        let results = self.loader.poll();
        let finished = results.len();
        for (src, result) in results {
            let state = match result {
                Ok(image) => ImageState::Ready(image),
                Err(e) => {
                    log::warn!("Failed to load image {}: {e}", truncate(&src));
                    ImageState::Failed
                }
            };
            self.states.insert(src, state);
        }
        if finished > 0 {
            self.repaint.raise();
        }
        finished
    }

    /// Handle to the repaint flag.
    pub fn repaint_signal(&self) -> RepaintSignal {
        self.repaint.clone()
    }

    /// Whether a repaint was requested since the last call.
    pub fn take_repaint(&self) -> bool {
        self.repaint.take()
    }
}

/// Keep data URLs out of log lines.
fn truncate(src: &str) -> &str {
    match src.char_indices().nth(64) {
        Some((i, _)) => &src[..i],
        None => src,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png).unwrap();
        bytes
    }

    fn data_url(bytes: &[u8]) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(bytes))
    }

    #[test]
    fn test_decode_png() {
        let image = decode_image(&png_bytes(3, 2)).unwrap();
        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!(image.data.data().len(), 3 * 2 * 4);
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(decode_image(b"not an image"), Err(ImageError::Decode(_))));
    }

    #[test]
    fn test_data_urls() {
        let image = load_source(&data_url(&png_bytes(1, 1))).unwrap();
        assert_eq!(image.width, 1);
        assert!(matches!(read_source("data:image/png,abc"), Err(ImageError::InvalidDataUrl(_))));
        assert!(matches!(read_source("data:nocomma"), Err(ImageError::InvalidDataUrl(_))));
        assert!(matches!(read_source("data:image/png;base64,@@@"), Err(ImageError::Base64(_))));
    }

    #[test]
    fn test_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, &png_bytes(4, 4)).unwrap();
        let path = file.path().to_string_lossy().to_string();
        assert_eq!(load_source(&path).unwrap().width, 4);
        assert_eq!(load_source(&format!("file://{path}")).unwrap().height, 4);
        assert!(matches!(load_source("/definitely/not/here.png"), Err(ImageError::Io(_))));
        assert!(matches!(
            read_source("https://example.com/a.png"),
            Err(ImageError::Unsupported(_))
        ));
    }

    #[test]
    fn test_cache_requests_once_and_signals_once() {
        let src = data_url(&png_bytes(2, 2));
        let mut cache = ImageCache::new(DeferredImageLoader::new());
        assert!(cache.get_or_request(&src).is_none());
        assert!(cache.get_or_request(&src).is_none());
        assert!(matches!(cache.state(&src), Some(ImageState::Pending)));
        assert!(!cache.take_repaint());

        assert_eq!(cache.poll(), 1);
        assert!(cache.take_repaint());
        assert!(!cache.take_repaint());
        assert_eq!(cache.get_or_request(&src).map(|i| i.width), Some(2));
        assert_eq!(cache.poll(), 0);
        assert!(!cache.take_repaint());
    }

    #[test]
    fn test_failed_load_is_not_retried() {
        let mut cache = ImageCache::new(DeferredImageLoader::new());
        assert!(cache.get_or_request("/missing.png").is_none());
        cache.poll();
        assert!(matches!(cache.state("/missing.png"), Some(ImageState::Failed)));
        assert!(cache.get_or_request("/missing.png").is_none());
        assert_eq!(cache.poll(), 0);
    }

    #[test]
    fn test_threaded_loader() {
        let src = data_url(&png_bytes(5, 1));
        let mut cache = ImageCache::new(ThreadedImageLoader::new());
        let signal = cache.repaint_signal();
        cache.get_or_request(&src);
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while cache.poll() == 0 {
            assert!(std::time::Instant::now() < deadline, "loader timed out");
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(signal.take());
        assert_eq!(cache.get_or_request(&src).map(|i| i.width), Some(5));
    }
}
