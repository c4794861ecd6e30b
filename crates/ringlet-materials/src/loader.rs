//! Background texture loading with a single aggregate completion signal.
//!
//! Every declared map of every set is queued at start-up and decoded on a
//! small worker pool. The main thread calls [`AssetLoader::poll`] once per
//! frame; it returns the [`MaterialCatalog`] exactly once, on the poll after the
//! last texture arrives. If any texture fails, the failure is logged and the
//! catalog is never produced.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use crossbeam_channel::TryRecvError;

use crate::catalog::MaterialCatalog;
use crate::error::AssetError;
use crate::kind::MaterialKind;
use crate::manifest::MaterialManifest;
use crate::material::{MapSlot, NormalConvention};
use crate::texture::DecodedTexture;

/// One texture file to decode.
struct TextureRequest {
    kind: MaterialKind,
    slot: MapSlot,
    path: PathBuf,
    convention: NormalConvention,
}

/// A finished decode, successful or not.
struct TextureLoaded {
    kind: MaterialKind,
    slot: MapSlot,
    result: Result<DecodedTexture, AssetError>,
}

/// Counts of finished texture loads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: usize,
    pub failed: usize,
    pub total: usize,
}

impl LoadProgress {
    pub fn is_complete(&self) -> bool {
        self.loaded == self.total
    }

    /// At least one texture failed, so the catalog will never be produced.
    pub fn is_stalled(&self) -> bool {
        self.failed > 0
    }

    pub fn pending(&self) -> usize {
        self.total - self.loaded - self.failed
    }
}

/// Worker pool decoding the material textures.
pub struct AssetLoader {
    manifest: MaterialManifest,
    result_receiver: crossbeam_channel::Receiver<TextureLoaded>,
    worker_handles: Vec<JoinHandle<()>>,
    cancelled: Arc<AtomicBool>,
    textures: HashMap<(MaterialKind, MapSlot), DecodedTexture>,
    progress: LoadProgress,
    delivered: bool,
    disconnected: bool,
}

impl AssetLoader {
    /// Queue every texture in `manifest` and start `worker_count` threads.
    ///
    /// Paths resolve against `texture_root`. At least one worker is spawned.
    pub fn start(
        manifest: MaterialManifest,
        texture_root: &Path,
        worker_count: usize,
    ) -> Result<Self, AssetError> {
        let (task_tx, task_rx) = crossbeam_channel::unbounded();
        let (result_tx, result_rx) = crossbeam_channel::unbounded();
        let cancelled = Arc::new(AtomicBool::new(false));

        let mut total = 0;
        for def in manifest.iter() {
            for (slot, _) in def.maps.iter() {
                let Some(path) = def.map_path(texture_root, slot) else {
                    continue;
                };
                // The receiver is alive in this scope, so send cannot fail.
                let _ = task_tx.send(TextureRequest {
                    kind: def.kind,
                    slot,
                    path,
                    convention: def.normal_convention,
                });
                total += 1;
            }
        }
        // Workers exit once the queue drains.
        drop(task_tx);

        let worker_count = worker_count.max(1);
        let mut handles = Vec::with_capacity(worker_count);
        for i in 0..worker_count {
            let rx: crossbeam_channel::Receiver<TextureRequest> = task_rx.clone();
            let tx = result_tx.clone();
            let stop = Arc::clone(&cancelled);

            let handle = std::thread::Builder::new()
                .name(format!("texture-loader-{i}"))
                .spawn(move || {
                    while let Ok(request) = rx.recv() {
                        if stop.load(Ordering::Relaxed) {
                            break;
                        }
                        let result = if request.slot == MapSlot::Normal {
                            DecodedTexture::load_normal(&request.path, request.convention)
                        } else {
                            DecodedTexture::load(&request.path)
                        };
                        if tx
                            .send(TextureLoaded {
                                kind: request.kind,
                                slot: request.slot,
                                result,
                            })
                            .is_err()
                        {
                            break;
                        }
                    }
                })
                .map_err(AssetError::WorkerSpawn)?;
            handles.push(handle);
        }

        tracing::info!(
            textures = total,
            workers = worker_count,
            root = %texture_root.display(),
            "Loading material textures"
        );

        Ok(Self {
            manifest,
            result_receiver: result_rx,
            worker_handles: handles,
            cancelled,
            textures: HashMap::with_capacity(total),
            progress: LoadProgress {
                total,
                ..Default::default()
            },
            delivered: false,
            disconnected: false,
        })
    }

    /// Collect finished decodes. Called once per frame on the main thread.
    ///
    /// Returns the catalog on the first poll that observes every texture
    /// loaded, and `None` on every other call.
    pub fn poll(&mut self) -> Option<MaterialCatalog> {
        loop {
            match self.result_receiver.try_recv() {
                Ok(loaded) => self.record(loaded),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected && self.progress.pending() > 0 {
                        tracing::warn!(
                            pending = self.progress.pending(),
                            "{}",
                            AssetError::LoaderShutDown
                        );
                    }
                    self.disconnected = true;
                    break;
                }
            }
        }

        if self.delivered || !self.progress.is_complete() {
            return None;
        }
        self.delivered = true;

        let textures = std::mem::take(&mut self.textures);
        match MaterialCatalog::assemble(&self.manifest, textures) {
            Ok(catalog) => {
                tracing::info!(textures = self.progress.total, "All material textures loaded");
                Some(catalog)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Material catalog could not be assembled");
                None
            }
        }
    }

    fn record(&mut self, loaded: TextureLoaded) {
        match loaded.result {
            Ok(texture) => {
                tracing::debug!(
                    material = %loaded.kind,
                    map = %loaded.slot,
                    width = texture.width,
                    height = texture.height,
                    bytes = texture.byte_len(),
                    "Texture decoded"
                );
                self.textures.insert((loaded.kind, loaded.slot), texture);
                self.progress.loaded += 1;
            }
            Err(e) => {
                tracing::warn!(material = %loaded.kind, map = %loaded.slot, error = %e, "Texture failed to load");
                self.progress.failed += 1;
            }
        }
        if self.progress.is_stalled() && self.progress.pending() == 0 {
            tracing::warn!(
                failed = self.progress.failed,
                total = self.progress.total,
                "Texture loading finished with failures, rings keep their placeholders"
            );
        }
    }

    pub fn progress(&self) -> LoadProgress {
        self.progress
    }

    /// Whether the catalog has already been handed out.
    pub fn is_delivered(&self) -> bool {
        self.delivered
    }

    /// Stop the workers. Queued textures that have not started are skipped.
    pub fn shutdown(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
        for handle in self.worker_handles.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for AssetLoader {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::texture::write_test_png;

    /// Manifest with one albedo per set, plus a DirectX normal for forest.
    fn small_manifest() -> MaterialManifest {
        let sets: Vec<String> = MaterialKind::ALL
            .iter()
            .map(|kind| {
                let normal = if *kind == MaterialKind::Forest {
                    r#"normal: Some("n.png"),"#
                } else {
                    ""
                };
                format!(
                    r#"(kind: {kind}, maps: (albedo: Some("a.png"), {normal}), metalness: 0.1, roughness: 0.2, normal_convention: DirectX)"#
                )
            })
            .collect();
        MaterialManifest::from_ron_str(&format!("(sets: [{}])", sets.join(","))).unwrap()
    }

    fn write_assets(root: &Path) {
        for kind in MaterialKind::ALL {
            let dir = root.join(kind.name());
            std::fs::create_dir_all(&dir).unwrap();
            write_test_png(&dir.join("a.png"), 2, 2, [200, 100, 50, 255]);
        }
        write_test_png(&root.join("forest").join("n.png"), 1, 1, [128, 30, 255, 255]);
    }

    fn poll_until_settled(loader: &mut AssetLoader) -> Option<MaterialCatalog> {
        let start = Instant::now();
        loop {
            if let Some(catalog) = loader.poll() {
                return Some(catalog);
            }
            if loader.progress().pending() == 0 {
                return None;
            }
            assert!(start.elapsed() < Duration::from_secs(10), "loader timed out");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_catalog_delivered_once_after_all_loads() {
        let dir = tempfile::tempdir().unwrap();
        write_assets(dir.path());

        let mut loader = AssetLoader::start(small_manifest(), dir.path(), 3).unwrap();
        assert_eq!(loader.progress().total, 11);

        let catalog = poll_until_settled(&mut loader).expect("catalog should be ready");
        assert!(loader.is_delivered());
        assert_eq!(loader.progress().loaded, 11);
        assert!(loader.poll().is_none(), "catalog must only be delivered once");

        let forest = catalog.get(MaterialKind::Forest);
        let normal = forest.map(MapSlot::Normal).unwrap();
        assert_eq!(normal.rgba[1], 255 - 30);
        let ice = catalog.get(MaterialKind::Ice);
        assert_eq!(&ice.map(MapSlot::Albedo).unwrap().rgba[..3], &[200, 100, 50]);
    }

    #[test]
    fn test_failed_texture_stalls_catalog() {
        let dir = tempfile::tempdir().unwrap();
        write_assets(dir.path());
        std::fs::remove_file(dir.path().join("bog").join("a.png")).unwrap();

        let mut loader = AssetLoader::start(small_manifest(), dir.path(), 2).unwrap();
        assert!(poll_until_settled(&mut loader).is_none());

        let progress = loader.progress();
        assert_eq!(progress.failed, 1);
        assert_eq!(progress.loaded, 10);
        assert!(progress.is_stalled());
        assert!(!progress.is_complete());
        assert!(loader.poll().is_none());
        assert!(!loader.is_delivered());
    }

    #[test]
    fn test_zero_workers_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        write_assets(dir.path());
        let mut loader = AssetLoader::start(small_manifest(), dir.path(), 0).unwrap();
        assert!(poll_until_settled(&mut loader).is_some());
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        write_assets(dir.path());
        let mut loader = AssetLoader::start(small_manifest(), dir.path(), 2).unwrap();
        loader.shutdown();
        loader.shutdown();
    }

    #[test]
    fn test_progress_pending() {
        let p = LoadProgress {
            loaded: 3,
            failed: 1,
            total: 6,
        };
        assert_eq!(p.pending(), 2);
        assert!(!p.is_complete());
        assert!(p.is_stalled());
    }
}
