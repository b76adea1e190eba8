//! Named, file-based save points.
//!
//! Layout inside the save point directory:
//!
//! ```text
//! <name>.json
//! <name>_images/event_<index>_<id>.<ext>
//! ```
//!
//! Images never appear inline in the written document: each image-bearing
//! event carries an `image_file` reference instead. Writes go through
//! `<name>.json.tmp` and `<name>_images.tmp`; a crash mid-way can leave
//! those behind, and they are ignored by `list`.

use crate::core::session::Session;
use crate::core::store::EventStore;
use crate::errors::{AppError, AppResult};
use crate::models::event::{Event, EventId};
use crate::models::image::ImageData;
use crate::models::save_point::{
    SAVE_POINT_VERSION, SaveInfo, SavePointDocument, SavePointHandle, SavePointSummary,
    StoredEvent,
};
use crate::ui::messages::warning;
use chrono::{DateTime, Local, NaiveDateTime};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const MAX_ID_IN_FILE_NAME: usize = 40;

pub struct SavePointRepo {
    dir: PathBuf,
}

impl SavePointRepo {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn document_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    pub fn images_dir(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}_images"))
    }

    /// Trim the name and make sure it is usable as a file-name stem.
    pub fn validate_name(raw: &str) -> AppResult<String> {
        let name = raw.trim();
        let bad = name.is_empty()
            || name == "."
            || name.contains("..")
            || name.contains(['/', '\\', '\0']);
        if bad {
            return Err(AppError::InvalidSavePointName(raw.to_string()));
        }
        Ok(name.to_string())
    }

    /// Write `<name>.json` plus one file per image-bearing event.
    /// An existing save point with the same name is replaced.
    ///
    /// The new images and document are staged under temporary names and
    /// renamed into place; the previous images are removed only once the
    /// new document is committed. A failure leaves the previous save point
    /// as it was.
    pub fn create(&self, name: &str, session: &Session) -> AppResult<SavePointHandle> {
        let name = Self::validate_name(name)?;
        fs::create_dir_all(&self.dir)?;

        let staging = self.dir.join(format!("{name}_images.tmp"));
        let doc_tmp = self.dir.join(format!("{name}.json.tmp"));
        clear_directory(&staging)?;

        let files = match self.stage(&name, session, &staging, &doc_tmp) {
            Ok(files) => files,
            Err(e) => {
                let _ = clear_directory(&staging);
                let _ = fs::remove_file(&doc_tmp);
                return Err(e);
            }
        };

        let images_dir = self.images_dir(&name);
        let path = self.document_path(&name);
        if let Err(e) = self.commit(&name, &staging, &doc_tmp, &images_dir, &path) {
            let _ = clear_directory(&staging);
            let _ = fs::remove_file(&doc_tmp);
            return Err(e);
        }

        Ok(SavePointHandle {
            name,
            path,
            images: files.iter().map(|f| images_dir.join(f)).collect(),
        })
    }

    /// Write images into `staging` and the document to `doc_tmp`.
    /// Returns the image file names.
    fn stage(
        &self,
        name: &str,
        session: &Session,
        staging: &Path,
        doc_tmp: &Path,
    ) -> AppResult<Vec<String>> {
        let events = session.store.all();
        let mut stored = Vec::with_capacity(events.len());
        let mut image_files = BTreeMap::new();
        let mut files = Vec::new();

        for (index, ev) in events.iter().enumerate() {
            let image_file = match &ev.image {
                Some(img) => {
                    fs::create_dir_all(staging)?;
                    let file_name = image_file_name(index, &ev.id, img);
                    fs::write(staging.join(&file_name), img.as_bytes())?;
                    files.push(file_name.clone());
                    image_files.insert(ev.id.to_string(), file_name.clone());
                    Some(file_name)
                }
                None => None,
            };

            stored.push(StoredEvent {
                id: ev.id.to_string(),
                title: ev.title.clone(),
                date: ev.date,
                image_file,
            });
        }

        let doc = SavePointDocument {
            save_info: SaveInfo {
                name: name.to_string(),
                created_at: Local::now().to_rfc3339(),
                version: SAVE_POINT_VERSION.to_string(),
                event_count: events.len(),
            },
            events: stored,
            settings: session.settings.clone(),
            image_files,
        };

        let json = serde_json::to_string_pretty(&doc)?;
        fs::write(doc_tmp, json)?;
        Ok(files)
    }

    /// Swap the staged images and document into place. The previous image
    /// directory is parked under `<name>_images.old` and put back if the
    /// document rename fails.
    fn commit(
        &self,
        name: &str,
        staging: &Path,
        doc_tmp: &Path,
        images_dir: &Path,
        document: &Path,
    ) -> AppResult<()> {
        let parked = self.dir.join(format!("{name}_images.old"));
        clear_directory(&parked)?;

        let had_images = images_dir.is_dir();
        if had_images {
            fs::rename(images_dir, &parked)?;
        }

        let swapped = if staging.is_dir() {
            fs::rename(staging, images_dir)
        } else {
            Ok(())
        }
        .and_then(|_| fs::rename(doc_tmp, document));

        if let Err(e) = swapped {
            let _ = clear_directory(images_dir);
            if had_images {
                let _ = fs::rename(&parked, images_dir);
            }
            return Err(e.into());
        }

        if let Err(e) = clear_directory(&parked) {
            warning(format!(
                "Could not remove old images '{}': {e}",
                parked.display()
            ));
        }
        Ok(())
    }

    /// Read a save point back into a session. An image that cannot be read
    /// only costs that event its image.
    pub fn load(&self, name: &str) -> AppResult<Session> {
        let name = Self::validate_name(name)?;
        let path = self.document_path(&name);

        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(AppError::SavePointNotFound(name));
            }
            Err(e) => return Err(e.into()),
        };

        let doc: SavePointDocument =
            serde_json::from_str(&content).map_err(|e| AppError::CorruptSavePoint {
                name: name.clone(),
                reason: e.to_string(),
            })?;

        let images_dir = self.images_dir(&name);
        let events: Vec<Event> = doc
            .events
            .into_iter()
            .map(|se| {
                let image = se
                    .image_file
                    .as_deref()
                    .and_then(|f| read_image(&images_dir, f, &se.title));
                Event {
                    id: EventId::from(se.id),
                    title: se.title,
                    date: se.date,
                    image,
                }
            })
            .collect();

        let store = EventStore::from_events(events).map_err(|e| AppError::CorruptSavePoint {
            name: name.clone(),
            reason: e.to_string(),
        })?;

        Ok(Session::with_parts(store, doc.settings))
    }

    /// All readable save points, newest first. Unreadable documents are
    /// reported and skipped.
    pub fn list(&self) -> AppResult<Vec<SavePointSummary>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut out = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
                continue;
            };

            match read_document(&path) {
                Ok(doc) => out.push(SavePointSummary {
                    name: stem,
                    created_at: doc.save_info.created_at,
                    event_count: doc.save_info.event_count,
                    title: doc.save_info.name,
                }),
                Err(e) => warning(format!(
                    "Skipping save point '{}': {e}",
                    path.file_name().unwrap_or_default().to_string_lossy()
                )),
            }
        }

        out.sort_by(|a, b| {
            created_key(&b.created_at)
                .cmp(&created_key(&a.created_at))
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(out)
    }

    /// Remove the document, every image file and the image directory.
    /// Returns the removed paths; an unknown name removes nothing.
    pub fn delete(&self, name: &str) -> AppResult<Vec<PathBuf>> {
        let name = Self::validate_name(name)?;
        let mut removed = Vec::new();

        let doc = self.document_path(&name);
        if doc.exists() {
            fs::remove_file(&doc)?;
            removed.push(doc);
        }

        let images_dir = self.images_dir(&name);
        if images_dir.is_dir() {
            for entry in fs::read_dir(&images_dir)? {
                let p = entry?.path();
                if p.is_file() {
                    fs::remove_file(&p)?;
                    removed.push(p);
                }
            }
            fs::remove_dir(&images_dir)?;
            removed.push(images_dir);
        }

        Ok(removed)
    }
}

/// `event_<index>_<id>.<ext>`, with the id reduced to file-name-safe chars.
/// Ids longer than `MAX_ID_IN_FILE_NAME` are cut and suffixed with a hash
/// of the full id so the file name stays well under NAME_MAX.
fn image_file_name(index: usize, id: &EventId, img: &ImageData) -> String {
    let safe_id: String = id
        .as_str()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let safe_id = if safe_id.len() > MAX_ID_IN_FILE_NAME {
        format!("{}_{:016x}", &safe_id[..24], fnv1a(id.as_str().as_bytes()))
    } else {
        safe_id
    };
    format!("event_{index}_{safe_id}.{}", img.extension())
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |h, b| {
        (h ^ u64::from(*b)).wrapping_mul(0x0100_0000_01b3)
    })
}

fn read_image(images_dir: &Path, file: &str, title: &str) -> Option<ImageData> {
    // Only the file name is honoured; references never leave the image dir.
    let file_name = Path::new(file).file_name()?;
    match fs::read(images_dir.join(file_name)) {
        Ok(bytes) => Some(ImageData::new(bytes)),
        Err(e) => {
            warning(format!("Could not load image for event '{title}': {e}"));
            None
        }
    }
}

fn read_document(path: &Path) -> AppResult<SavePointDocument> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Remove regular files left in `dir` by an earlier save point.
fn clear_directory(dir: &Path) -> AppResult<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let p = entry?.path();
        if p.is_file() {
            fs::remove_file(&p)?;
        }
    }
    fs::remove_dir(dir)?;
    Ok(())
}

/// Sort key for `created_at`; unparsable values sort last.
fn created_key(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok()
}
