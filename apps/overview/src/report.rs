//! Rendering of the settled feed for the terminal.

use serde::Serialize;
use shared::domain::{ApiStatus, PhotoRecord};

#[derive(Debug, Serialize)]
pub struct OverviewReport<'a> {
    pub status: ApiStatus,
    pub count: usize,
    pub photos: &'a [PhotoRecord],
}

impl<'a> OverviewReport<'a> {
    pub fn new(status: ApiStatus, photos: &'a [PhotoRecord]) -> Self {
        Self {
            status,
            count: photos.len(),
            photos,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        match self.status {
            ApiStatus::Loading => "Photos are still loading.".to_string(),
            ApiStatus::Error => "Photos could not be loaded.".to_string(),
            ApiStatus::Done if self.photos.is_empty() => "No photos available.".to_string(),
            ApiStatus::Done => {
                let mut out = format!("{} photos\n", self.count);
                for (index, photo) in self.photos.iter().enumerate() {
                    out.push_str(&format!("{:>4}. {} {}\n", index + 1, photo.id, photo.img_src));
                }
                out
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
