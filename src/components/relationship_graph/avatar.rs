//! Avatar image cache keyed by URL.
//!
//! Images are created on first request and polled once per frame; the
//! renderer draws the placeholder glyph until an image reports a decoded
//! size. A broken URL stays on the placeholder for the lifetime of the cache.

use std::collections::HashMap;

use log::{debug, warn};
use web_sys::HtmlImageElement;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
	Loading,
	Ready,
	Failed,
}

struct Entry {
	image: Option<HtmlImageElement>,
	status: Status,
}

#[derive(Default)]
pub struct AvatarCache {
	entries: HashMap<String, Entry>,
}

impl AvatarCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the decoded image for `url`, starting a load on first use.
	pub fn image(&mut self, url: &str) -> Option<&HtmlImageElement> {
		let entry = self
			.entries
			.entry(url.to_string())
			.or_insert_with(|| load(url));
		match entry.status {
			Status::Ready => entry.image.as_ref(),
			Status::Loading | Status::Failed => None,
		}
	}

	/// Updates pending loads. Returns true if any image became drawable.
	pub fn poll(&mut self) -> bool {
		let mut changed = false;
		for (url, entry) in self.entries.iter_mut() {
			if entry.status != Status::Loading {
				continue;
			}
			let Some(image) = entry.image.as_ref() else {
				entry.status = Status::Failed;
				continue;
			};
			if !image.complete() {
				continue;
			}
			if image.natural_width() > 0 {
				debug!("relationship-graph: avatar loaded {url}");
				entry.status = Status::Ready;
				changed = true;
			} else {
				warn!("relationship-graph: avatar failed to load {url}");
				entry.status = Status::Failed;
			}
		}
		changed
	}
}

fn load(url: &str) -> Entry {
	match HtmlImageElement::new() {
		Ok(image) => {
			image.set_src(url);
			Entry {
				image: Some(image),
				status: Status::Loading,
			}
		}
		Err(err) => {
			warn!("relationship-graph: cannot create image element: {err:?}");
			Entry {
				image: None,
				status: Status::Failed,
			}
		}
	}
}
