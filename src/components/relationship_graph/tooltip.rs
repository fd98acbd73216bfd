//! Hover tooltip for relationship edges.

use leptos::prelude::*;

use super::types::{Character, Relationship, find_character};

/// Resolved tooltip text for one relationship.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipContent {
	/// `"{name1} ↔ {name2}"`.
	pub title: String,
	/// Relationship type text.
	pub relationship_type: String,
	/// Note, omitted when blank.
	pub description: Option<String>,
}

impl TooltipContent {
	/// Looks up both endpoint names. Returns `None` if either character is
	/// missing, in which case no tooltip is shown.
	pub fn resolve(relationship: &Relationship, characters: &[Character]) -> Option<Self> {
		let first = find_character(characters, &relationship.character1_id)?;
		let second = find_character(characters, &relationship.character2_id)?;
		Some(Self {
			title: format!("{} ↔ {}", first.name, second.name),
			relationship_type: relationship.relationship_type.clone(),
			description: relationship
				.description
				.clone()
				.filter(|d| !d.trim().is_empty()),
		})
	}
}

/// Tooltip anchored at a viewport point (client coordinates).
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	/// Text to show.
	pub content: TooltipContent,
	/// Pointer x in viewport pixels.
	pub x: f64,
	/// Pointer y in viewport pixels.
	pub y: f64,
}

impl Tooltip {
	/// Inline placement: 10px right of the pointer, bottom edge 10px above it.
	pub fn style(&self) -> String {
		format!(
			"position: fixed; left: {}px; top: {}px; transform: translateY(-100%); pointer-events: none; z-index: 50;",
			self.x + 10.0,
			self.y - 10.0
		)
	}
}

/// Floating relationship summary that follows the pointer.
#[component]
pub fn RelationshipTooltip(
	/// Tooltip to show; `None` hides it.
	#[prop(into)]
	tooltip: Signal<Option<Tooltip>>,
) -> impl IntoView {
	view! {
		{move || {
			tooltip.get().map(|t| {
				let style = t.style();
				view! {
					<div
						class="relationship-tooltip bg-white border border-gray-200 rounded-lg shadow-lg p-3 max-w-xs"
						style=style
					>
						<div class="font-semibold text-gray-900 text-sm mb-1">{t.content.title}</div>
						<div class="text-xs text-blue-600 font-medium mb-1">{t.content.relationship_type}</div>
						{t.content.description.map(|d| view! {
							<div class="text-xs text-gray-600">{d}</div>
						})}
					</div>
				}
			})
		}}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn character(id: &str, name: &str) -> Character {
		Character {
			id: id.into(),
			group_id: "g1".into(),
			name: name.into(),
			photo: None,
			information: String::new(),
			related_links: vec![],
			labels: vec![],
			created_at: None,
			updated_at: None,
		}
	}

	fn relationship(description: Option<&str>) -> Relationship {
		Relationship {
			id: "r1".into(),
			group_id: "g1".into(),
			character1_id: "a".into(),
			character2_id: "b".into(),
			relationship_type: "友人".into(),
			description: description.map(Into::into),
			created_at: None,
		}
	}

	#[test]
	fn test_resolve_names_and_type() {
		let characters = vec![character("a", "太郎"), character("b", "花子")];
		let content = TooltipContent::resolve(&relationship(Some("幼なじみ")), &characters).unwrap();
		assert_eq!(content.title, "太郎 ↔ 花子");
		assert_eq!(content.relationship_type, "友人");
		assert_eq!(content.description.as_deref(), Some("幼なじみ"));
	}

	#[test]
	fn test_missing_endpoint_hides_tooltip() {
		let characters = vec![character("a", "太郎")];
		assert!(TooltipContent::resolve(&relationship(None), &characters).is_none());
	}

	#[test]
	fn test_blank_description_is_omitted() {
		let characters = vec![character("a", "太郎"), character("b", "花子")];
		let content = TooltipContent::resolve(&relationship(Some("  ")), &characters).unwrap();
		assert!(content.description.is_none());
	}

	#[test]
	fn test_style_offsets_from_pointer() {
		let characters = vec![character("a", "A"), character("b", "B")];
		let tooltip = Tooltip {
			content: TooltipContent::resolve(&relationship(None), &characters).unwrap(),
			x: 100.0,
			y: 200.0,
		};
		let style = tooltip.style();
		assert!(style.contains("left: 110px"));
		assert!(style.contains("top: 190px"));
		assert!(style.contains("translateY(-100%)"));
	}
}
