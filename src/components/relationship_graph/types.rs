//! Graph data structures: records supplied by the host and the presentation
//! snapshots derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum visible characters of a node name before it is truncated.
pub const MAX_NAME_CHARS: usize = 12;
/// Maximum number of label dots drawn around a node.
pub const MAX_LABEL_MARKERS: usize = 5;

/// A colored tag attached to characters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
	/// Unique identifier.
	pub id: String,
	/// Display name.
	pub name: String,
	/// CSS color, usually `#rrggbb`.
	pub color: String,
}

/// A person in a group, as returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
	/// Unique identifier. Relationships reference characters by this id.
	pub id: String,
	/// Owning group.
	#[serde(default)]
	pub group_id: String,
	/// Full display name.
	pub name: String,
	/// Avatar URL. `None` renders a placeholder silhouette.
	#[serde(default)]
	pub photo: Option<String>,
	/// Free-form profile text, may span several lines.
	#[serde(default)]
	pub information: String,
	/// External URLs about the character.
	#[serde(default)]
	pub related_links: Vec<String>,
	/// Tags, in display order.
	#[serde(default)]
	pub labels: Vec<Label>,
	/// Creation time.
	#[serde(default)]
	pub created_at: Option<DateTime<Utc>>,
	/// Last update time.
	#[serde(default)]
	pub updated_at: Option<DateTime<Utc>>,
}

/// A pairwise relationship between two characters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
	/// Unique identifier.
	pub id: String,
	/// Owning group.
	#[serde(default)]
	pub group_id: String,
	/// First endpoint. Relationships are undirected.
	pub character1_id: String,
	/// Second endpoint.
	pub character2_id: String,
	/// Free text; see [`RelationshipType`] for the vocabulary used by the
	/// relationship form.
	pub relationship_type: String,
	/// Optional note shown in the tooltip.
	#[serde(default)]
	pub description: Option<String>,
	/// Creation time.
	#[serde(default)]
	pub created_at: Option<DateTime<Utc>>,
}

/// Complete graph input: every character and relationship of one group.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	/// Nodes.
	#[serde(default)]
	pub characters: Vec<Character>,
	/// Edges. Entries naming unknown characters are ignored.
	#[serde(default)]
	pub relationships: Vec<Relationship>,
}

impl GraphData {
	/// Character by id.
	pub fn character(&self, id: &str) -> Option<&Character> {
		find_character(&self.characters, id)
	}

	/// Relationship by id.
	pub fn relationship(&self, id: &str) -> Option<&Relationship> {
		find_relationship(&self.relationships, id)
	}
}

/// Looks up a character by id. Stale ids resolve to `None`.
pub fn find_character<'a>(characters: &'a [Character], id: &str) -> Option<&'a Character> {
	characters.iter().find(|c| c.id == id)
}

/// Looks up a relationship by id. Stale ids resolve to `None`.
pub fn find_relationship<'a>(
	relationships: &'a [Relationship],
	id: &str,
) -> Option<&'a Relationship> {
	relationships.iter().find(|r| r.id == id)
}

/// The fixed relationship vocabulary offered when creating relationships.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationshipType {
	/// 友人
	Friend,
	/// 恋人
	Lover,
	/// 夫婦
	Spouse,
	/// 親子
	ParentChild,
	/// 兄弟姉妹
	Siblings,
	/// 同僚
	Colleague,
	/// 上司・部下
	SuperiorSubordinate,
	/// 師弟
	MentorMentee,
	/// 敵対
	Adversary,
	/// その他
	Other,
}

impl RelationshipType {
	/// Every type, in the order the relationship form lists them.
	pub const ALL: [RelationshipType; 10] = [
		RelationshipType::Friend,
		RelationshipType::Lover,
		RelationshipType::Spouse,
		RelationshipType::ParentChild,
		RelationshipType::Siblings,
		RelationshipType::Colleague,
		RelationshipType::SuperiorSubordinate,
		RelationshipType::MentorMentee,
		RelationshipType::Adversary,
		RelationshipType::Other,
	];

	/// Label stored in `Relationship::relationship_type`.
	pub fn label(self) -> &'static str {
		match self {
			RelationshipType::Friend => "友人",
			RelationshipType::Lover => "恋人",
			RelationshipType::Spouse => "夫婦",
			RelationshipType::ParentChild => "親子",
			RelationshipType::Siblings => "兄弟姉妹",
			RelationshipType::Colleague => "同僚",
			RelationshipType::SuperiorSubordinate => "上司・部下",
			RelationshipType::MentorMentee => "師弟",
			RelationshipType::Adversary => "敵対",
			RelationshipType::Other => "その他",
		}
	}

	/// English gloss of the label.
	pub fn english(self) -> &'static str {
		match self {
			RelationshipType::Friend => "friend",
			RelationshipType::Lover => "lover",
			RelationshipType::Spouse => "spouse",
			RelationshipType::ParentChild => "parent-child",
			RelationshipType::Siblings => "siblings",
			RelationshipType::Colleague => "colleague",
			RelationshipType::SuperiorSubordinate => "superior/subordinate",
			RelationshipType::MentorMentee => "mentor/mentee",
			RelationshipType::Adversary => "adversary",
			RelationshipType::Other => "other",
		}
	}

	/// Matches either the Japanese label or the English gloss (case-insensitive).
	pub fn from_label(text: &str) -> Option<Self> {
		let text = text.trim();
		Self::ALL
			.into_iter()
			.find(|t| t.label() == text || t.english().eq_ignore_ascii_case(text))
	}
}

/// Dash pattern category of an edge, derived from its relationship label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineStyle {
	/// Continuous line.
	#[default]
	Solid,
	/// `5,5`, used for friends.
	Dashed,
	/// `10,2,2,2`, used for lovers.
	DashDot,
}

impl LineStyle {
	/// Case-insensitive substring match; friend wins over family wins over lover.
	pub fn from_label(label: &str) -> Self {
		let label = label.to_lowercase();
		if label.contains("友人") || label.contains("friend") {
			LineStyle::Dashed
		} else if label.contains("家族") || label.contains("family") {
			LineStyle::Solid
		} else if label.contains("恋人") || label.contains("lover") {
			LineStyle::DashDot
		} else {
			LineStyle::Solid
		}
	}

	/// Canvas line dash segments. Empty means solid.
	pub fn dash_pattern(self) -> &'static [f64] {
		match self {
			LineStyle::Solid => &[],
			LineStyle::Dashed => &[5.0, 5.0],
			LineStyle::DashDot => &[10.0, 2.0, 2.0, 2.0],
		}
	}
}

/// One colored indicator dot drawn around a node.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelMarker {
	/// Label name.
	pub name: String,
	/// Dot fill, as given by the label.
	pub color: String,
}

/// Read-only presentation snapshot of a character.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Character id.
	pub id: String,
	/// Name truncated to [`MAX_NAME_CHARS`] plus an ellipsis.
	pub display_name: String,
	/// Photo URL, blank values removed.
	pub avatar_url: Option<String>,
	/// At most [`MAX_LABEL_MARKERS`] entries, in label order.
	pub label_markers: Vec<LabelMarker>,
}

impl GraphNode {
	/// Snapshot of a host record.
	pub fn from_character(character: &Character) -> Self {
		Self {
			id: character.id.clone(),
			display_name: truncate_name(&character.name),
			avatar_url: character.photo.clone().filter(|url| !url.trim().is_empty()),
			label_markers: character
				.labels
				.iter()
				.take(MAX_LABEL_MARKERS)
				.map(|l| LabelMarker {
					name: l.name.clone(),
					color: l.color.clone(),
				})
				.collect(),
		}
	}
}

/// Read-only presentation snapshot of a relationship. Endpoints are arena
/// indices into the node list of the same build.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	/// Relationship id.
	pub id: String,
	/// Node index of `character1_id`.
	pub source: usize,
	/// Node index of `character2_id`.
	pub target: usize,
	/// Relationship type text drawn at the midpoint.
	pub label: String,
	/// Relationship note.
	pub description: Option<String>,
	/// Dash pattern category.
	pub line_style: LineStyle,
}

/// Truncates to [`MAX_NAME_CHARS`] characters (not bytes) and appends `...`.
pub fn truncate_name(name: &str) -> String {
	if name.chars().count() > MAX_NAME_CHARS {
		let head: String = name.chars().take(MAX_NAME_CHARS).collect();
		format!("{head}...")
	} else {
		name.to_string()
	}
}
